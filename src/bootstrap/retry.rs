//! Connect-with-retry for a service that may still be starting.
//!
//! The policy is linear: a fixed delay between attempts and a fixed attempt
//! cap. Startup waits are short and bounded, so there is no backoff or jitter.

use std::io::Write;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument, warn};

use super::report::Progress;
use crate::errors::{Error, Result};
use crate::service::{AdminApi, ConnectParams, SessionHandle};

/// Number of characters of an error message shown per failed attempt
pub const ERROR_SNIPPET_CHARS: usize = 50;

/// How often and how patiently to try the first connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Pause after each failed attempt except the last
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: 30, delay: Duration::from_secs(2) }
    }
}

impl RetryPolicy {
    /// Longest time spent sleeping before giving up.
    pub fn total_wait(&self) -> Duration {
        self.delay * self.max_attempts.saturating_sub(1)
    }
}

/// First `max_chars` characters of `message`.
pub fn truncate_message(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}

/// Open a session, retrying per `policy` until the service accepts it.
///
/// Every failed attempt is reported with its number and a truncated error.
/// Once the attempts run out the last error is returned inside
/// [`Error::ServiceUnreachable`].
#[instrument(
    skip_all,
    fields(host = %params.host, port = params.port, user = %params.user, max_attempts = policy.max_attempts)
)]
pub async fn connect_with_retry<A, W>(
    api: &A,
    params: &ConnectParams,
    policy: &RetryPolicy,
    progress: &mut Progress<W>,
) -> Result<SessionHandle>
where
    A: AdminApi + ?Sized,
    W: Write,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match api.connect(params).await {
            Ok(session) => {
                info!(attempt, session = %session, "Connected to Milvus");
                progress.connected(&params.host, params.port);
                return Ok(session);
            }
            Err(err) => {
                warn!(attempt, error = %err, "Connection attempt failed");
                progress.waiting(
                    attempt,
                    policy.max_attempts,
                    &truncate_message(&err.to_string(), ERROR_SNIPPET_CHARS),
                );

                if attempt >= policy.max_attempts {
                    return Err(Error::ServiceUnreachable { attempts: attempt, source: err });
                }

                sleep(policy.delay).await;
            }
        }
    }
}
