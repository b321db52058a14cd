//! # Secure Initialization Procedure
//!
//! Takes a freshly started Milvus instance from its shipped credential to a
//! rotated administrative password plus a separate application user:
//!
//! ```text
//! connect (retry) → rotate admin password → persist → reconnect
//!                 → create application user → persist → report
//! ```
//!
//! Every failure stops the run. Completed steps are never undone: the admin
//! password file stays on disk even when a later step fails, because the new
//! password is already live on the server.

pub mod report;
pub mod retry;

use std::io::Write;
use tracing::{error, info, instrument};

use crate::config::InitConfig;
use crate::errors::{Error, Result};
use crate::secrets::{generate_password, CredentialRecord, SecretSink, SecretString};
use crate::service::{AdminApi, ConnectParams, SessionHandle};

pub use report::{Progress, COMPLETION_MARKER};
pub use retry::{connect_with_retry, truncate_message, RetryPolicy, ERROR_SNIPPET_CHARS};

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub admin_user: String,
    pub app_username: String,
    /// Where the administrative password was stored
    pub admin_password_location: String,
    /// Where the application credentials were stored
    pub app_credentials_location: String,
}

/// Runs the initialization procedure against one service.
pub struct Bootstrapper<A, S> {
    config: InitConfig,
    api: A,
    sink: S,
}

impl<A, S> Bootstrapper<A, S>
where
    A: AdminApi,
    S: SecretSink,
{
    pub fn new(config: InitConfig, api: A, sink: S) -> Self {
        Self { config, api, sink }
    }

    pub fn config(&self) -> &InitConfig {
        &self.config
    }

    /// Run every phase in order, narrating progress to `out`.
    pub async fn run<W: Write>(&self, out: &mut W) -> Result<BootstrapOutcome> {
        let mut progress = Progress::new(out);
        progress.started();
        info!(address = %self.config.address(), "Starting Milvus secure initialization");

        match self.execute(&mut progress).await {
            Ok(outcome) => {
                progress.completed(&outcome);
                info!(
                    app_username = %outcome.app_username,
                    "Milvus secure initialization completed"
                );
                Ok(outcome)
            }
            Err(err) => {
                error!(phase = err.phase(), error = %err, "Milvus secure initialization failed");
                progress.failed(&err);
                Err(err)
            }
        }
    }

    async fn execute<W: Write>(&self, progress: &mut Progress<W>) -> Result<BootstrapOutcome> {
        let params = self.config.default_connect_params();
        let session = connect_with_retry(&self.api, &params, &self.config.retry, progress).await?;

        let (admin_password, admin_password_location) =
            self.rotate_admin_password(&params, &session, progress).await?;

        let session = self.reauthenticate(&params, session, admin_password, progress).await?;

        let app_credentials_location = self.provision_app_user(&session, progress).await?;

        Ok(BootstrapOutcome {
            admin_user: self.config.admin_user.clone(),
            app_username: self.config.app_username.clone(),
            admin_password_location,
            app_credentials_location,
        })
    }

    /// Replace the shipped admin password and persist the new one.
    #[instrument(skip_all, fields(user = %self.config.admin_user))]
    async fn rotate_admin_password<W: Write>(
        &self,
        params: &ConnectParams,
        session: &SessionHandle,
        progress: &mut Progress<W>,
    ) -> Result<(SecretString, String)> {
        let user = &self.config.admin_user;
        let new_password = generate_password(self.config.admin_password_length);

        progress.rotating(user);
        self.api
            .reset_password(user, &params.password, &new_password, session)
            .await
            .map_err(|source| Error::CredentialRotation { user: user.clone(), source })?;
        progress.rotated(user);
        info!("Administrative password rotated");

        let record = CredentialRecord::administrative(user.clone(), new_password.clone());
        let location = self.sink.store(&record).await?;
        progress.saved("New administrative password", &location);

        Ok((new_password, location))
    }

    /// Drop the session opened with the old password and open one with the new.
    #[instrument(skip_all, fields(user = %self.config.admin_user))]
    async fn reauthenticate<W: Write>(
        &self,
        params: &ConnectParams,
        session: SessionHandle,
        new_password: SecretString,
        progress: &mut Progress<W>,
    ) -> Result<SessionHandle> {
        self.api.disconnect(&session.alias).await;

        let rotated = params.with_credentials(self.config.admin_user.clone(), new_password);
        let session = self.api.connect(&rotated).await.map_err(|source| {
            Error::Reauthentication { user: self.config.admin_user.clone(), source }
        })?;

        progress.reconnected(&session);
        info!(session = %session, "Re-authenticated with rotated password");
        Ok(session)
    }

    /// Create the application user and persist its credentials.
    #[instrument(skip_all, fields(username = %self.config.app_username))]
    async fn provision_app_user<W: Write>(
        &self,
        session: &SessionHandle,
        progress: &mut Progress<W>,
    ) -> Result<String> {
        let username = &self.config.app_username;
        let password = generate_password(self.config.app_password_length);

        progress.provisioning(username);
        self.api
            .create_user(username, &password, session)
            .await
            .map_err(|source| Error::Provisioning { username: username.clone(), source })?;
        progress.provisioned(username);
        info!("Application user created");

        let record = CredentialRecord::application(username.clone(), password);
        let location = self.sink.store(&record).await?;
        progress.saved("Application user credentials", &location);

        Ok(location)
    }
}
