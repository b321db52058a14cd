//! The administrative capability the procedure depends on.

use async_trait::async_trait;
use std::fmt;

use super::error::Result;
use crate::secrets::SecretString;

/// Everything needed to open a session.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    /// Name the session is registered under
    pub alias: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
}

impl ConnectParams {
    pub fn new(
        alias: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self { alias: alias.into(), host: host.into(), port, user: user.into(), password }
    }

    /// Same target and alias, different credential.
    pub fn with_credentials(&self, user: impl Into<String>, password: SecretString) -> Self {
        Self {
            alias: self.alias.clone(),
            host: self.host.clone(),
            port: self.port,
            user: user.into(),
            password,
        }
    }
}

/// A live authenticated session. Holds no secret material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub alias: String,
    pub host: String,
    pub port: u16,
    pub user: String,
}

impl SessionHandle {
    pub fn from_params(params: &ConnectParams) -> Self {
        Self {
            alias: params.alias.clone(),
            host: params.host.clone(),
            port: params.port,
            user: params.user.clone(),
        }
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{} ({})", self.user, self.host, self.port, self.alias)
    }
}

/// User management operations of the target service.
///
/// Implementations MUST NOT log password values.
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// Authenticate and register a session under `params.alias`.
    async fn connect(&self, params: &ConnectParams) -> Result<SessionHandle>;

    /// Release the session registered under `alias`. Unknown aliases are ignored.
    async fn disconnect(&self, alias: &str);

    /// Replace `user`'s password. `old_password` must be the current one.
    async fn reset_password(
        &self,
        user: &str,
        old_password: &SecretString,
        new_password: &SecretString,
        session: &SessionHandle,
    ) -> Result<()>;

    /// Create a new principal with the given password.
    async fn create_user(
        &self,
        username: &str,
        password: &SecretString,
        session: &SessionHandle,
    ) -> Result<()>;
}
