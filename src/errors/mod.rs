//! # Error Handling
//!
//! Error taxonomy for the secure initialization procedure. Each variant maps to
//! one phase of the run so the operator can tell which step stopped it and what
//! state the service was left in.

use crate::secrets::SecretsError;
use crate::service::ServiceError;

/// Custom result type for initialization operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the initialization procedure
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The service never accepted the default credentials
    #[error("Unable to reach Milvus after {attempts} attempts: {source}")]
    ServiceUnreachable {
        attempts: u32,
        #[source]
        source: ServiceError,
    },

    /// The password reset call was rejected
    #[error("Failed to rotate password for '{user}': {source}")]
    CredentialRotation {
        user: String,
        #[source]
        source: ServiceError,
    },

    /// Connecting with the freshly rotated password failed
    #[error("Failed to re-authenticate as '{user}' with the rotated password: {source}")]
    Reauthentication {
        user: String,
        #[source]
        source: ServiceError,
    },

    /// The application user could not be created
    #[error("Failed to create user '{username}': {source}")]
    Provisioning {
        username: String,
        #[source]
        source: ServiceError,
    },

    /// A credential record could not be written
    #[error("Failed to persist credentials: {0}")]
    Persist(#[from] SecretsError),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Short label of the phase that failed, used in structured logs
    pub fn phase(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::ServiceUnreachable { .. } => "connect",
            Error::CredentialRotation { .. } => "rotate",
            Error::Reauthentication { .. } => "reconnect",
            Error::Provisioning { .. } => "provision",
            Error::Persist(_) => "persist",
        }
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let detail = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                messages.push(format!("{}: {}", field, detail));
            }
        }
        messages.sort();
        Self::Config(messages.join("; "))
    }
}
