//! Credential records and the sinks that persist them.
//!
//! The procedure hands finished records to a [`SecretSink`]. The only sink
//! shipped here writes plaintext files into a directory; a secret manager
//! backend can replace it without touching the procedure.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::error::{Result, SecretsError};
use super::types::SecretString;

/// Default file name for the rotated administrative password.
pub const ADMIN_PASSWORD_FILE: &str = ".milvus_root_password";

/// Default file name for the application user's credentials.
pub const APP_CREDENTIALS_FILE: &str = ".milvus_app_credentials";

/// Which principal a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialKind {
    /// The default highest-privilege account
    Administrative,
    /// The lower-privilege account created for client applications
    Application,
}

impl CredentialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKind::Administrative => "administrative",
            CredentialKind::Application => "application",
        }
    }
}

/// A principal name paired with its password.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub kind: CredentialKind,
    pub username: String,
    pub password: SecretString,
}

impl CredentialRecord {
    pub fn administrative(username: impl Into<String>, password: SecretString) -> Self {
        Self { kind: CredentialKind::Administrative, username: username.into(), password }
    }

    pub fn application(username: impl Into<String>, password: SecretString) -> Self {
        Self { kind: CredentialKind::Application, username: username.into(), password }
    }

    /// Render the record in its on-disk form.
    ///
    /// Administrative records hold the bare password. Application records hold
    /// `username=<name>` and `password=<value>` on two lines. Neither form ends
    /// with a newline.
    pub fn render(&self) -> Result<SecretString> {
        if self.username.contains(['\n', '\r'])
            || self.password.expose_secret().contains(['\n', '\r'])
        {
            return Err(SecretsError::invalid_record("fields must not contain line breaks"));
        }

        let rendered = match self.kind {
            CredentialKind::Administrative => self.password.expose_secret().to_string(),
            CredentialKind::Application => {
                format!("username={}\npassword={}", self.username, self.password.expose_secret())
            }
        };
        Ok(SecretString::new(rendered))
    }
}

/// Destination for finished credential records.
#[async_trait]
pub trait SecretSink: Send + Sync {
    /// Persist `record`, replacing any earlier record of the same kind.
    ///
    /// Returns a human-readable description of where the record landed.
    async fn store(&self, record: &CredentialRecord) -> Result<String>;
}

/// Writes records as plaintext files into a directory.
///
/// Files are overwritten in place. Permissions are left at the process
/// defaults and writes are not atomic.
#[derive(Debug, Clone)]
pub struct PlaintextFileSink {
    directory: PathBuf,
    admin_file: String,
    app_file: String,
}

impl PlaintextFileSink {
    /// Create a sink writing the default file names into `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            admin_file: ADMIN_PASSWORD_FILE.to_string(),
            app_file: APP_CREDENTIALS_FILE.to_string(),
        }
    }

    /// Override the file names used for each record kind.
    pub fn with_file_names(mut self, admin_file: impl Into<String>, app_file: impl Into<String>) -> Self {
        self.admin_file = admin_file.into();
        self.app_file = app_file.into();
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path a record of `kind` is written to.
    pub fn path_for(&self, kind: CredentialKind) -> PathBuf {
        match kind {
            CredentialKind::Administrative => self.directory.join(&self.admin_file),
            CredentialKind::Application => self.directory.join(&self.app_file),
        }
    }
}

#[async_trait]
impl SecretSink for PlaintextFileSink {
    async fn store(&self, record: &CredentialRecord) -> Result<String> {
        let path = self.path_for(record.kind);
        let contents = record.render()?;

        debug!(kind = record.kind.as_str(), path = %path.display(), "Writing credential file");
        tokio::fs::write(&path, contents.expose_secret().as_bytes())
            .await
            .map_err(|e| SecretsError::io(&path, e))?;

        info!(
            kind = record.kind.as_str(),
            username = %record.username,
            path = %path.display(),
            "Credential file written"
        );
        Ok(path.display().to_string())
    }
}
