//! # Configuration Management
//!
//! [`InitConfig`] is the single record the procedure runs from. It is built from
//! environment variables (with documented defaults), optionally overridden by
//! command line flags, and validated before anything touches the service.

use lazy_static::lazy_static;
use regex::Regex;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use validator::{Validate, ValidationError};

use crate::bootstrap::RetryPolicy;
use crate::errors::{Error, Result};
use crate::secrets::{SecretString, ADMIN_PASSWORD_LENGTH, APP_PASSWORD_LENGTH};
use crate::service::ConnectParams;

pub const HOST_ENV: &str = "MILVUS_HOST";
pub const PORT_ENV: &str = "MILVUS_PORT";
pub const OUTPUT_DIR_ENV: &str = "MILVUS_INIT_OUTPUT_DIR";
pub const APP_USER_ENV: &str = "MILVUS_INIT_APP_USER";
pub const REQUEST_TIMEOUT_ENV: &str = "MILVUS_INIT_REQUEST_TIMEOUT";

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 19530;
pub const DEFAULT_ADMIN_USER: &str = "root";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Milvus";
pub const DEFAULT_APP_USER: &str = "app_user";
pub const DEFAULT_SESSION_ALIAS: &str = "default";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

lazy_static! {
    // Milvus user names: a leading letter, then letters, digits or underscores, 32 max
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_]{0,31}$")
        .expect("USERNAME_REGEX should be a valid regex pattern");
}

/// Validate a Milvus principal name.
pub fn validate_username(name: &str) -> std::result::Result<(), ValidationError> {
    if USERNAME_REGEX.is_match(name) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_username");
        error.message = Some(
            "must start with a letter and contain only letters, digits or underscores (max 32)"
                .into(),
        );
        Err(error)
    }
}

/// Configuration for one initialization run
#[derive(Debug, Clone, Validate)]
pub struct InitConfig {
    /// Milvus host
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Milvus port (gRPC and REST share it)
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,

    /// Built-in administrative principal
    #[validate(custom(function = "validate_username"))]
    pub admin_user: String,

    /// Password the administrative principal ships with
    pub default_admin_password: SecretString,

    /// Principal provisioned for applications
    #[validate(custom(function = "validate_username"))]
    pub app_username: String,

    #[validate(range(min = 16, max = 128, message = "Password length must be between 16 and 128"))]
    pub admin_password_length: usize,

    #[validate(range(min = 16, max = 128, message = "Password length must be between 16 and 128"))]
    pub app_password_length: usize,

    /// Directory receiving the credential files
    pub output_dir: PathBuf,

    /// Per-request HTTP timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub request_timeout_seconds: u64,

    /// Alias the session is registered under
    #[validate(length(min = 1, message = "Session alias cannot be empty"))]
    pub session_alias: String,

    pub retry: RetryPolicy,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            admin_user: DEFAULT_ADMIN_USER.to_string(),
            default_admin_password: SecretString::new(DEFAULT_ADMIN_PASSWORD),
            app_username: DEFAULT_APP_USER.to_string(),
            admin_password_length: ADMIN_PASSWORD_LENGTH,
            app_password_length: APP_PASSWORD_LENGTH,
            output_dir: PathBuf::from("."),
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
            session_alias: DEFAULT_SESSION_ALIAS.to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl InitConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var(HOST_ENV).unwrap_or(defaults.host);

        let port = match env::var(PORT_ENV) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid {} '{}': {}", PORT_ENV, raw, e)))?,
            Err(_) => defaults.port,
        };

        let output_dir = env::var(OUTPUT_DIR_ENV).map(PathBuf::from).unwrap_or(defaults.output_dir);

        let app_username = env::var(APP_USER_ENV).unwrap_or(defaults.app_username);

        let request_timeout_seconds = match env::var(REQUEST_TIMEOUT_ENV) {
            Ok(raw) => raw.trim().parse().map_err(|e| {
                Error::config(format!("Invalid {} '{}': {}", REQUEST_TIMEOUT_ENV, raw, e))
            })?,
            Err(_) => defaults.request_timeout_seconds,
        };

        Ok(Self {
            host,
            port,
            output_dir,
            app_username,
            request_timeout_seconds,
            ..Self::default()
        })
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(Error::from)?;

        if self.app_username == self.admin_user {
            return Err(Error::config(format!(
                "Application user must differ from the administrative user '{}'",
                self.admin_user
            )));
        }

        if self.retry.max_attempts == 0 {
            return Err(Error::config("Retry policy needs at least one attempt"));
        }

        Ok(())
    }

    /// Target address as `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Parameters for the first connection, using the default credential
    pub fn default_connect_params(&self) -> ConnectParams {
        ConnectParams::new(
            self.session_alias.clone(),
            self.host.clone(),
            self.port,
            self.admin_user.clone(),
            self.default_admin_password.clone(),
        )
    }
}
