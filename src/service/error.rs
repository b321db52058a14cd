//! Errors reported by the Milvus administrative API.

use thiserror::Error;

/// Result type for administrative API calls.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur while talking to the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request never produced a response (refused, reset, timed out).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The service answered with a non-success HTTP status.
    #[error("HTTP request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    /// The service answered but refused the operation.
    #[error("Request rejected (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// The response body was not the expected envelope.
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// No session was opened under the given alias.
    #[error("No open session with alias '{alias}'")]
    UnknownSession { alias: String },

    /// The HTTP client itself could not be built.
    #[error("Client error: {message}")]
    Client { message: String },
}

impl ServiceError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into() }
    }

    pub fn rejected(code: i64, message: impl Into<String>) -> Self {
        Self::Rejected { code, message: message.into() }
    }

    pub fn unknown_session(alias: impl Into<String>) -> Self {
        Self::UnknownSession { alias: alias.into() }
    }

    pub fn client(message: impl Into<String>) -> Self {
        Self::Client { message: message.into() }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Http { status: status.as_u16(), body: err.to_string() },
            None => Self::Transport { message: err.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_constructors() {
        let err = ServiceError::rejected(1800, "user hasn't authenticated");
        assert!(matches!(err, ServiceError::Rejected { code: 1800, .. }));
        assert_eq!(err.to_string(), "Request rejected (code 1800): user hasn't authenticated");

        let err = ServiceError::unknown_session("default");
        assert!(err.to_string().contains("default"));

        let err = ServiceError::transport("connection refused");
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }
}
