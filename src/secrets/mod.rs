//! Secret handling for the initialization procedure.
//!
//! - [`SecretString`] keeps passwords out of logs and zeroes them on drop
//! - [`generate_password`] draws passwords from the OS random source
//! - [`SecretSink`] persists finished [`CredentialRecord`]s; the shipped
//!   [`PlaintextFileSink`] writes them to local files
//!
//! # Security Considerations
//!
//! The plaintext files are meant to be read once and deleted by the operator.
//! Nothing here restricts their permissions.

pub mod error;
pub mod password;
pub mod sink;
pub mod types;

pub use error::{Result, SecretsError};
pub use password::{
    character_classes, generate_password, is_from_alphabet, ADMIN_PASSWORD_LENGTH, ALPHABET,
    APP_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use sink::{
    CredentialKind, CredentialRecord, PlaintextFileSink, SecretSink, ADMIN_PASSWORD_FILE,
    APP_CREDENTIALS_FILE,
};
pub use types::SecretString;
