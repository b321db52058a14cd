//! # milvus-secure-init
//!
//! One-shot hardening for a freshly deployed Milvus instance. The tool waits
//! for the server to accept the shipped `root` credential, rotates it to a
//! generated password, creates a lower-privilege application user, and writes
//! both credentials to local files for the operator.
//!
//! ## Architecture
//!
//! ```text
//! cli → config ─┐
//!               ├→ bootstrap::Bootstrapper ─→ service::AdminApi   (Milvus REST)
//!               │                          └→ secrets::SecretSink (plaintext files)
//! observability ┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use milvus_secure_init::{
//!     bootstrap::Bootstrapper, secrets::PlaintextFileSink, service::MilvusRestClient,
//!     InitConfig,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = InitConfig::from_env()?;
//! config.validate()?;
//! let client = MilvusRestClient::new(config.request_timeout())?;
//! let sink = PlaintextFileSink::new(config.output_dir.clone());
//! Bootstrapper::new(config, client, sink).run(&mut std::io::stdout()).await?;
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;
pub mod service;

// Re-export commonly used types and traits
pub use bootstrap::{BootstrapOutcome, Bootstrapper};
pub use config::InitConfig;
pub use errors::{Error, Result};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
