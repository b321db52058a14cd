//! # Observability
//!
//! Logging setup for the binary. The library itself only emits `tracing`
//! events and spans; whoever embeds it decides where they go.

pub mod logging;

pub use logging::{init_logging, LoggingOptions};
