//! # Command Line Interface
//!
//! Resolves configuration (flag, then environment, then default), installs
//! logging, and runs the initialization procedure against the Milvus REST API
//! with plaintext credential files as output.

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::bootstrap::{BootstrapOutcome, Bootstrapper};
use crate::config::InitConfig;
use crate::observability::{init_logging, LoggingOptions};
use crate::secrets::PlaintextFileSink;
use crate::service::MilvusRestClient;

#[derive(Parser, Debug)]
#[command(name = "milvus-secure-init")]
#[command(about = "Rotate the default Milvus root password and provision an application user")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Milvus host (overrides MILVUS_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Milvus port (overrides MILVUS_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory the credential files are written to (overrides MILVUS_INIT_OUTPUT_DIR)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Name of the application user to create (overrides MILVUS_INIT_APP_USER)
    #[arg(long)]
    pub app_user: Option<String>,

    /// Per-request timeout in seconds (overrides MILVUS_INIT_REQUEST_TIMEOUT)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl Cli {
    /// Apply command line overrides on top of `config`.
    pub fn apply_overrides(&self, mut config: InitConfig) -> InitConfig {
        if let Some(host) = &self.host {
            debug!("Using host from --host flag: {}", host);
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            debug!("Using port from --port flag: {}", port);
            config.port = port;
        }
        if let Some(dir) = &self.output_dir {
            debug!("Using output directory from --output-dir flag: {}", dir.display());
            config.output_dir = dir.clone();
        }
        if let Some(user) = &self.app_user {
            debug!("Using application user from --app-user flag: {}", user);
            config.app_username = user.clone();
        }
        if let Some(timeout) = self.timeout {
            debug!("Using timeout from --timeout flag: {} seconds", timeout);
            config.request_timeout_seconds = timeout;
        }
        config
    }

    pub fn logging_options(&self) -> LoggingOptions {
        LoggingOptions { verbose: self.verbose, json: self.json_logs }
    }
}

/// Run CLI commands
pub async fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.logging_options());

    let config = cli.apply_overrides(InitConfig::from_env()?);

    let mut stdout = std::io::stdout();
    run(config, &mut stdout).await?;
    Ok(())
}

/// Validate `config` and run the procedure with the production client and sink.
pub async fn run<W: Write>(config: InitConfig, out: &mut W) -> anyhow::Result<BootstrapOutcome> {
    config.validate().context("Invalid configuration")?;

    let client =
        MilvusRestClient::new(config.request_timeout()).context("Failed to create Milvus client")?;
    let sink = PlaintextFileSink::new(config.output_dir.clone());

    let bootstrapper = Bootstrapper::new(config, client, sink);
    let outcome = bootstrapper.run(out).await?;
    Ok(outcome)
}
