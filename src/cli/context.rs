//! CLI Context - configuration and output shared by all commands

use anyhow::{Context, Result};
use pentest_eval_core::logging::LoggingError;
use pentest_eval_core::{Config, init_tracing};

use crate::cli::Cli;
use crate::cli::output::OutputWriter;

/// Per-invocation context built from parsed arguments
pub struct CliContext {
    /// Layered configuration (files, environment, then CLI flags)
    pub config: Config,

    /// Output writer configured based on CLI flags
    pub output: OutputWriter,
}

impl CliContext {
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = Config::load_from(cli.config.as_deref()).with_context(|| {
            format!(
                "Failed to load configuration{}",
                cli.config
                    .as_ref()
                    .map(|p| format!(" from {}", p.display()))
                    .unwrap_or_default()
            )
        })?;

        if cli.verbose {
            config.logging.level = "debug".to_string();
        } else if cli.quiet {
            config.logging.level = "error".to_string();
        }

        match init_tracing(&config.logging) {
            // A subscriber installed earlier in this process keeps logging
            Ok(()) | Err(LoggingError::Install(_)) => {}
            Err(e) => return Err(e).context("Failed to initialise logging"),
        }

        Ok(Self {
            output: OutputWriter::new(cli.format, cli.quiet),
            config,
        })
    }
}
