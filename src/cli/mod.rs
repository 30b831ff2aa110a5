//! pentest-eval CLI - score penetration-test logs from the command line
//!
//! ## Commands
//! - `evaluate`: score a log against a target definition
//! - `validate-target`: check a target definition file without evaluating anything

mod commands;
mod context;
mod output;

pub use context::CliContext;
pub use output::{OutputFormat, OutputWriter, render_text};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pentest-eval - score penetration-test logs against target definitions
#[derive(Parser, Debug)]
#[command(
    name = "pentest-eval",
    version,
    about = "Score penetration-test logs against declarative target definitions",
    long_about = "Evaluates an execution log against a target definition (vulnerabilities, \
                  success indicators and attack steps) using literal, regex and \
                  model-assisted pattern matching.\n\n\
                  Model backends are configured under [llm] in config/default.toml or via \
                  PENTEST_EVAL__LLM__* environment variables."
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors and the report itself
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path (layered above config/default and config/local)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a log against a target definition
    #[command(visible_alias = "e")]
    Evaluate(commands::evaluate::EvaluateArgs),

    /// Validate a target definition file
    #[command(visible_alias = "v")]
    ValidateTarget(commands::validate::ValidateTargetArgs),
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
    context: CliContext,
}

impl CliApp {
    /// Parse process arguments and set up the context
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> anyhow::Result<Self> {
        let context = CliContext::new(&cli)?;
        Ok(Self { cli, context })
    }

    /// Run the selected command and return the process exit code
    pub async fn run(self) -> anyhow::Result<i32> {
        match self.cli.command {
            Commands::Evaluate(ref args) => {
                commands::evaluate::run(&self.context, &self.cli, args).await
            }
            Commands::ValidateTarget(ref args) => {
                commands::validate::run(&self.context, &self.cli, args).await
            }
        }
    }
}

/// Exit codes for scripted use
pub mod exit_codes {
    /// Evaluation or validation completed
    pub const SUCCESS: i32 = 0;
    /// Configuration error (unknown provider, missing API key, bad config file)
    pub const CONFIG_ERROR: i32 = 2;
    /// Target definition or log could not be read or is invalid
    pub const INPUT_ERROR: i32 = 3;
    /// Model backend failed its health check
    pub const BACKEND_UNAVAILABLE: i32 = 4;
}
