//! Evaluate Command - score a log against a target definition

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pentest_eval_core::config::Validate;
use pentest_eval_core::load_target;
use pentest_eval_llm::LlmError;
use tracing::info;

use crate::app::create_app;
use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::Cli;

/// Arguments for the evaluate command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Target definition (.json or .toml)
    #[arg(short, long)]
    pub target: PathBuf,

    /// Execution log to evaluate
    #[arg(short, long)]
    pub log: PathBuf,

    /// Model provider override (ollama, anthropic, none)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model name override
    #[arg(long)]
    pub model: Option<String>,

    /// Check the model backend is reachable before evaluating
    #[arg(long)]
    pub check_backend: bool,
}

pub async fn run(ctx: &CliContext, _cli: &Cli, args: &EvaluateArgs) -> Result<i32> {
    let mut config = ctx.config.clone();
    if let Some(provider) = &args.provider {
        config.llm.provider = provider.clone();
    }
    if let Some(model) = &args.model {
        config.llm.model = Some(model.clone());
    }
    if let Err(e) = config.llm.validate() {
        ctx.output.error(&e.to_string());
        return Ok(exit_codes::CONFIG_ERROR);
    }

    let target = match load_target(&args.target) {
        Ok(target) => target,
        Err(e) => {
            ctx.output.error(&format!("{}: {}", args.target.display(), e));
            return Ok(exit_codes::INPUT_ERROR);
        }
    };

    let log = match tokio::fs::read_to_string(&args.log).await {
        Ok(log) => log,
        Err(e) => {
            ctx.output
                .error(&format!("Failed to read log {}: {}", args.log.display(), e));
            return Ok(exit_codes::INPUT_ERROR);
        }
    };

    let app = match create_app(&config, args.check_backend).await {
        Ok(app) => app,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(match e {
                LlmError::Configuration(_) | LlmError::ProviderNotFound(_) => {
                    exit_codes::CONFIG_ERROR
                }
                _ => exit_codes::BACKEND_UNAVAILABLE,
            });
        }
    };

    ctx.output.info(&format!(
        "Evaluating {} ({} characters) against {} using {}",
        args.log.display(),
        log.chars().count(),
        target.name,
        app.backend.as_deref().unwrap_or("deterministic matching only")
    ));

    let report = app.evaluator.execute(&target, &log).await;
    info!(
        target_name = %report.target_name,
        exploited = report.exploited_count(),
        "Report ready"
    );

    ctx.output.report(&report)?;
    Ok(exit_codes::SUCCESS)
}
