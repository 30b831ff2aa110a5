//! Validate-target Command - check a target definition without evaluating

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use pentest_eval_core::{MatchType, Target, load_target};
use serde::Serialize;

use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;
use crate::cli::Cli;

/// Arguments for the validate-target command
#[derive(Args, Debug)]
pub struct ValidateTargetArgs {
    /// Target definition (.json or .toml)
    pub path: PathBuf,
}

/// Shape of a valid target definition
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TargetOverview {
    pub name: String,
    pub vulnerabilities: usize,
    pub indicators: usize,
    pub patterns: usize,
    pub model_assisted_patterns: usize,
    /// Patterns with an unrecognised type; they never match
    pub unknown_patterns: usize,
    pub attack_steps: usize,
}

impl TargetOverview {
    pub fn of(target: &Target) -> Self {
        let indicators = || {
            target
                .vulnerabilities
                .iter()
                .flat_map(|vuln| &vuln.success_indicators)
        };
        let patterns = || indicators().flat_map(|indicator| &indicator.patterns);

        Self {
            name: target.name.clone(),
            vulnerabilities: target.vulnerabilities.len(),
            indicators: indicators().count(),
            patterns: patterns().count(),
            model_assisted_patterns: patterns()
                .filter(|p| p.match_type == MatchType::ModelAssisted)
                .count(),
            unknown_patterns: patterns()
                .filter(|p| p.match_type == MatchType::Unknown)
                .count(),
            attack_steps: target.attack_steps.len(),
        }
    }
}

pub async fn run(ctx: &CliContext, _cli: &Cli, args: &ValidateTargetArgs) -> Result<i32> {
    let target = match load_target(&args.path) {
        Ok(target) => target,
        Err(e) => {
            ctx.output.error(&format!("{}: {}", args.path.display(), e));
            return Ok(exit_codes::INPUT_ERROR);
        }
    };

    let overview = TargetOverview::of(&target);

    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&overview)?,
        OutputFormat::Text => {
            println!("Target: {}", overview.name);
            println!("  Vulnerabilities: {}", overview.vulnerabilities);
            println!("  Success indicators: {}", overview.indicators);
            println!(
                "  Patterns: {} ({} model-assisted)",
                overview.patterns, overview.model_assisted_patterns
            );
            println!("  Attack steps: {}", overview.attack_steps);
        }
    }

    if overview.unknown_patterns > 0 {
        ctx.output.warn(&format!(
            "{} pattern(s) have an unknown type and will never match",
            overview.unknown_patterns
        ));
    }
    ctx.output.success(&format!("{} is valid", args.path.display()));

    Ok(exit_codes::SUCCESS)
}
