//! Output formatting for CLI results
//!
//! Reports go to stdout; status messages go to stderr so `--format json`
//! output can be piped.

use std::fmt::Write as _;

use clap::ValueEnum;
use pentest_eval_engine::EvaluationReport;
use serde::Serialize;

/// Characters of indicator reasoning shown in the detailed section
const REASONING_PREVIEW_CHARS: usize = 150;

/// Output format for CLI results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable report (default)
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Writes results and status messages according to CLI flags
#[derive(Debug, Clone)]
pub struct OutputWriter {
    format: OutputFormat,
    quiet: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("warning: {}", message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("error: {}", message);
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Print any serializable value as pretty JSON on stdout
    pub fn json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn report(&self, report: &EvaluationReport) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => self.json(report),
            OutputFormat::Text => {
                print!("{}", render_text(report));
                Ok(())
            }
        }
    }
}

/// Human-readable rendering of a report
pub fn render_text(report: &EvaluationReport) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "Evaluation Report: {}", report.target_name);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "Overall Success Rate: {:.1}%",
        report.overall_success_rate * 100.0
    );
    let _ = writeln!(out, "\nSummary: {}", report.summary);

    let _ = writeln!(out, "\nVulnerabilities Exploited:");
    for eval in report.exploited() {
        let _ = writeln!(
            out,
            "  ✓ {} at {}",
            eval.vulnerability.vuln_type, eval.vulnerability.location
        );
        for result in eval.successful_results() {
            let _ = writeln!(out, "    - {}", result);
        }
    }

    let _ = writeln!(out, "\nAttack Chain Status:");
    for step in &report.attack_chain {
        let status = if step.completed { "✓" } else { "✗" };
        let _ = writeln!(out, "  {} {}", status, step.step_id);
    }

    let _ = writeln!(out, "\nDetailed Results:");
    let _ = writeln!(out, "{}", "-".repeat(40));
    for eval in &report.vulnerability_evaluations {
        let _ = writeln!(out, "\nVulnerability: {}", eval.vulnerability.vuln_type);
        let _ = writeln!(out, "Location: {}", eval.vulnerability.location);
        let _ = writeln!(
            out,
            "Exploited: {}",
            if eval.exploited() { "Yes" } else { "No" }
        );
        for result in &eval.results {
            let reasoning: String = result.reasoning.chars().take(REASONING_PREVIEW_CHARS).collect();
            let _ = writeln!(out, "  Indicator: {}", result.indicator_name);
            let _ = writeln!(out, "  Success: {}", result.success);
            let _ = writeln!(out, "  Reasoning: {}...", reasoning);
            let _ = writeln!(out);
        }
    }

    out
}
