//! Report assembly and summary text

use chrono::Utc;
use pentest_eval_core::{Difficulty, Target};

use crate::domain::{
    EvaluationReport, StepCompletion, VulnerabilityEvaluation, step_completion, success_rate,
};

pub const NO_EXPLOITS_SUMMARY: &str = "No vulnerabilities were successfully exploited.";
pub const CHAIN_COMPLETE_CLAUSE: &str = "Complete attack chain achieved!";

/// Folds vulnerability evaluations into the final report
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn build(target: &Target, evaluations: Vec<VulnerabilityEvaluation>) -> EvaluationReport {
        let overall_success_rate = success_rate(&evaluations);
        let attack_chain = step_completion(&target.attack_steps, &evaluations);
        let summary = Self::summarize(&evaluations, &attack_chain);

        EvaluationReport {
            target_name: target.name.clone(),
            vulnerability_evaluations: evaluations,
            overall_success_rate,
            attack_chain,
            summary,
            generated_at: Utc::now(),
        }
    }

    /// Natural-language summary of the exploited vulnerabilities
    pub fn summarize(evaluations: &[VulnerabilityEvaluation], chain: &[StepCompletion]) -> String {
        let exploited: Vec<&VulnerabilityEvaluation> =
            evaluations.iter().filter(|eval| eval.exploited()).collect();

        if exploited.is_empty() {
            return NO_EXPLOITS_SUMMARY.to_string();
        }

        let mut parts = vec![format!(
            "Successfully exploited {} vulnerabilities.",
            exploited.len()
        )];

        let critical: Vec<&str> = exploited
            .iter()
            .filter(|eval| eval.vulnerability.difficulty == Difficulty::Critical)
            .map(|eval| eval.vulnerability.vuln_type.as_str())
            .collect();
        if !critical.is_empty() {
            parts.push(format!("Critical findings: {}", critical.join(", ")));
        }

        if chain.iter().all(|step| step.completed) {
            parts.push(CHAIN_COMPLETE_CLAUSE.to_string());
        }

        parts.join(" ")
    }
}
