//! Evaluation outputs

use std::fmt;

use chrono::{DateTime, Utc};
use pentest_eval_core::{SuccessIndicator, Vulnerability};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::scoring::is_exploited;

/// Outcome of one success indicator
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct EvaluationResult {
    pub indicator_name: String,
    pub success: bool,
    /// Evidence trail from the indicator's patterns
    pub reasoning: String,
}

impl EvaluationResult {
    pub fn new(indicator_name: impl Into<String>, success: bool, reasoning: impl Into<String>) -> Self {
        Self {
            indicator_name: indicator_name.into(),
            success,
            reasoning: reasoning.into(),
        }
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "✓" } else { "✗" };
        write!(f, "{} {}", status, self.indicator_name)
    }
}

/// A vulnerability together with the results of its indicators
///
/// `exploited` is derived from the current results every time it is asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct VulnerabilityEvaluation {
    pub vulnerability: Vulnerability,
    /// One result per indicator, in declaration order
    pub results: Vec<EvaluationResult>,
}

impl VulnerabilityEvaluation {
    pub fn new(vulnerability: Vulnerability, results: Vec<EvaluationResult>) -> Self {
        Self {
            vulnerability,
            results,
        }
    }

    pub fn exploited(&self) -> bool {
        is_exploited(&self.vulnerability.success_indicators, &self.results)
    }

    /// Results whose indicator succeeded
    pub fn successful_results(&self) -> impl Iterator<Item = &EvaluationResult> {
        self.results.iter().filter(|result| result.success)
    }

    pub fn indicators(&self) -> &[SuccessIndicator] {
        &self.vulnerability.success_indicators
    }
}

impl Serialize for VulnerabilityEvaluation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VulnerabilityEvaluation", 3)?;
        state.serialize_field("vulnerability", &self.vulnerability)?;
        state.serialize_field("exploited", &self.exploited())?;
        state.serialize_field("results", &self.results)?;
        state.end()
    }
}

/// Completion status of one attack step
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct StepCompletion {
    pub step_id: String,
    pub completed: bool,
}

/// Final output of an evaluation run
#[derive(Debug, Clone, serde::Serialize)]
pub struct EvaluationReport {
    pub target_name: String,
    pub vulnerability_evaluations: Vec<VulnerabilityEvaluation>,
    /// Exploited vulnerabilities over evaluated vulnerabilities, in [0, 1]
    pub overall_success_rate: f64,
    /// Attack steps in target order
    pub attack_chain: Vec<StepCompletion>,
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

impl EvaluationReport {
    pub fn exploited(&self) -> impl Iterator<Item = &VulnerabilityEvaluation> {
        self.vulnerability_evaluations
            .iter()
            .filter(|evaluation| evaluation.exploited())
    }

    pub fn exploited_count(&self) -> usize {
        self.exploited().count()
    }

    /// `None` when the target has no step with this id
    pub fn step_completed(&self, step_id: &str) -> Option<bool> {
        self.attack_chain
            .iter()
            .find(|step| step.step_id == step_id)
            .map(|step| step.completed)
    }

    pub fn chain_complete(&self) -> bool {
        self.attack_chain.iter().all(|step| step.completed)
    }
}
