//! Use case for scoring a penetration-test log against a target definition

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use pentest_eval_core::config::EvaluationConfig;
use pentest_eval_core::{Target, Vulnerability};
use pentest_eval_llm::ModelBackend;
use tracing::{debug, info};

use crate::application::indicator_evaluator::IndicatorEvaluator;
use crate::application::pattern_matcher::PatternMatcher;
use crate::application::report_builder::ReportBuilder;
use crate::domain::{EvaluationReport, VulnerabilityEvaluation};

/// Evaluates every vulnerability of a target and assembles the report
///
/// Vulnerabilities may be evaluated concurrently (bounded by
/// `max_concurrent_vulnerabilities`), but evaluations are always reported in
/// catalog order. Indicators and patterns within a vulnerability run in
/// declaration order.
pub struct EvaluateTargetUseCase {
    indicators: IndicatorEvaluator,
    max_concurrent: usize,
}

impl EvaluateTargetUseCase {
    pub fn new(backend: Option<Arc<dyn ModelBackend>>, config: &EvaluationConfig) -> Self {
        let matcher =
            PatternMatcher::new(backend).with_preview_chars(config.reasoning_preview_chars);
        let indicators =
            IndicatorEvaluator::new(matcher).with_max_reasoning_parts(config.max_reasoning_parts);

        Self {
            indicators,
            max_concurrent: config.max_concurrent_vulnerabilities.max(1),
        }
    }

    /// Use case with default tuning
    pub fn with_backend(backend: Option<Arc<dyn ModelBackend>>) -> Self {
        Self::new(backend, &EvaluationConfig::default())
    }

    /// Score `log` against `target`; backend failures lower verdicts instead of failing
    pub async fn execute(&self, target: &Target, log: &str) -> EvaluationReport {
        let vulnerabilities = target.all_vulnerabilities();

        info!(
            target_name = %target.name,
            vulnerabilities = vulnerabilities.len(),
            steps = target.attack_steps.len(),
            log_chars = log.len(),
            model_backend = self.indicators.matcher().has_backend(),
            "Starting target evaluation"
        );

        let evaluations: Vec<VulnerabilityEvaluation> = stream::iter(
            vulnerabilities
                .into_iter()
                .map(|vuln| self.evaluate_vulnerability(vuln, log)),
        )
        .buffered(self.max_concurrent)
        .collect()
        .await;

        let report = ReportBuilder::build(target, evaluations);

        info!(
            target_name = %report.target_name,
            exploited = report.exploited_count(),
            success_rate = report.overall_success_rate,
            chain_complete = report.chain_complete(),
            "Target evaluation complete"
        );

        report
    }

    async fn evaluate_vulnerability(&self, vuln: &Vulnerability, log: &str) -> VulnerabilityEvaluation {
        debug!(
            vulnerability = %vuln.id,
            indicators = vuln.success_indicators.len(),
            "Evaluating vulnerability"
        );

        let mut results = Vec::with_capacity(vuln.success_indicators.len());
        for indicator in &vuln.success_indicators {
            results.push(self.indicators.evaluate_indicator(indicator, log).await);
        }

        let evaluation = VulnerabilityEvaluation::new(vuln.clone(), results);
        info!(
            vulnerability = %vuln.id,
            vuln_type = vuln.vuln_type.as_str(),
            location = %vuln.location,
            exploited = evaluation.exploited(),
            "Vulnerability evaluated"
        );
        evaluation
    }
}
