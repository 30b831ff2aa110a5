//! Indicator evaluation

use pentest_eval_core::SuccessIndicator;
use tracing::debug;

use super::pattern_matcher::PatternMatcher;
use crate::domain::EvaluationResult;

/// Pattern reasonings kept in an indicator's reasoning
pub const DEFAULT_MAX_REASONING_PARTS: usize = 3;

/// Runs every pattern of an indicator and combines the outcomes
#[derive(Clone)]
pub struct IndicatorEvaluator {
    matcher: PatternMatcher,
    max_reasoning_parts: usize,
}

impl IndicatorEvaluator {
    pub fn new(matcher: PatternMatcher) -> Self {
        Self {
            matcher,
            max_reasoning_parts: DEFAULT_MAX_REASONING_PARTS,
        }
    }

    pub fn with_max_reasoning_parts(mut self, parts: usize) -> Self {
        self.max_reasoning_parts = parts;
        self
    }

    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// Patterns are evaluated in order and combined with AND (`require_all`) or
    /// OR. An indicator without patterns therefore succeeds under AND and fails
    /// under OR.
    pub async fn evaluate_indicator(
        &self,
        indicator: &SuccessIndicator,
        log: &str,
    ) -> EvaluationResult {
        let mut outcomes = Vec::with_capacity(indicator.patterns.len());
        for pattern in &indicator.patterns {
            outcomes.push(
                self.matcher
                    .evaluate_pattern(pattern, log, indicator.context_hint_str())
                    .await,
            );
        }

        let success = if indicator.require_all {
            outcomes.iter().all(|outcome| outcome.success)
        } else {
            outcomes.iter().any(|outcome| outcome.success)
        };

        let reasoning = outcomes
            .iter()
            .take(self.max_reasoning_parts)
            .map(|outcome| outcome.reasoning.as_str())
            .collect::<Vec<_>>()
            .join(" | ");

        debug!(
            indicator = %indicator.name,
            require_all = indicator.require_all,
            patterns = outcomes.len(),
            success,
            "Indicator evaluated"
        );

        EvaluationResult::new(indicator.name.clone(), success, reasoning)
    }
}
