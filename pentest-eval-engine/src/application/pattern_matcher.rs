//! Pattern matching strategies

use std::sync::Arc;

use pentest_eval_core::{MatchType, Pattern};
use pentest_eval_llm::prompts::PromptBuilder;
use pentest_eval_llm::{ModelBackend, ResponseParser};
use regex::RegexBuilder;
use tracing::{debug, warn};

/// Characters of a raw model response kept when it has no `REASONING:` line
pub const DEFAULT_PREVIEW_CHARS: usize = 300;

/// Verdict for a single pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternOutcome {
    pub success: bool,
    pub reasoning: String,
}

impl PatternOutcome {
    fn new(success: bool, reasoning: impl Into<String>) -> Self {
        Self {
            success,
            reasoning: reasoning.into(),
        }
    }
}

/// Evaluates one pattern against log text
///
/// Literal and regex patterns are matched locally. Model-assisted patterns are
/// delegated to the configured [`ModelBackend`]; without one, or when the call
/// fails, the pattern is reported as not detected and the reasoning says why.
/// No failure escapes this type.
#[derive(Clone)]
pub struct PatternMatcher {
    backend: Option<Arc<dyn ModelBackend>>,
    preview_chars: usize,
}

impl PatternMatcher {
    pub fn new(backend: Option<Arc<dyn ModelBackend>>) -> Self {
        Self {
            backend,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }

    /// Matcher that only handles literal and regex patterns
    pub fn deterministic() -> Self {
        Self::new(None)
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn evaluate_pattern(
        &self,
        pattern: &Pattern,
        log: &str,
        context_hint: &str,
    ) -> PatternOutcome {
        let outcome = match pattern.match_type {
            MatchType::Literal => Self::match_literal(&pattern.value, log),
            MatchType::Regex => Self::match_regex(&pattern.value, log),
            MatchType::ModelAssisted => self.match_with_model(&pattern.value, log, context_hint).await,
            MatchType::Unknown => PatternOutcome::new(false, "Unknown pattern type"),
        };

        debug!(
            match_type = pattern.match_type.as_str(),
            success = outcome.success,
            "Pattern evaluated"
        );
        outcome
    }

    pub fn match_literal(value: &str, log: &str) -> PatternOutcome {
        if log.contains(value) {
            PatternOutcome::new(true, format!("Exact string '{}' found", value))
        } else {
            PatternOutcome::new(false, format!("Exact string '{}' not found", value))
        }
    }

    /// Case-insensitive, with `^`/`$` anchoring per line
    pub fn match_regex(source: &str, log: &str) -> PatternOutcome {
        let regex = match RegexBuilder::new(source)
            .case_insensitive(true)
            .multi_line(true)
            .build()
        {
            Ok(regex) => regex,
            Err(e) => {
                warn!(pattern = source, error = %e, "Invalid regex pattern");
                return PatternOutcome::new(false, format!("Invalid regex '{}': {}", source, e));
            }
        };

        let count = regex.find_iter(log).count();
        if count > 0 {
            PatternOutcome::new(
                true,
                format!("Regex pattern '{}' matched {} time(s)", source, count),
            )
        } else {
            PatternOutcome::new(false, format!("Regex pattern '{}' not found", source))
        }
    }

    async fn match_with_model(&self, description: &str, log: &str, context_hint: &str) -> PatternOutcome {
        let Some(backend) = &self.backend else {
            return PatternOutcome::new(false, "model backend not configured");
        };

        let prompt = PromptBuilder::build_pattern_prompt(description, context_hint, log);

        match backend.evaluate(&prompt).await {
            Ok(response) => {
                let verdict = ResponseParser::parse_detection(&response, self.preview_chars);
                PatternOutcome::new(verdict.detected, verdict.reasoning)
            }
            Err(e) => {
                warn!(
                    backend = %backend.describe(),
                    error = %e,
                    "Model backend call failed; pattern treated as not detected"
                );
                PatternOutcome::new(false, format!("backend error: {}", e))
            }
        }
    }
}
