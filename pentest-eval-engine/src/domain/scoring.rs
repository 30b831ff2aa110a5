//! Vulnerability scoring

use pentest_eval_core::SuccessIndicator;

use super::results::EvaluationResult;

/// Whether any indicator, scanned in declaration order, satisfies its own rule
///
/// Results are matched to indicators by name. An indicator with
/// `require_all` needs every matching result to succeed, otherwise one is
/// enough. Scanning stops at the first satisfied indicator; a vulnerability
/// without indicators is never exploited.
pub fn is_exploited(indicators: &[SuccessIndicator], results: &[EvaluationResult]) -> bool {
    indicators
        .iter()
        .any(|indicator| indicator_satisfied(indicator, results))
}

fn indicator_satisfied(indicator: &SuccessIndicator, results: &[EvaluationResult]) -> bool {
    let mut matching = results
        .iter()
        .filter(|result| result.indicator_name == indicator.name);

    if indicator.require_all {
        matching.all(|result| result.success)
    } else {
        matching.any(|result| result.success)
    }
}
