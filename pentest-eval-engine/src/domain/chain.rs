//! Attack chain roll-up

use pentest_eval_core::AttackStep;

use super::results::{StepCompletion, VulnerabilityEvaluation};

/// Exploited over evaluated vulnerabilities, 0.0 when nothing was evaluated
pub fn success_rate(evaluations: &[VulnerabilityEvaluation]) -> f64 {
    if evaluations.is_empty() {
        return 0.0;
    }
    let exploited = evaluations.iter().filter(|eval| eval.exploited()).count();
    exploited as f64 / evaluations.len() as f64
}

/// Per-step completion, in step order
///
/// A step is completed when any evaluated vulnerability it references was
/// exploited. References to vulnerabilities that were not evaluated count as
/// not exploited.
pub fn step_completion(
    steps: &[AttackStep],
    evaluations: &[VulnerabilityEvaluation],
) -> Vec<StepCompletion> {
    steps
        .iter()
        .map(|step| StepCompletion {
            step_id: step.step_id.clone(),
            completed: evaluations
                .iter()
                .filter(|eval| step.references(&eval.vulnerability.id))
                .any(VulnerabilityEvaluation::exploited),
        })
        .collect()
}
