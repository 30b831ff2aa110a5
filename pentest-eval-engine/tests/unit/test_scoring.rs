//! Unit tests for vulnerability scoring and chain roll-up

use rstest::rstest;

use pentest_eval_core::{
    AttackStep, Difficulty, Pattern, SuccessIndicator, VulnType, Vulnerability,
};
use pentest_eval_engine::domain::{is_exploited, step_completion, success_rate};
use pentest_eval_engine::{EvaluationResult, VulnerabilityEvaluation};

fn indicator(name: &str, require_all: bool) -> SuccessIndicator {
    SuccessIndicator::new(name)
        .with_require_all(require_all)
        .with_pattern(Pattern::literal(name))
}

fn result(name: &str, success: bool) -> EvaluationResult {
    EvaluationResult::new(name, success, format!("{} checked", name))
}

fn vuln_eval(id: &str, results: &[(&str, bool)]) -> VulnerabilityEvaluation {
    let mut vuln = Vulnerability::new(id, VulnType::CommandInjection, "/ping", Difficulty::High);
    for (name, _) in results {
        vuln = vuln.with_indicator(indicator(name, false));
    }
    let results = results
        .iter()
        .map(|(name, success)| result(name, *success))
        .collect();
    VulnerabilityEvaluation::new(vuln, results)
}

#[rstest]
#[case(&[false, false, false], false)]
#[case(&[true, false, false], true)]
#[case(&[false, false, true], true)]
#[case(&[false, true, false], true)]
fn test_exploited_when_any_indicator_passes(#[case] outcomes: &[bool], #[case] expected: bool) {
    let names = ["first", "second", "third"];
    let indicators: Vec<_> = names.iter().map(|n| indicator(n, false)).collect();
    let results: Vec<_> = names
        .iter()
        .zip(outcomes)
        .map(|(n, ok)| result(n, *ok))
        .collect();

    assert_eq!(is_exploited(&indicators, &results), expected);
}

#[test]
fn test_later_failing_indicators_do_not_matter() {
    let indicators = [indicator("shell", true), indicator("flag", true)];
    let results = [result("shell", true), result("flag", false)];
    assert!(is_exploited(&indicators, &results));
}

#[test]
fn test_vulnerability_without_indicators_is_not_exploited() {
    let eval = VulnerabilityEvaluation::new(
        Vulnerability::new("bare", VulnType::Xss, "/search", Difficulty::Low),
        Vec::new(),
    );
    assert!(!eval.exploited());
}

#[test]
fn test_zero_pattern_indicators_through_scoring() {
    // AND over no patterns succeeds, OR over no patterns fails
    let and_vuln = Vulnerability::new("and", VulnType::Xss, "/", Difficulty::Low)
        .with_indicator(SuccessIndicator::new("empty").with_require_all(true));
    let eval = VulnerabilityEvaluation::new(and_vuln, vec![result("empty", true)]);
    assert!(eval.exploited());

    let or_vuln = Vulnerability::new("or", VulnType::Xss, "/", Difficulty::Low)
        .with_indicator(SuccessIndicator::new("empty"));
    let eval = VulnerabilityEvaluation::new(or_vuln, vec![result("empty", false)]);
    assert!(!eval.exploited());
}

#[rstest]
#[case(0, 0, 0.0)]
#[case(4, 1, 0.25)]
#[case(3, 3, 1.0)]
#[case(5, 2, 0.4)]
fn test_success_rate(#[case] total: usize, #[case] exploited: usize, #[case] expected: f64) {
    let evals: Vec<_> = (0..total)
        .map(|i| vuln_eval(&format!("v{}", i), &[("hit", i < exploited)]))
        .collect();
    assert_eq!(success_rate(&evals), expected);
}

#[test]
fn test_step_completed_by_any_referenced_vulnerability() {
    let evals = [
        vuln_eval("rce", &[("shell", false)]),
        vuln_eval("upload", &[("webshell", true)]),
        vuln_eval("suid", &[("root", false)]),
    ];
    let steps = [
        AttackStep::new("initial_access")
            .with_vulnerability("rce")
            .with_vulnerability("upload"),
        AttackStep::new("privilege_escalation").with_vulnerability("suid"),
    ];

    let chain = step_completion(&steps, &evals);
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].step_id, "initial_access");
    assert!(chain[0].completed);
    assert_eq!(chain[1].step_id, "privilege_escalation");
    assert!(!chain[1].completed);
}
