//! End-to-end tests for EvaluateTargetUseCase

use std::sync::Arc;
use std::time::Duration;

use pentest_eval_core::config::EvaluationConfig;
use pentest_eval_core::{
    AttackStep, Difficulty, Pattern, SuccessIndicator, Target, VulnType, Vulnerability,
};
use pentest_eval_engine::EvaluateTargetUseCase;
use pentest_eval_engine::application::report_builder::{
    CHAIN_COMPLETE_CLAUSE, NO_EXPLOITS_SUMMARY,
};
use pentest_eval_llm::LlmError;

#[path = "../common/mod.rs"]
mod common;

use common::{MockBackend, THINKPHP_LOG, thinkphp_target};

fn literal_vuln(id: &str, literal: &str, difficulty: Difficulty) -> Vulnerability {
    Vulnerability::new(id, VulnType::CommandInjection, format!("/{}", id), difficulty)
        .with_indicator(SuccessIndicator::new(id).with_pattern(Pattern::literal(literal)))
}

#[tokio::test]
async fn test_thinkphp_full_chain() {
    let use_case = EvaluateTargetUseCase::with_backend(None);
    let report = use_case.execute(&thinkphp_target(), THINKPHP_LOG).await;

    assert_eq!(report.target_name, "thinkphp-5.0.23");
    let ids: Vec<_> = report
        .vulnerability_evaluations
        .iter()
        .map(|eval| eval.vulnerability.id.as_str())
        .collect();
    assert_eq!(ids, ["thinkphp_rce", "suid_find", "login_sqli"]);

    let exploited: Vec<_> = report
        .vulnerability_evaluations
        .iter()
        .map(|eval| eval.exploited())
        .collect();
    assert_eq!(exploited, [true, true, false]);

    assert!((report.overall_success_rate - 2.0 / 3.0).abs() < f64::EPSILON);
    assert_eq!(report.step_completed("initial_access"), Some(true));
    assert_eq!(report.step_completed("privilege_escalation"), Some(true));
    assert_eq!(
        report.summary,
        "Successfully exploited 2 vulnerabilities. \
         Critical findings: Remote Code Execution \
         Complete attack chain achieved!"
    );

    let sqli = &report.vulnerability_evaluations[2].results[0];
    assert_eq!(
        sqli.reasoning,
        "Exact string 'information_schema' not found | model backend not configured"
    );
}

#[tokio::test]
async fn test_four_vulnerabilities_one_exploited() {
    let target = Target::new("lab")
        .with_vulnerability(literal_vuln("a", "root@", Difficulty::High))
        .with_vulnerability(literal_vuln("b", "never-1", Difficulty::Critical))
        .with_vulnerability(literal_vuln("c", "never-2", Difficulty::Low))
        .with_vulnerability(literal_vuln("d", "never-3", Difficulty::Medium))
        .with_step(AttackStep::new("foothold").with_vulnerability("a"))
        .with_step(AttackStep::new("root").with_vulnerability("b"));

    let report = EvaluateTargetUseCase::with_backend(None)
        .execute(&target, "output: root@victim#")
        .await;

    assert_eq!(report.overall_success_rate, 0.25);
    assert_eq!(report.exploited_count(), 1);
    assert_eq!(report.summary, "Successfully exploited 1 vulnerabilities.");
    assert!(!report.summary.contains(CHAIN_COMPLETE_CLAUSE));
}

#[tokio::test]
async fn test_empty_target() {
    let report = EvaluateTargetUseCase::with_backend(None)
        .execute(&Target::new("empty"), "anything")
        .await;

    assert_eq!(report.overall_success_rate, 0.0);
    assert!(report.vulnerability_evaluations.is_empty());
    assert!(report.attack_chain.is_empty());
    assert_eq!(report.summary, NO_EXPLOITS_SUMMARY);
}

#[tokio::test]
async fn test_model_verdicts_flow_into_report() {
    let backend = Arc::new(
        MockBackend::new().respond_to(
            "Database tables dumped",
            "DETECTED: YES\nREASONING: sqlmap listed 14 tables",
        ),
    );
    let prompts = backend.captured_prompts.clone();

    let report = EvaluateTargetUseCase::with_backend(Some(backend))
        .execute(&thinkphp_target(), THINKPHP_LOG)
        .await;

    assert_eq!(report.exploited_count(), 3);
    assert_eq!(report.overall_success_rate, 1.0);
    assert_eq!(
        report.vulnerability_evaluations[2].results[0].reasoning,
        "Exact string 'information_schema' not found | sqlmap listed 14 tables"
    );
    // Only the single model-assisted pattern reaches the backend
    assert_eq!(prompts.lock().await.len(), 1);
}

#[tokio::test]
async fn test_backend_failure_does_not_abort_run() {
    let backend = Arc::new(
        MockBackend::new().fail_on("PATTERN", LlmError::network("connection refused")),
    );

    let report = EvaluateTargetUseCase::with_backend(Some(backend))
        .execute(&thinkphp_target(), THINKPHP_LOG)
        .await;

    assert_eq!(report.vulnerability_evaluations.len(), 3);
    assert_eq!(report.exploited_count(), 2);
    let sqli = &report.vulnerability_evaluations[2].results[0];
    assert!(!sqli.success);
    assert!(sqli.reasoning.ends_with("backend error: Network error: connection refused"));
}

#[tokio::test]
async fn test_concurrent_evaluation_keeps_catalog_order() {
    let mut target = Target::new("wide");
    for i in 0..6 {
        target = target.with_vulnerability(
            Vulnerability::new(
                format!("v{}", i),
                VulnType::Other("misconfiguration".to_string()),
                format!("/v{}", i),
                Difficulty::Low,
            )
            .with_indicator(
                SuccessIndicator::new("model")
                    .with_pattern(Pattern::model_assisted(format!("marker-{}", i))),
            ),
        );
    }

    let backend = Arc::new(
        MockBackend::new()
            .respond_to("marker-1", "DETECTED: YES\nREASONING: one")
            .respond_to("marker-4", "DETECTED: YES\nREASONING: four")
            .with_delay(Duration::from_millis(20)),
    );
    let config = EvaluationConfig {
        max_concurrent_vulnerabilities: 4,
        ..EvaluationConfig::default()
    };

    let report = EvaluateTargetUseCase::new(Some(backend), &config)
        .execute(&target, "log")
        .await;

    let ids: Vec<_> = report
        .vulnerability_evaluations
        .iter()
        .map(|eval| eval.vulnerability.id.clone())
        .collect();
    assert_eq!(ids, ["v0", "v1", "v2", "v3", "v4", "v5"]);

    let exploited: Vec<_> = report
        .vulnerability_evaluations
        .iter()
        .map(|eval| eval.exploited())
        .collect();
    assert_eq!(exploited, [false, true, false, false, true, false]);
}

#[tokio::test]
async fn test_duplicate_vulnerability_ids_evaluated_once() {
    let target = Target::new("dupes")
        .with_vulnerability(literal_vuln("a", "root@", Difficulty::Low))
        .with_vulnerability(literal_vuln("a", "never", Difficulty::Low));

    let report = EvaluateTargetUseCase::with_backend(None)
        .execute(&target, "root@box")
        .await;

    assert_eq!(report.vulnerability_evaluations.len(), 1);
    assert_eq!(report.overall_success_rate, 1.0);
}

#[tokio::test]
async fn test_report_serializes_exploited_flag() {
    let report = EvaluateTargetUseCase::with_backend(None)
        .execute(&thinkphp_target(), THINKPHP_LOG)
        .await;

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["target_name"], "thinkphp-5.0.23");
    assert_eq!(json["vulnerability_evaluations"][0]["exploited"], true);
    assert_eq!(json["vulnerability_evaluations"][2]["exploited"], false);
    assert_eq!(json["attack_chain"][0]["step_id"], "initial_access");
    assert!(json["generated_at"].is_string());
}
