//! Penetration-test log evaluation engine
//!
//! Scores an execution log against a [`Target`](pentest_eval_core::Target):
//!
//! - [`PatternMatcher`] decides single literal, regex or model-assisted patterns
//! - [`IndicatorEvaluator`] combines an indicator's patterns with AND/OR
//! - [`domain::is_exploited`] derives a vulnerability verdict from its indicators
//! - [`domain::step_completion`] and [`domain::success_rate`] roll verdicts up the attack chain
//! - [`ReportBuilder`] assembles the [`EvaluationReport`] and its summary
//!
//! [`EvaluateTargetUseCase`] drives the whole pipeline. Model failures never
//! abort a run; they show up as failed patterns with explanatory reasoning.
//!
//! ```rust,ignore
//! use pentest_eval_engine::EvaluateTargetUseCase;
//!
//! let backend = pentest_eval_llm::build_backend(&config.llm)?;
//! let report = EvaluateTargetUseCase::new(backend, &config.evaluation)
//!     .execute(&target, &log)
//!     .await;
//! println!("{}", report.summary);
//! ```

pub mod application;
pub mod domain;

pub use application::{
    EvaluateTargetUseCase, IndicatorEvaluator, PatternMatcher, PatternOutcome, ReportBuilder,
};
pub use domain::{EvaluationReport, EvaluationResult, StepCompletion, VulnerabilityEvaluation};
