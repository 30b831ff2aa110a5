//! Evaluation results and the pure rules that derive verdicts from them

pub mod chain;
pub mod results;
pub mod scoring;

pub use chain::{step_completion, success_rate};
pub use results::{EvaluationReport, EvaluationResult, StepCompletion, VulnerabilityEvaluation};
pub use scoring::is_exploited;
