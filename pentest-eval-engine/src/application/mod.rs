//! Evaluation pipeline: pattern matching up to report assembly

pub mod indicator_evaluator;
pub mod pattern_matcher;
pub mod report_builder;
pub mod use_cases;

pub use indicator_evaluator::IndicatorEvaluator;
pub use pattern_matcher::{PatternMatcher, PatternOutcome};
pub use report_builder::ReportBuilder;
pub use use_cases::EvaluateTargetUseCase;
