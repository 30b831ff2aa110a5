pub mod evaluate_target;

pub use evaluate_target::EvaluateTargetUseCase;
