//! Application wiring: configuration to a ready-to-run evaluator

use std::sync::Arc;

use pentest_eval_core::Config;
use pentest_eval_engine::EvaluateTargetUseCase;
use pentest_eval_llm::{LlmError, ModelBackend, build_backend};
use tracing::{info, warn};

/// Evaluator plus a description of the backend it was built with
pub struct AppHandle {
    pub evaluator: EvaluateTargetUseCase,
    /// `provider/model`, or `None` for deterministic-only runs
    pub backend: Option<String>,
}

/// Build the evaluator described by `config`
///
/// Unknown providers and missing credentials fail here, before any log is
/// evaluated. With `check_backend` (or `evaluation.check_backend_on_start`)
/// an unreachable backend fails here too.
pub async fn create_app(config: &Config, check_backend: bool) -> Result<AppHandle, LlmError> {
    let backend: Option<Arc<dyn ModelBackend>> = build_backend(&config.llm)?;
    let description = backend.as_ref().map(|b| b.describe());

    if let Some(backend) = &backend {
        if check_backend || config.evaluation.check_backend_on_start {
            info!(backend = %backend.describe(), "Checking model backend");
            backend.health_check().await.map_err(|e| {
                warn!(backend = %backend.describe(), error = %e, "Model backend health check failed");
                e
            })?;
        }
    } else {
        info!("Running without a model backend; model-assisted patterns will not match");
    }

    Ok(AppHandle {
        evaluator: EvaluateTargetUseCase::new(backend, &config.evaluation),
        backend: description,
    })
}
