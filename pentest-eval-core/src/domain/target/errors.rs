//! Target definition errors

/// A target definition that cannot be evaluated consistently
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("Target name cannot be empty")]
    EmptyName,

    #[error("Vulnerability id cannot be empty (location: {location})")]
    EmptyVulnerabilityId { location: String },

    #[error("Duplicate vulnerability id: {0}")]
    DuplicateVulnerability(String),

    #[error("Duplicate attack step id: {0}")]
    DuplicateStep(String),

    #[error("Attack step '{step_id}' references unknown vulnerability '{vulnerability_id}'")]
    UnknownVulnerability {
        step_id: String,
        vulnerability_id: String,
    },

    #[error("Vulnerability '{vulnerability_id}' has an indicator without a name")]
    EmptyIndicatorName { vulnerability_id: String },
}
