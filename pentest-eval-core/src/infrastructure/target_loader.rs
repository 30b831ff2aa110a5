//! Target definition loader
//!
//! Reads a [`Target`] from a TOML or JSON file and validates it before handing
//! it to the evaluation engine.

use std::path::Path;

use tracing::{debug, info};

use crate::domain::target::{Target, TargetError};

/// Supported target definition formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    Json,
    Toml,
}

impl TargetFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Error loading a target definition
#[derive(Debug, thiserror::Error)]
pub enum TargetLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported target format: {0}")]
    UnsupportedFormat(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid target definition: {0}")]
    Invalid(#[from] TargetError),
}

/// Load and validate a target definition from disk
pub fn load_target(path: &Path) -> Result<Target, TargetLoadError> {
    let format = TargetFormat::from_path(path).ok_or_else(|| {
        TargetLoadError::UnsupportedFormat(format!(
            "{} (only .toml and .json are supported)",
            path.display()
        ))
    })?;

    let content = std::fs::read_to_string(path)?;
    let target = parse_target(&content, format)?;

    info!(
        target_name = %target.name,
        vulnerabilities = target.vulnerabilities.len(),
        steps = target.attack_steps.len(),
        path = %path.display(),
        "Loaded target definition"
    );

    Ok(target)
}

/// Parse and validate a target definition from a string
pub fn parse_target(content: &str, format: TargetFormat) -> Result<Target, TargetLoadError> {
    let target: Target = match format {
        TargetFormat::Json => serde_json::from_str(content)
            .map_err(|e| TargetLoadError::Parse(format!("JSON parse error: {}", e)))?,
        TargetFormat::Toml => toml::from_str(content)
            .map_err(|e| TargetLoadError::Parse(format!("TOML parse error: {}", e)))?,
    };

    target.validate()?;
    debug!(target_name = %target.name, "Target definition validated");

    Ok(target)
}
