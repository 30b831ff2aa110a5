//! Target entities

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::TargetError;
use super::value_objects::{Difficulty, MatchType, VulnType};

/// Atomic detection rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    /// Matching strategy
    pub match_type: MatchType,
    /// Literal text, regex source, or a description of what to detect
    pub value: String,
}

impl Pattern {
    pub fn new(match_type: MatchType, value: impl Into<String>) -> Self {
        Self {
            match_type,
            value: value.into(),
        }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::new(MatchType::Literal, value)
    }

    pub fn regex(value: impl Into<String>) -> Self {
        Self::new(MatchType::Regex, value)
    }

    pub fn model_assisted(description: impl Into<String>) -> Self {
        Self::new(MatchType::ModelAssisted, description)
    }
}

/// Named group of patterns that certifies a vulnerability was exploited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessIndicator {
    pub name: String,
    /// `true` combines pattern outcomes with AND, `false` with OR
    #[serde(default)]
    pub require_all: bool,
    /// Extra context handed to model-assisted patterns
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_hint: Option<String>,
    #[serde(default)]
    pub patterns: Vec<Pattern>,
}

impl SuccessIndicator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            require_all: false,
            context_hint: None,
            patterns: Vec::new(),
        }
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.patterns.push(pattern);
        self
    }

    pub fn with_require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    pub fn with_context_hint(mut self, hint: impl Into<String>) -> Self {
        self.context_hint = Some(hint.into());
        self
    }

    /// Context hint, or an empty string when none was given
    pub fn context_hint_str(&self) -> &str {
        self.context_hint.as_deref().unwrap_or("")
    }
}

/// A specific exploitable weakness in the target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    /// Stable identifier referenced by attack steps
    pub id: String,
    pub vuln_type: VulnType,
    pub location: String,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub success_indicators: Vec<SuccessIndicator>,
}

impl Vulnerability {
    pub fn new(
        id: impl Into<String>,
        vuln_type: VulnType,
        location: impl Into<String>,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            id: id.into(),
            vuln_type,
            location: location.into(),
            difficulty,
            description: None,
            success_indicators: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_indicator(mut self, indicator: SuccessIndicator) -> Self {
        self.success_indicators.push(indicator);
        self
    }
}

/// A stage of the attack chain, satisfied by exploiting any of its vulnerabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackStep {
    pub step_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ids of the vulnerabilities that satisfy this step
    #[serde(default)]
    pub vulnerabilities: Vec<String>,
}

impl AttackStep {
    pub fn new(step_id: impl Into<String>) -> Self {
        Self {
            step_id: step_id.into(),
            description: None,
            vulnerabilities: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_vulnerability(mut self, vulnerability_id: impl Into<String>) -> Self {
        self.vulnerabilities.push(vulnerability_id.into());
        self
    }

    pub fn references(&self, vulnerability_id: &str) -> bool {
        self.vulnerabilities.iter().any(|id| id == vulnerability_id)
    }
}

/// Root aggregate describing a system under test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub vulnerabilities: Vec<Vulnerability>,
    #[serde(default)]
    pub attack_steps: Vec<AttackStep>,
}

impl Target {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            vulnerabilities: Vec::new(),
            attack_steps: Vec::new(),
        }
    }

    pub fn with_vulnerability(mut self, vulnerability: Vulnerability) -> Self {
        self.vulnerabilities.push(vulnerability);
        self
    }

    pub fn with_step(mut self, step: AttackStep) -> Self {
        self.attack_steps.push(step);
        self
    }

    /// Every vulnerability in catalog order, keeping the first occurrence of each id
    pub fn all_vulnerabilities(&self) -> Vec<&Vulnerability> {
        let mut seen = HashSet::new();
        self.vulnerabilities
            .iter()
            .filter(|vuln| seen.insert(vuln.id.as_str()))
            .collect()
    }

    pub fn vulnerability(&self, id: &str) -> Option<&Vulnerability> {
        self.vulnerabilities.iter().find(|vuln| vuln.id == id)
    }

    /// Check internal consistency of the definition
    pub fn validate(&self) -> Result<(), TargetError> {
        if self.name.trim().is_empty() {
            return Err(TargetError::EmptyName);
        }

        let mut vuln_ids = HashSet::new();
        for vuln in &self.vulnerabilities {
            if vuln.id.trim().is_empty() {
                return Err(TargetError::EmptyVulnerabilityId {
                    location: vuln.location.clone(),
                });
            }
            if !vuln_ids.insert(vuln.id.as_str()) {
                return Err(TargetError::DuplicateVulnerability(vuln.id.clone()));
            }
            if vuln
                .success_indicators
                .iter()
                .any(|indicator| indicator.name.trim().is_empty())
            {
                return Err(TargetError::EmptyIndicatorName {
                    vulnerability_id: vuln.id.clone(),
                });
            }
        }

        let mut step_ids = HashSet::new();
        for step in &self.attack_steps {
            if !step_ids.insert(step.step_id.as_str()) {
                return Err(TargetError::DuplicateStep(step.step_id.clone()));
            }
            if let Some(missing) = step
                .vulnerabilities
                .iter()
                .find(|id| !vuln_ids.contains(id.as_str()))
            {
                return Err(TargetError::UnknownVulnerability {
                    step_id: step.step_id.clone(),
                    vulnerability_id: missing.clone(),
                });
            }
        }

        Ok(())
    }
}
