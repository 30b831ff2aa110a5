//! Target value objects

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// How a pattern is matched against log text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Case-sensitive substring search
    #[serde(alias = "exact")]
    Literal,
    /// Case-insensitive, multi-line regular expression
    Regex,
    /// Judged by a language model from a natural-language description
    #[serde(alias = "llm")]
    ModelAssisted,
    /// Any match type this build does not recognise
    #[serde(other)]
    Unknown,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Regex => "regex",
            Self::ModelAssisted => "model_assisted",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vulnerability category
///
/// Serialized as a snake_case name; names this build does not know are kept
/// verbatim in [`VulnType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VulnType {
    RemoteCodeExecution,
    CommandInjection,
    SqlInjection,
    FileUpload,
    PathTraversal,
    FileInclusion,
    Deserialization,
    Ssrf,
    Xss,
    AuthenticationBypass,
    WeakCredentials,
    InformationDisclosure,
    PrivilegeEscalation,
    LateralMovement,
    Other(String),
}

impl VulnType {
    /// Human-readable name used in report summaries
    pub fn as_str(&self) -> &str {
        match self {
            Self::RemoteCodeExecution => "Remote Code Execution",
            Self::CommandInjection => "Command Injection",
            Self::SqlInjection => "SQL Injection",
            Self::FileUpload => "Arbitrary File Upload",
            Self::PathTraversal => "Path Traversal",
            Self::FileInclusion => "File Inclusion",
            Self::Deserialization => "Insecure Deserialization",
            Self::Ssrf => "Server-Side Request Forgery",
            Self::Xss => "Cross-Site Scripting",
            Self::AuthenticationBypass => "Authentication Bypass",
            Self::WeakCredentials => "Weak Credentials",
            Self::InformationDisclosure => "Information Disclosure",
            Self::PrivilegeEscalation => "Privilege Escalation",
            Self::LateralMovement => "Lateral Movement",
            Self::Other(name) => name,
        }
    }

    /// Name as written in target definitions
    pub fn key(&self) -> &str {
        match self {
            Self::RemoteCodeExecution => "remote_code_execution",
            Self::CommandInjection => "command_injection",
            Self::SqlInjection => "sql_injection",
            Self::FileUpload => "file_upload",
            Self::PathTraversal => "path_traversal",
            Self::FileInclusion => "file_inclusion",
            Self::Deserialization => "deserialization",
            Self::Ssrf => "ssrf",
            Self::Xss => "xss",
            Self::AuthenticationBypass => "authentication_bypass",
            Self::WeakCredentials => "weak_credentials",
            Self::InformationDisclosure => "information_disclosure",
            Self::PrivilegeEscalation => "privilege_escalation",
            Self::LateralMovement => "lateral_movement",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for VulnType {
    fn from(name: &str) -> Self {
        match name {
            "remote_code_execution" | "rce" => Self::RemoteCodeExecution,
            "command_injection" => Self::CommandInjection,
            "sql_injection" | "sqli" => Self::SqlInjection,
            "file_upload" => Self::FileUpload,
            "path_traversal" => Self::PathTraversal,
            "file_inclusion" | "lfi" => Self::FileInclusion,
            "deserialization" => Self::Deserialization,
            "ssrf" => Self::Ssrf,
            "xss" => Self::Xss,
            "authentication_bypass" => Self::AuthenticationBypass,
            "weak_credentials" => Self::WeakCredentials,
            "information_disclosure" => Self::InformationDisclosure,
            "privilege_escalation" => Self::PrivilegeEscalation,
            "lateral_movement" => Self::LateralMovement,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for VulnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for VulnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from(name.as_str()))
    }
}

impl std::fmt::Display for VulnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exploitation difficulty / impact rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Critical,
    High,
    Medium,
    Low,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
