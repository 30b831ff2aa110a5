//! pentest-eval core - shared foundation for the evaluation workspace
//!
//! # Modules
//!
//! - [`config`]: Strongly-typed configuration with TOML and environment variable support
//! - [`domain`]: Target definitions: vulnerabilities, success indicators, patterns, attack steps
//! - [`infrastructure`]: Loading target definitions from JSON or TOML files
//! - [`logging`]: Structured logging with tracing
//!
//! # Configuration
//!
//! ```rust,ignore
//! use pentest_eval_core::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `PENTEST_EVAL__` prefix with double underscore separators:
//!
//! ```bash
//! PENTEST_EVAL__LLM__PROVIDER=anthropic
//! PENTEST_EVAL__EVALUATION__MAX_CONCURRENT_VULNERABILITIES=4
//! ```

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use domain::target::{
    AttackStep, Difficulty, MatchType, Pattern, SuccessIndicator, Target, TargetError,
    VulnType, Vulnerability,
};
pub use infrastructure::target_loader::{TargetFormat, TargetLoadError, load_target, parse_target};
pub use logging::init_tracing;
