//! Target definitions
//!
//! A [`Target`] describes a system under test: the vulnerabilities planted in
//! it, how each one is recognised in an execution log, and the ordered attack
//! steps that make up a full compromise. These values are read-only inputs to
//! the evaluation engine.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::{AttackStep, Pattern, SuccessIndicator, Target, Vulnerability};
pub use errors::TargetError;
pub use value_objects::{Difficulty, MatchType, VulnType};
