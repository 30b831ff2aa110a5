//! Infrastructure for acquiring target definitions

pub mod target_loader;

pub use target_loader::{TargetFormat, TargetLoadError, load_target, parse_target};
