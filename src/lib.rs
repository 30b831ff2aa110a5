//! pentest-eval - scores penetration-test logs against target definitions
//!
//! This is the binary crate that wires configuration, the model backend and
//! the evaluation engine together behind the CLI.

mod app;
pub mod cli;

pub use app::{AppHandle, create_app};
pub use cli::{Cli, CliApp};
pub use pentest_eval_core::{Config, init_tracing};

// Re-export for convenience
pub use pentest_eval_core;
pub use pentest_eval_engine;
pub use pentest_eval_llm;
