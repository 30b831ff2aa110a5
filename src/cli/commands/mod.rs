//! CLI Commands Module

pub mod evaluate;
pub mod validate;
