//! Domain models shared by every crate in the workspace

pub mod target;
