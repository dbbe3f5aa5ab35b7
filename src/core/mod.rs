//! Core building blocks for relgate
//!
//! - **config**: relgate.toml parsing, layout defaults, release groups
//! - **context**: unified repository context shared across commands
//! - **error**: error taxonomy (setup / validation / tool) with exit codes

pub mod config;
pub mod context;
pub mod error;
