//! CLI commands for relgate
//!
//! - **validate**: run validation phases for one package (the orchestrator)
//! - **compare**: diff wheel and sdist contents for pooled artifacts
//! - **release**: release packages with unreleased changelog entries
//! - **pool**: inspect or reset the shared artifact pool
//!
//! All commands accept `&RepoContext` to avoid redundant config loads.

pub mod compare;
pub mod pool;
pub mod release;
pub mod validate;

pub use compare::run_compare;
pub use pool::{run_pool_list, run_pool_reset};
pub use release::{ReleaseOpts, run_release};
pub use validate::{PhaseSelector, ValidateOpts, run_validate};
