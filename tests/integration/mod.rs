//! Integration tests for the relgate CLI
//!
//! These drive the built binary against scratch repositories. Phases that
//! need a real Python tool-chain are covered by unit tests against the
//! scripted runner; here we exercise the CLI surface, precondition exit
//! codes, and the commands that work on plain files.

mod helpers;
mod test_compare;
mod test_pool;
mod test_release;
mod test_validate;
