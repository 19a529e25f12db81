//! Shared plumbing for the todo workspace: logging setup, startup
//! directory checks and small response types used by more than one crate.

pub mod env;
pub mod types;
pub mod utils;
