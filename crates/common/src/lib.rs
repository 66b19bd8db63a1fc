//! Pieces shared by every crate in the workspace: tracing setup, env helpers
//! and the small wire types that are not tied to the student domain.

pub mod types;
pub mod utils;
pub mod env;
