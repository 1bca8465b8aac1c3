//! Error module orchestrator.
//!
//! Callers import [`GridError`] and the crate-wide [`Result`] alias from
//! here; the variants live in the private `types` module.

mod types;

pub use types::{GridError, Result};
