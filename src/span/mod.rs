//! Span module orchestrator.
//!
//! Column spans (0..=12 grid units) and the per-breakpoint span table with
//! cascade fallback live in the private `core` module.

mod core;

pub use core::{Span, SpanTable};
