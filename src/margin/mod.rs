//! Margin module orchestrator.
//!
//! Container margins are specified in abstract steps that scale with the
//! current size class; column gutters are raw pixel insets. Both live in
//! the private `core` module.

mod core;

pub use core::{BoxMargin, ColumnMargin, MarginStep, ResolvedMargin};
