//! Binding module orchestrator.
//!
//! The engine never talks to a UI toolkit directly: dirty placements are
//! handed to a [`ConstraintSink`], and a host adapter translates them into
//! its own constraint or flex primitives. Implementations live in the
//! private `core` module.

mod core;

pub use core::{ConstraintSink, JsonLinesSink, NullSink, RecordingSink};
