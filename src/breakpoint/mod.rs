//! Breakpoint module orchestrator.
//!
//! Screen widths are bucketed into five ordered size classes. The pure
//! classifier and the observable resolver live in the private `core`
//! module and are re-exported here.

mod core;

pub use core::{Breakpoint, BreakpointChange, BreakpointResolver};
