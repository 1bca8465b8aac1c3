//! Layout module orchestrator.
//!
//! Columns, rows, and the pure row resolver live in the private `core`
//! module. Downstream code imports the engine types from here; the
//! container module feeds rows in and applies the resulting placements.

mod core;

pub use core::{
    Column, ColumnPlacement, Content, ElementId, HeightAnchor, HeightRule, LeftAnchor, Row,
    RowResolution, TopAnchor, WidthRule, resolve_row,
};
