//! Responsive 12-column grid layout engine.
//!
//! Screens are described as containers of rows, rows as ordered columns,
//! and each column carries a per-breakpoint span table. The engine resolves
//! pixel widths, line wraps, and sibling-relative anchors for the current
//! size class, and re-resolves everything when the host reports a resize.
//! No UI toolkit is linked: a [`binding::ConstraintSink`] adapter carries
//! the resolved placements into whatever constraint system the host uses.
//!
//! ```
//! use gridstrap::{
//!     BoxMargin, Breakpoint, Column, ContainerLayout, RecordingSink, ReflowController,
//!     RowOptions, Size, Span,
//! };
//!
//! let mut screen = ContainerLayout::new().with_margin(BoxMargin::none());
//! screen.attach(Size::new(1024.0, 768.0), None, false);
//! screen.add_row(
//!     vec![
//!         Column::new("sidebar", Span::FULL).for_size(Breakpoint::Lg, Span::of(3)),
//!         Column::new("content", Span::FULL).for_size(Breakpoint::Lg, Span::of(9)),
//!     ],
//!     RowOptions::default(),
//! );
//!
//! let mut controller = ReflowController::new();
//! controller.add_container(screen);
//!
//! let mut sink = RecordingSink::new();
//! controller
//!     .handle_resize(Size::new(1024.0, 768.0), &mut sink)
//!     .unwrap();
//! assert_eq!(controller.current_class(), Some(Breakpoint::Lg));
//! assert_eq!(sink.last_for("sidebar").unwrap().placement.width, 256.0);
//! ```

pub mod binding;
pub mod breakpoint;
pub mod container;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod margin;
pub mod metrics;
pub mod registry;
pub mod runtime;
pub mod span;

pub use binding::{ConstraintSink, JsonLinesSink, NullSink, RecordingSink};
pub use breakpoint::{Breakpoint, BreakpointChange, BreakpointResolver};
pub use container::{
    Attachment, ContainerFrame, ContainerLayout, ElementPlacement, RowFrame, RowOptions,
};
pub use error::{GridError, Result};
pub use geometry::Size;
pub use layout::{
    Column, ColumnPlacement, Content, ElementId, HeightAnchor, HeightRule, LeftAnchor, Row,
    RowResolution, TopAnchor, WidthRule, resolve_row,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use margin::{BoxMargin, ColumnMargin, MarginStep, ResolvedMargin};
pub use metrics::{LayoutMetrics, MetricSnapshot};
pub use registry::PlacementRegistry;
pub use runtime::{ContainerId, ReflowConfig, ReflowController, ReflowOutcome};
pub use span::{Span, SpanTable};
