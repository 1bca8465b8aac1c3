use thiserror::Error;

/// Unified result type for the gridstrap crate.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors surfaced by the layout engine.
///
/// Lookup misses and rows left empty by breakpoint filtering are legitimate
/// runtime states and are never represented here; the former return `Option`
/// and the latter resolve to empty placements.
#[derive(Debug, Error)]
pub enum GridError {
    /// A geometry operation was attempted on a container with no superview
    /// width. Attach the container first.
    #[error("container is not attached to a superview (while {0})")]
    Detached(&'static str),
    /// A span outside 0..=12 reached a checked constructor.
    #[error("column span {0} is out of range (expected 0..=12)")]
    SpanOutOfRange(u8),
    /// A reflow was requested before any screen size had been observed.
    #[error("no screen size observed yet; handle a resize first")]
    Unobserved,
    /// A serialized placement could not be produced for hashing or a sink.
    #[error("placement serialization failure: {0}")]
    Placement(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
