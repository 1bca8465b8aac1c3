use serde::Serialize;

use crate::breakpoint::Breakpoint;
use crate::error::{GridError, Result};

/// How many of the 12 grid units a column occupies at one breakpoint.
///
/// `0` removes the column from layout entirely for that breakpoint; `12`
/// spans the full row width and forces a line break before and after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Span(u8);

impl Span {
    pub const ZERO: Span = Span(0);
    pub const FULL: Span = Span(12);

    /// Create a span, panicking on values above 12.
    ///
    /// An out-of-range span is a programmer error and is surfaced at the
    /// call that introduced it.
    pub fn of(units: u8) -> Self {
        assert!(units <= 12, "column span must be 0..=12, got {units}");
        Span(units)
    }

    /// Checked variant of [`Span::of`].
    pub fn try_of(units: u8) -> Result<Self> {
        if units > 12 {
            return Err(GridError::SpanOutOfRange(units));
        }
        Ok(Span(units))
    }

    pub fn units(self) -> u8 {
        self.0
    }

    /// A hidden column is excluded from the visible sibling chain.
    pub fn is_hidden(self) -> bool {
        self.0 == 0
    }

    /// A full-width column always starts its own line.
    pub fn is_full(self) -> bool {
        self.0 == 12
    }
}

/// Per-breakpoint span assignments for one column.
///
/// Only `xs` is guaranteed present (default 12). Resolution for a class with
/// no explicit entry walks down through the narrower classes and takes the
/// first defined value, so callers can specify only the breakpoints where
/// the layout actually changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanTable {
    spans: [Option<Span>; 5],
}

impl Default for SpanTable {
    fn default() -> Self {
        Self::new(Span::FULL)
    }
}

impl SpanTable {
    /// Table with the given `xs` span and nothing else defined.
    pub fn new(xs: Span) -> Self {
        let mut spans = [None; 5];
        spans[Breakpoint::Xs.index()] = Some(xs);
        Self { spans }
    }

    /// Set the span for one breakpoint, replacing any previous entry.
    pub fn set(&mut self, class: Breakpoint, span: Span) {
        self.spans[class.index()] = Some(span);
    }

    /// Whether the class has an explicit entry (no cascade applied).
    pub fn is_set(&self, class: Breakpoint) -> bool {
        self.spans[class.index()].is_some()
    }

    /// Resolve the span for a class, cascading down to `xs`.
    pub fn resolve(&self, class: Breakpoint) -> Span {
        for candidate in class.cascade() {
            if let Some(span) = self.spans[candidate.index()] {
                return span;
            }
        }
        // Unreachable: the constructors always populate xs.
        Span::FULL
    }
}
