use serde::Serialize;

use crate::breakpoint::Breakpoint;
use crate::container::ContainerLayout;
use crate::margin::ColumnMargin;
use crate::span::{Span, SpanTable};

/// Identifier the host uses to find the real UI element for a placement.
pub type ElementId = String;

/// What a column holds: an opaque host element, or a nested container that
/// is solved recursively with the column's resolved width.
#[derive(Debug, Clone)]
pub enum Content {
    Element(ElementId),
    Container(Box<ContainerLayout>),
}

impl Content {
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Content::Element(id) => Some(id),
            Content::Container(_) => None,
        }
    }

    pub fn as_container(&self) -> Option<&ContainerLayout> {
        match self {
            Content::Element(_) => None,
            Content::Container(container) => Some(container),
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut ContainerLayout> {
        match self {
            Content::Element(_) => None,
            Content::Container(container) => Some(container),
        }
    }
}

impl From<&str> for Content {
    fn from(id: &str) -> Self {
        Content::Element(id.to_string())
    }
}

impl From<String> for Content {
    fn from(id: String) -> Self {
        Content::Element(id)
    }
}

impl From<ContainerLayout> for Content {
    fn from(container: ContainerLayout) -> Self {
        Content::Container(Box::new(container))
    }
}

/// How a column's height is determined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub enum HeightRule {
    /// The host's intrinsic sizing applies; no height constraint is emitted.
    #[default]
    Auto,
    Fixed(f64),
    /// Height equals the resolved pixel width.
    Square,
}

/// One cell of a row: opaque content plus the metadata the resolver needs.
#[derive(Debug, Clone)]
pub struct Column {
    content: Content,
    spans: SpanTable,
    height: HeightRule,
    margin: ColumnMargin,
    name: Option<String>,
    anchor_to_bottom: bool,
    anchor_to_view_above: bool,
    centered_width: Option<f64>,
    centered_height: Option<f64>,
}

impl Column {
    /// Create a column from content and its `xs` span. Wider breakpoints
    /// inherit `xs` until [`Column::for_size`] overrides them.
    pub fn new(content: impl Into<Content>, xs: Span) -> Self {
        Self {
            content: content.into(),
            spans: SpanTable::new(xs),
            height: HeightRule::Auto,
            margin: ColumnMargin::default(),
            name: None,
            anchor_to_bottom: false,
            anchor_to_view_above: true,
            centered_width: None,
            centered_height: None,
        }
    }

    /// Set the span for one size class.
    pub fn for_size(mut self, class: Breakpoint, span: Span) -> Self {
        self.spans.set(class, span);
        self
    }

    pub fn with_height(mut self, px: f64) -> Self {
        self.height = HeightRule::Fixed(px);
        self
    }

    pub fn square(mut self) -> Self {
        self.height = HeightRule::Square;
        self
    }

    pub fn with_margin(mut self, margin: ColumnMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Register the column's content under a name for later lookup/removal.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Pin this column to the bottom of its row even when it is not last.
    pub fn anchored_to_bottom(mut self) -> Self {
        self.anchor_to_bottom = true;
        self
    }

    /// Skip the top anchor entirely; the host positions the column
    /// vertically on its own.
    pub fn detached_from_view_above(mut self) -> Self {
        self.anchor_to_view_above = false;
        self
    }

    /// Give the content a fixed width, centered horizontally in the column
    /// box instead of being inset to its edges.
    pub fn with_centered_width(mut self, px: f64) -> Self {
        self.centered_width = Some(px);
        self
    }

    /// Give the content a fixed height, centered vertically in the column
    /// box instead of stretching to it.
    pub fn with_centered_height(mut self, px: f64) -> Self {
        self.centered_height = Some(px);
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Content {
        &mut self.content
    }

    pub fn into_content(self) -> Content {
        self.content
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn spans(&self) -> &SpanTable {
        &self.spans
    }

    pub fn margin(&self) -> ColumnMargin {
        self.margin
    }
}

/// An ordered run of columns laid out against one shared pixel width.
///
/// Column order is meaningful: it drives the left-neighbor chain and the
/// wrap decisions. The list is set when the row is built; later structural
/// changes go through the container's remove-by-name path, never a silent
/// re-append.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Vec<Column>,
    width_px: f64,
    width_ratio: Option<f64>,
    wrap: bool,
    anchor_last_to_bottom: bool,
}

impl Row {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            width_px: 0.0,
            width_ratio: None,
            wrap: true,
            anchor_last_to_bottom: false,
        }
    }

    /// Disable wrapping: overflowing columns continue the line instead of
    /// breaking, the last visible column is pinned to the trailing edge and
    /// every visible column is pinned to the row bottom. Used for
    /// horizontally scrolling strips.
    pub fn without_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }

    pub fn anchored_last_to_bottom(mut self, anchor: bool) -> Self {
        self.anchor_last_to_bottom = anchor;
        self
    }

    /// Assign the row's pixel width against the width basis it was derived
    /// from. The ratio to the basis is captured on the first assignment and
    /// preserved for the row's lifetime: a row that starts as half its
    /// container stays half after every rotation.
    pub fn assign_width(&mut self, width_px: f64, basis_px: f64) {
        self.width_px = width_px;
        if self.width_ratio.is_none() && basis_px > 0.0 {
            self.width_ratio = Some(width_px / basis_px);
        }
    }

    /// Rescale against a new width basis using the captured ratio.
    pub fn rescale(&mut self, basis_px: f64) {
        if let Some(ratio) = self.width_ratio {
            self.width_px = basis_px * ratio;
        } else {
            self.assign_width(basis_px, basis_px);
        }
    }

    pub fn width_px(&self) -> f64 {
        self.width_px
    }

    pub fn width_ratio(&self) -> Option<f64> {
        self.width_ratio
    }

    pub fn wraps(&self) -> bool {
        self.wrap
    }

    pub fn anchors_last_to_bottom(&self) -> bool {
        self.anchor_last_to_bottom
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut Vec<Column> {
        &mut self.columns
    }
}

/// Vertical anchor of a column box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopAnchor {
    /// First visible column: pinned to the row top.
    RowTop { offset: f64 },
    /// Starts a new line: pinned below the column that opened the previous
    /// line. `index` addresses the row's stored column list.
    BelowColumn { index: usize, offset: f64 },
    /// Continues a line: same top as the previous visible column.
    AlignColumn { index: usize },
    /// The column opted out of vertical anchoring.
    Unanchored,
}

/// Horizontal anchor of a column box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LeftAnchor {
    RowLeading,
    AfterColumn { index: usize },
}

/// How the column's horizontal extent is constrained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WidthRule {
    Fixed { px: f64 },
    /// Full-width columns pin their trailing edge instead of taking a width.
    FillToTrailing,
}

/// Height constraint emitted for a column, if any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HeightAnchor {
    Auto,
    Fixed { px: f64 },
    EqualToWidth,
}

/// Resolved geometry for one visible column at one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnPlacement {
    /// Position in the row's stored column list (hidden columns keep their
    /// indices, so these stay stable across breakpoints).
    pub index: usize,
    pub span: Span,
    /// Resolved pixel width (for full-width columns, the row width).
    pub width: f64,
    pub new_line: bool,
    pub top: TopAnchor,
    pub left: LeftAnchor,
    pub width_rule: WidthRule,
    /// Whether the trailing edge is pinned to the row's trailing edge.
    pub trailing_pin: bool,
    pub height: HeightAnchor,
    /// Offset from the row bottom when the column is pinned there.
    pub bottom: Option<f64>,
    /// Content insets inside the column box, from the column's gutters.
    /// Ignored by hosts when a centered content size is present.
    pub inset_left: f64,
    pub inset_right: f64,
    /// Fixed content width centered in the column box, if requested.
    pub centered_width: Option<f64>,
    /// Fixed content height centered in the column box, if requested.
    pub centered_height: Option<f64>,
}

/// Outcome of resolving one row at one breakpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowResolution {
    pub placements: Vec<ColumnPlacement>,
    /// Columns excluded because their span resolved to zero.
    pub hidden: usize,
}

/// Resolve a row's columns for the given size class.
///
/// Pure and deterministic: the same row and class always produce the same
/// placements, so repeated reflows cannot drift. A row whose columns all
/// hide at this class resolves to an empty placement list.
pub fn resolve_row(row: &Row, class: Breakpoint) -> RowResolution {
    let columns = row.columns();
    let visible: Vec<usize> = (0..columns.len())
        .filter(|&idx| !columns[idx].spans.resolve(class).is_hidden())
        .collect();
    let hidden = columns.len() - visible.len();

    if visible.is_empty() {
        return RowResolution {
            placements: Vec::new(),
            hidden,
        };
    }

    let row_width = row.width_px();
    let col_unit = row_width / 12.0;
    let last_visible = *visible.last().unwrap();

    let mut placements = Vec::with_capacity(visible.len());
    let mut cursor_x = 0.0_f64;
    let mut line_anchor: usize = visible[0];
    let mut prev_visible: Option<usize> = None;
    let mut break_after_full = false;

    for &idx in &visible {
        let column = &columns[idx];
        let span = column.spans.resolve(class);
        let width = if span.is_full() {
            row_width
        } else {
            f64::from(span.units()) * col_unit
        };

        let first = prev_visible.is_none();
        let new_line = if first || span.is_full() {
            true
        } else if break_after_full {
            row.wraps()
        } else {
            row.wraps() && cursor_x + width > row_width
        };
        if new_line {
            cursor_x = 0.0;
        }

        let top = if !column.anchor_to_view_above {
            TopAnchor::Unanchored
        } else if first {
            TopAnchor::RowTop {
                offset: column.margin.top,
            }
        } else if new_line {
            TopAnchor::BelowColumn {
                index: line_anchor,
                offset: column.margin.top + columns[line_anchor].margin.bottom,
            }
        } else {
            TopAnchor::AlignColumn {
                index: prev_visible.unwrap(),
            }
        };

        let left = if new_line {
            LeftAnchor::RowLeading
        } else {
            LeftAnchor::AfterColumn {
                index: prev_visible.unwrap(),
            }
        };

        let width_rule = if span.is_full() {
            WidthRule::FillToTrailing
        } else {
            WidthRule::Fixed { px: width }
        };
        // Strips keep the last column's fixed width and additionally pin
        // its trailing edge so the row's extent is determined without wrap.
        let trailing_pin = span.is_full() || (!row.wraps() && idx == last_visible);

        let height = match column.height {
            HeightRule::Auto => HeightAnchor::Auto,
            HeightRule::Fixed(px) => HeightAnchor::Fixed { px },
            HeightRule::Square => HeightAnchor::EqualToWidth,
        };

        let pinned_to_bottom = !row.wraps()
            || column.anchor_to_bottom
            || (idx == last_visible && row.anchors_last_to_bottom());
        let bottom = pinned_to_bottom.then_some(column.margin.bottom);

        placements.push(ColumnPlacement {
            index: idx,
            span,
            width,
            new_line,
            top,
            left,
            width_rule,
            trailing_pin,
            height,
            bottom,
            inset_left: column.margin.left,
            inset_right: column.margin.right,
            centered_width: column.centered_width,
            centered_height: column.centered_height,
        });

        if span.is_full() {
            cursor_x = 0.0;
            break_after_full = true;
        } else {
            cursor_x += width;
            break_after_full = false;
        }
        if new_line {
            line_anchor = idx;
        }
        prev_visible = Some(idx);
    }

    RowResolution { placements, hidden }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(spans: &[u8], width: f64) -> Row {
        let columns = spans
            .iter()
            .enumerate()
            .map(|(i, &s)| Column::new(format!("col-{i}"), Span::of(s)))
            .collect();
        let mut row = Row::new(columns);
        row.assign_width(width, width);
        row
    }

    #[test]
    fn thirds_share_one_line_at_exact_fit() {
        let row = row_of(&[4, 4, 4], 900.0);
        let resolved = resolve_row(&row, Breakpoint::Xs);

        let widths: Vec<f64> = resolved.placements.iter().map(|p| p.width).collect();
        assert_eq!(widths, vec![300.0, 300.0, 300.0]);

        let lines: Vec<bool> = resolved.placements.iter().map(|p| p.new_line).collect();
        // 300 + 300 + 300 == 900 exactly, so nothing wraps.
        assert_eq!(lines, vec![true, false, false]);
    }

    #[test]
    fn third_column_wraps_when_row_narrows() {
        let row = row_of(&[4, 4, 4], 800.0);
        let resolved = resolve_row(&row, Breakpoint::Xs);

        let lines: Vec<bool> = resolved.placements.iter().map(|p| p.new_line).collect();
        assert_eq!(lines, vec![true, false, true]);

        let third = &resolved.placements[2];
        assert_eq!(third.left, LeftAnchor::RowLeading);
        assert_eq!(
            third.top,
            TopAnchor::BelowColumn {
                index: 0,
                offset: 0.0
            }
        );
    }

    #[test]
    fn full_span_breaks_before_and_after() {
        let row = row_of(&[4, 12, 4], 1200.0);
        let resolved = resolve_row(&row, Breakpoint::Xs);

        let full = &resolved.placements[1];
        assert!(full.new_line);
        assert_eq!(full.width_rule, WidthRule::FillToTrailing);
        assert_eq!(full.width, 1200.0);

        // The column after a full-width column starts its own line even
        // though the cursor reset would have left room.
        let after = &resolved.placements[2];
        assert!(after.new_line);
        assert_eq!(after.left, LeftAnchor::RowLeading);
    }

    #[test]
    fn full_span_first_column_still_leads() {
        let row = row_of(&[12, 6], 600.0);
        let resolved = resolve_row(&row, Breakpoint::Xs);
        assert!(resolved.placements[0].new_line);
        assert_eq!(
            resolved.placements[0].width_rule,
            WidthRule::FillToTrailing
        );
        assert!(resolved.placements[1].new_line);
    }

    #[test]
    fn hidden_columns_leave_the_chain_but_keep_indices() {
        let columns = vec![
            Column::new("a", Span::FULL).for_size(Breakpoint::Sm, Span::ZERO),
            Column::new("b", Span::of(6)),
            Column::new("c", Span::of(6)),
        ];
        let mut row = Row::new(columns);
        row.assign_width(600.0, 600.0);

        let at_sm = resolve_row(&row, Breakpoint::Sm);
        assert_eq!(at_sm.hidden, 1);
        assert_eq!(at_sm.placements.len(), 2);
        // Stored list still holds all three columns.
        assert_eq!(row.columns().len(), 3);
        // "b" becomes the first visible column and leads the row.
        assert_eq!(at_sm.placements[0].index, 1);
        assert!(at_sm.placements[0].new_line);
        assert_eq!(at_sm.placements[0].top, TopAnchor::RowTop { offset: 0.0 });

        // Back at xs the hidden column is visible again without re-adding.
        let at_xs = resolve_row(&row, Breakpoint::Xs);
        assert_eq!(at_xs.hidden, 0);
        assert_eq!(at_xs.placements[0].index, 0);
    }

    #[test]
    fn all_hidden_resolves_to_empty_not_panic() {
        let columns = vec![
            Column::new("a", Span::ZERO),
            Column::new("b", Span::ZERO),
        ];
        let mut row = Row::new(columns);
        row.assign_width(400.0, 400.0);

        let resolved = resolve_row(&row, Breakpoint::Xs);
        assert!(resolved.placements.is_empty());
        assert_eq!(resolved.hidden, 2);
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut row = row_of(&[3, 9, 6, 6, 12, 2], 977.0);
        row = row.anchored_last_to_bottom(true);
        let first = resolve_row(&row, Breakpoint::Md);
        let second = resolve_row(&row, Breakpoint::Md);
        assert_eq!(first, second);
    }

    #[test]
    fn continuing_columns_chain_left_and_align_top() {
        let row = row_of(&[4, 4, 4], 900.0);
        let resolved = resolve_row(&row, Breakpoint::Xs);

        assert_eq!(resolved.placements[1].left, LeftAnchor::AfterColumn { index: 0 });
        assert_eq!(resolved.placements[1].top, TopAnchor::AlignColumn { index: 0 });
        assert_eq!(resolved.placements[2].left, LeftAnchor::AfterColumn { index: 1 });
    }

    #[test]
    fn new_line_anchors_below_previous_line_opener() {
        // 6+6 fill the first line; 8 wraps; 8+6 overflows so 6 wraps again.
        let row = row_of(&[6, 6, 8, 6], 1200.0);
        let resolved = resolve_row(&row, Breakpoint::Xs);

        let lines: Vec<bool> = resolved.placements.iter().map(|p| p.new_line).collect();
        assert_eq!(lines, vec![true, false, true, true]);

        assert_eq!(
            resolved.placements[2].top,
            TopAnchor::BelowColumn {
                index: 0,
                offset: 0.0
            }
        );
        // The second wrap anchors below the opener of line two, not line one.
        assert_eq!(
            resolved.placements[3].top,
            TopAnchor::BelowColumn {
                index: 2,
                offset: 0.0
            }
        );
    }

    #[test]
    fn gutters_offset_anchors_but_never_widths() {
        let columns = vec![
            Column::new("a", Span::of(6)).with_margin(ColumnMargin::uniform(10.0)),
            Column::new("b", Span::of(8)).with_margin(ColumnMargin::uniform(4.0)),
        ];
        let mut row = Row::new(columns);
        row.assign_width(1200.0, 1200.0);

        let resolved = resolve_row(&row, Breakpoint::Xs);
        assert_eq!(resolved.placements[0].width, 600.0);
        assert_eq!(resolved.placements[0].inset_left, 10.0);
        assert_eq!(resolved.placements[1].width, 800.0);
        // 600 + 800 > 1200 wraps regardless of gutters; the line offset
        // stacks this column's top gutter on the opener's bottom gutter.
        assert_eq!(
            resolved.placements[1].top,
            TopAnchor::BelowColumn {
                index: 0,
                offset: 14.0
            }
        );
    }

    #[test]
    fn bottom_pins_follow_row_and_column_flags() {
        let columns = vec![
            Column::new("a", Span::of(6)),
            Column::new("b", Span::of(6)).anchored_to_bottom(),
            Column::new("c", Span::of(6)),
        ];
        let mut row = Row::new(columns).anchored_last_to_bottom(true);
        row.assign_width(1200.0, 1200.0);

        let resolved = resolve_row(&row, Breakpoint::Xs);
        assert_eq!(resolved.placements[0].bottom, None);
        assert_eq!(resolved.placements[1].bottom, Some(0.0));
        assert_eq!(resolved.placements[2].bottom, Some(0.0));
    }

    #[test]
    fn strip_rows_never_wrap_and_pin_everything() {
        let columns = vec![
            Column::new("a", Span::of(8)),
            Column::new("b", Span::of(8)),
            Column::new("c", Span::of(8)),
        ];
        let mut row = Row::new(columns).without_wrap();
        row.assign_width(900.0, 900.0);

        let resolved = resolve_row(&row, Breakpoint::Xs);
        let lines: Vec<bool> = resolved.placements.iter().map(|p| p.new_line).collect();
        // 600 + 600 + 600 overflows 900 twice over, but nothing breaks.
        assert_eq!(lines, vec![true, false, false]);

        assert!(resolved.placements.iter().all(|p| p.bottom.is_some()));
        assert_eq!(
            resolved.placements[2].width_rule,
            WidthRule::Fixed { px: 600.0 }
        );
        assert!(resolved.placements[2].trailing_pin);
        assert!(!resolved.placements[1].trailing_pin);
    }

    #[test]
    fn centered_content_sizes_pass_through() {
        let columns = vec![
            Column::new("icon", Span::of(3))
                .with_centered_width(44.0)
                .with_centered_height(44.0),
            Column::new("label", Span::of(9)),
        ];
        let mut row = Row::new(columns);
        row.assign_width(600.0, 600.0);

        let resolved = resolve_row(&row, Breakpoint::Xs);
        assert_eq!(resolved.placements[0].centered_width, Some(44.0));
        assert_eq!(resolved.placements[0].centered_height, Some(44.0));
        assert_eq!(resolved.placements[1].centered_width, None);
    }

    #[test]
    fn unanchored_column_skips_top_constraint() {
        let columns = vec![
            Column::new("a", Span::of(6)),
            Column::new("b", Span::of(12)).detached_from_view_above(),
        ];
        let mut row = Row::new(columns);
        row.assign_width(600.0, 600.0);

        let resolved = resolve_row(&row, Breakpoint::Xs);
        assert_eq!(resolved.placements[1].top, TopAnchor::Unanchored);
    }

    #[test]
    fn width_ratio_survives_rescale() {
        let mut row = row_of(&[6, 6], 500.0);
        // Re-assign against a basis of 1000: ratio captured as 0.5.
        row.width_ratio = None;
        row.assign_width(500.0, 1000.0);
        assert_eq!(row.width_ratio(), Some(0.5));

        row.rescale(1400.0);
        assert_eq!(row.width_px(), 700.0);
        // Ratio itself never drifts, no matter how many rescales run.
        row.rescale(1400.0);
        row.rescale(1000.0);
        assert_eq!(row.width_ratio(), Some(0.5));
        assert_eq!(row.width_px(), 500.0);
    }
}
