use std::collections::HashMap;

use serde::Serialize;

use crate::breakpoint::Breakpoint;
use crate::error::{GridError, Result};
use crate::geometry::Size;
use crate::layout::{Column, ColumnPlacement, Content, ElementId, Row, RowResolution, resolve_row};
use crate::margin::{BoxMargin, ResolvedMargin};

/// How a container is mounted in its superview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    pub superview: Size,
    /// Element the container sits below, if any; otherwise the container
    /// anchors to the superview top.
    pub view_above: Option<ElementId>,
    pub anchor_to_bottom: bool,
}

/// Options for one row appended to a container.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowOptions {
    /// Explicit pixel width. When unset the row takes the container's
    /// content width at solve time.
    pub width_px: Option<f64>,
    /// Anchor the row's last visible column to the row bottom.
    pub anchor_to_bottom: bool,
    /// Disable wrapping for this row (horizontal strip).
    pub no_wrap: bool,
}

/// A responsive container: ordered rows of columns, stacked top to bottom.
///
/// Rows are append-only; single-column changes go through the named
/// remove path followed by a reflow. The container itself carries the
/// breakpoint-scaled outer margin and remembers how it was attached so a
/// reflow can re-anchor it identically.
#[derive(Debug, Clone)]
pub struct ContainerLayout {
    rows: Vec<Row>,
    margin: BoxMargin,
    wrap: bool,
    attachment: Option<Attachment>,
    names: HashMap<String, (usize, usize)>,
}

impl Default for ContainerLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerLayout {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            margin: BoxMargin::default(),
            wrap: true,
            attachment: None,
            names: HashMap::new(),
        }
    }

    pub fn with_margin(mut self, margin: BoxMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Disable width anchoring: rows never wrap their overflowing columns.
    pub fn without_width_anchor(mut self) -> Self {
        self.wrap = false;
        self
    }

    /// Mount the container: record the superview size and how to anchor.
    /// The same configuration is reused by every subsequent reflow.
    pub fn attach(
        &mut self,
        superview: Size,
        view_above: Option<ElementId>,
        anchor_to_bottom: bool,
    ) -> &mut Self {
        self.attachment = Some(Attachment {
            superview,
            view_above,
            anchor_to_bottom,
        });
        self
    }

    pub fn detach(&mut self) {
        self.attachment = None;
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    /// Update the recorded superview size (host bounds changed).
    pub fn set_superview_size(&mut self, superview: Size) -> Result<()> {
        match self.attachment.as_mut() {
            Some(attachment) => {
                attachment.superview = superview;
                Ok(())
            }
            None => Err(GridError::Detached("updating superview size")),
        }
    }

    /// Append one row of columns. Named columns are registered for lookup;
    /// a duplicate name replaces the previous registration.
    pub fn add_row(&mut self, columns: Vec<Column>, options: RowOptions) -> &mut Self {
        let mut row = Row::new(columns).anchored_last_to_bottom(options.anchor_to_bottom);
        if options.no_wrap || !self.wrap {
            row = row.without_wrap();
        }
        if let Some(width) = options.width_px {
            // Ratio basis is filled in at first solve if still unknown.
            let basis = self.content_width_now().unwrap_or(0.0);
            row.assign_width(width, basis);
        }

        let row_index = self.rows.len();
        for (col_index, column) in row.columns().iter().enumerate() {
            if let Some(name) = column.name() {
                self.names.insert(name.to_string(), (row_index, col_index));
            }
        }
        self.rows.push(row);
        self
    }

    /// Append a single named column to the last row. Creates the row when
    /// the container is still empty. A reflow must follow before the
    /// change is visible to the host.
    pub fn add_element(&mut self, column: Column) -> &mut Self {
        if self.rows.is_empty() {
            return self.add_row(vec![column], RowOptions::default());
        }
        let row_index = self.rows.len() - 1;
        let row = self.rows.last_mut().unwrap();
        if let Some(name) = column.name() {
            self.names
                .insert(name.to_string(), (row_index, row.columns().len()));
        }
        row.columns_mut().push(column);
        self
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn margin(&self) -> BoxMargin {
        self.margin
    }

    /// Find named content, searching this container first and then any
    /// nested containers, depth first in row order. Misses return `None`.
    pub fn get_element_named(&self, name: &str) -> Option<&Content> {
        if let Some(&(row, col)) = self.names.get(name) {
            return Some(self.rows[row].columns()[col].content());
        }
        for row in &self.rows {
            for column in row.columns() {
                if let Some(nested) = column.content().as_container() {
                    if let Some(found) = nested.get_element_named(name) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Remove named content at any nesting depth, returning it so the host
    /// can detach the underlying element. The registry entry and the column
    /// disappear in the same operation; a miss returns `None` and changes
    /// nothing.
    pub fn remove_element_named(&mut self, name: &str) -> Option<Content> {
        if let Some((row, col)) = self.names.remove(name) {
            let column = self.rows[row].columns_mut().remove(col);
            self.rebuild_names();
            return Some(column.into_content());
        }
        for row in &mut self.rows {
            for column in row.columns_mut() {
                if let Some(nested) = column.content_mut().as_container_mut() {
                    if let Some(found) = nested.remove_element_named(name) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    fn rebuild_names(&mut self) {
        self.names.clear();
        for (row_index, row) in self.rows.iter().enumerate() {
            for (col_index, column) in row.columns().iter().enumerate() {
                if let Some(name) = column.name() {
                    self.names.insert(name.to_string(), (row_index, col_index));
                }
            }
        }
    }

    fn content_width_now(&self) -> Option<f64> {
        let attachment = self.attachment.as_ref()?;
        // Margin scale needs the class of the attached width.
        let class = Breakpoint::classify(attachment.superview.width);
        let margin = self.margin.px(class);
        Some((attachment.superview.width - margin.left - margin.right).max(0.0))
    }

    /// Re-anchor the container and resolve every row for the given class.
    ///
    /// Requires an attachment; solving a detached container is a
    /// configuration error surfaced to the caller, not a silent no-op.
    /// A container with no rows (or only fully hidden rows) solves to an
    /// empty frame.
    pub fn solve(&mut self, class: Breakpoint) -> Result<ContainerFrame> {
        let attachment = self
            .attachment
            .clone()
            .ok_or(GridError::Detached("solving container layout"))?;
        let margin = self.margin.px(class);
        let content_width = (attachment.superview.width - margin.left - margin.right).max(0.0);
        self.solve_rows(class, content_width, margin, attachment)
    }

    /// Solve as nested content inside a column of the given width. Nested
    /// containers have no attachment of their own; the owning column's box
    /// is their superview.
    pub(crate) fn solve_nested(&mut self, class: Breakpoint, width: f64) -> Result<ContainerFrame> {
        let margin = self.margin.px(class);
        let content_width = (width - margin.left - margin.right).max(0.0);
        let attachment = Attachment {
            superview: Size::new(width, 0.0),
            view_above: None,
            anchor_to_bottom: false,
        };
        self.solve_rows(class, content_width, margin, attachment)
    }

    fn solve_rows(
        &mut self,
        class: Breakpoint,
        content_width: f64,
        margin: ResolvedMargin,
        attachment: Attachment,
    ) -> Result<ContainerFrame> {
        let mut frames = Vec::with_capacity(self.rows.len());
        let mut placements = Vec::new();

        for (row_index, row) in self.rows.iter_mut().enumerate() {
            if row.width_ratio().is_none() && row.width_px() > 0.0 {
                // Explicit width assigned while detached: capture the ratio
                // against the first real basis we see.
                let width = row.width_px();
                row.assign_width(width, content_width);
            }
            row.rescale(content_width);

            let resolution = resolve_row(row, class);
            for placement in &resolution.placements {
                let column = &mut row.columns_mut()[placement.index];
                match column.content_mut() {
                    Content::Element(id) => placements.push(ElementPlacement {
                        id: id.clone(),
                        row: row_index,
                        placement: placement.clone(),
                    }),
                    Content::Container(nested) => {
                        let nested_frame = nested.solve_nested(class, placement.width)?;
                        placements.extend(nested_frame.placements);
                    }
                }
            }

            frames.push(RowFrame {
                index: row_index,
                width_px: row.width_px(),
                resolution,
            });
        }

        Ok(ContainerFrame {
            class,
            margin,
            content_width,
            view_above: attachment.view_above,
            anchor_to_bottom: attachment.anchor_to_bottom,
            rows: frames,
            placements,
        })
    }
}

/// One row's resolved geometry within a container frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFrame {
    pub index: usize,
    pub width_px: f64,
    pub resolution: RowResolution,
}

/// A placement bound to the element id the host knows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementPlacement {
    pub id: ElementId,
    /// Row index within the element's own container.
    pub row: usize,
    pub placement: ColumnPlacement,
}

/// Fully resolved container geometry for one size class.
///
/// Rows stack top to bottom: each row's top is the previous row's bottom,
/// the first row's top is the container top. The flattened `placements`
/// list includes elements of nested containers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerFrame {
    pub class: Breakpoint,
    pub margin: ResolvedMargin,
    pub content_width: f64,
    pub view_above: Option<ElementId>,
    pub anchor_to_bottom: bool,
    pub rows: Vec<RowFrame>,
    pub placements: Vec<ElementPlacement>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::margin::MarginStep;
    use crate::span::Span;

    fn attached(width: f64) -> ContainerLayout {
        let mut container = ContainerLayout::new().with_margin(BoxMargin::none());
        container.attach(Size::new(width, 800.0), None, false);
        container
    }

    #[test]
    fn solve_detached_is_a_configuration_error() {
        let mut container = ContainerLayout::new();
        container.add_row(
            vec![Column::new("a", Span::of(6))],
            RowOptions::default(),
        );
        let err = container.solve(Breakpoint::Xs).unwrap_err();
        assert!(matches!(err, GridError::Detached(_)));
    }

    #[test]
    fn empty_container_solves_to_empty_frame() {
        let mut container = attached(1000.0);
        let frame = container.solve(Breakpoint::Md).unwrap();
        assert!(frame.rows.is_empty());
        assert!(frame.placements.is_empty());
        assert_eq!(frame.content_width, 1000.0);
    }

    #[test]
    fn content_width_subtracts_scaled_margins() {
        let mut container =
            ContainerLayout::new().with_margin(BoxMargin::uniform(MarginStep::Two));
        container.attach(Size::new(1000.0, 600.0), None, false);
        // md interval is 3, step Two unit is 4: 12px per side.
        let frame = container.solve(Breakpoint::Md).unwrap();
        assert_eq!(frame.margin.left, 12.0);
        assert_eq!(frame.content_width, 976.0);
    }

    #[test]
    fn rows_keep_captured_ratio_across_resizes() {
        let mut container = attached(1000.0);
        container.add_row(
            vec![Column::new("half", Span::FULL)],
            RowOptions {
                width_px: Some(500.0),
                ..RowOptions::default()
            },
        );
        let frame = container.solve(Breakpoint::Lg).unwrap();
        assert_eq!(frame.rows[0].width_px, 500.0);

        container
            .set_superview_size(Size::new(1400.0, 700.0))
            .unwrap();
        let frame = container.solve(Breakpoint::Xl).unwrap();
        assert_eq!(frame.rows[0].width_px, 700.0);

        // And back, with no drift.
        container
            .set_superview_size(Size::new(1000.0, 700.0))
            .unwrap();
        let frame = container.solve(Breakpoint::Lg).unwrap();
        assert_eq!(frame.rows[0].width_px, 500.0);
    }

    #[test]
    fn registry_finds_and_removes_at_depth() {
        let mut inner = ContainerLayout::new().with_margin(BoxMargin::none());
        inner.add_row(
            vec![
                Column::new("inner-label", Span::of(6)).named("inner-label"),
                Column::new("inner-value", Span::of(6)).named("inner-value"),
            ],
            RowOptions::default(),
        );

        let mut outer = attached(1200.0);
        outer.add_row(
            vec![
                Column::new("header", Span::FULL).named("header"),
                Column::new(inner, Span::of(8)).named("detail"),
            ],
            RowOptions::default(),
        );

        assert!(outer.get_element_named("header").is_some());
        assert!(outer.get_element_named("inner-value").is_some());
        assert!(outer.get_element_named("missing").is_none());

        let removed = outer.remove_element_named("inner-value");
        assert!(removed.is_some());
        assert!(outer.get_element_named("inner-value").is_none());
        // The sibling stays reachable after the nested row shrank.
        assert!(outer.get_element_named("inner-label").is_some());

        // Removing again is a miss, not an error.
        assert!(outer.remove_element_named("inner-value").is_none());
    }

    #[test]
    fn removal_keeps_sibling_registrations_consistent() {
        let mut container = attached(900.0);
        container.add_row(
            vec![
                Column::new("a", Span::of(4)).named("a"),
                Column::new("b", Span::of(4)).named("b"),
                Column::new("c", Span::of(4)).named("c"),
            ],
            RowOptions::default(),
        );

        container.remove_element_named("a").unwrap();
        let b = container.get_element_named("b").unwrap();
        assert_eq!(b.element_id(), Some("b"));
        let c = container.get_element_named("c").unwrap();
        assert_eq!(c.element_id(), Some("c"));

        let frame = container.solve(Breakpoint::Xs).unwrap();
        assert_eq!(frame.placements.len(), 2);
        assert_eq!(frame.placements[0].id, "b");
    }

    #[test]
    fn nested_container_solves_with_column_width() {
        let mut inner = ContainerLayout::new().with_margin(BoxMargin::none());
        inner.add_row(
            vec![
                Column::new("left", Span::of(6)),
                Column::new("right", Span::of(6)),
            ],
            RowOptions::default(),
        );

        let mut outer = attached(1200.0);
        outer.add_row(
            vec![Column::new(inner, Span::of(6))],
            RowOptions::default(),
        );

        let frame = outer.solve(Breakpoint::Xs).unwrap();
        // Outer column is 600 wide; nested halves are 300 each.
        let ids: Vec<&str> = frame.placements.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["left", "right"]);
        assert_eq!(frame.placements[0].placement.width, 300.0);
    }

    #[test]
    fn add_element_appends_to_last_row() {
        let mut container = attached(1200.0);
        container.add_row(
            vec![Column::new("a", Span::of(6)).named("a")],
            RowOptions::default(),
        );
        container.add_element(Column::new("b", Span::of(6)).named("b"));

        let frame = container.solve(Breakpoint::Xs).unwrap();
        assert_eq!(frame.rows.len(), 1);
        assert_eq!(frame.placements.len(), 2);
        assert!(container.get_element_named("b").is_some());
    }

    #[test]
    fn attachment_configuration_is_preserved_across_solves() {
        let mut container = attached(1000.0);
        container.attach(Size::new(1000.0, 600.0), Some("toolbar".into()), true);
        container.add_row(
            vec![Column::new("body", Span::FULL)],
            RowOptions {
                anchor_to_bottom: true,
                ..RowOptions::default()
            },
        );

        for _ in 0..3 {
            let frame = container.solve(Breakpoint::Md).unwrap();
            assert_eq!(frame.view_above.as_deref(), Some("toolbar"));
            assert!(frame.anchor_to_bottom);
        }
    }
}
