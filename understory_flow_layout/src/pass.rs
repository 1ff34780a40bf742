// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The result of a layout pass and the queries hosts run against it.

use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Insets, Point, Rect, Size};

use crate::util::{ceil_index, floor_index};

/// Cells whose rows intersect a vertical viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleCells {
    /// First visible cell index (inclusive).
    pub start: usize,
    /// One past the last visible cell index (exclusive).
    pub end: usize,

    /// Extent from the top of the content to the first visible row.
    pub before_extent: f64,
    /// Extent from the bottom of the last visible row to the end of the content.
    pub after_extent: f64,
    /// Total content height, insets included.
    pub content_extent: f64,
}

impl VisibleCells {
    /// Returns `true` if no cell is visible.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The visible cell indices as a range.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    const fn empty(before_extent: f64, after_extent: f64, content_extent: f64) -> Self {
        Self {
            start: 0,
            end: 0,
            before_extent,
            after_extent,
            content_extent,
        }
    }
}

/// Placed cells for one container width and item count.
///
/// Produced by [`FlowLayout::layout`](crate::FlowLayout::layout). Cells are
/// grouped into rows of [`FlowPass::columns`] cells; every row is
/// `item_size.height` tall and rows are separated by `spacing`.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowPass {
    pub(crate) container_width: f64,
    pub(crate) items_per_row: usize,
    pub(crate) columns: usize,
    pub(crate) insets: Insets,
    pub(crate) item_size: Size,
    pub(crate) spacing: f64,
    pub(crate) frames: Vec<Rect>,
    pub(crate) content_size: Size,
}

impl FlowPass {
    /// Number of placed cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no cells were placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Container width this pass was computed for.
    #[must_use]
    pub const fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Row capacity reported by the engine (may be `0`).
    #[must_use]
    pub const fn items_per_row(&self) -> usize {
        self.items_per_row
    }

    /// Cells actually placed per row: `items_per_row` capped to what fits
    /// between the horizontal insets, and at least `1`.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Section insets used for placement.
    #[must_use]
    pub const fn insets(&self) -> Insets {
        self.insets
    }

    /// Uniform cell size.
    #[must_use]
    pub const fn item_size(&self) -> Size {
        self.item_size
    }

    /// Size of the laid-out content, insets included.
    #[must_use]
    pub const fn content_size(&self) -> Size {
        self.content_size
    }

    /// Frames of all cells, in index order.
    #[must_use]
    pub fn frames(&self) -> &[Rect] {
        &self.frames
    }

    /// Frame of the cell at `index`, if it exists.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.frames.get(index).copied()
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.len().div_ceil(self.columns)
    }

    /// Row containing the cell at `index`.
    #[must_use]
    pub fn row_of(&self, index: usize) -> Option<usize> {
        (index < self.len()).then(|| index / self.columns)
    }

    /// Cell indices in `row`. Empty for rows past the end.
    #[must_use]
    pub fn row_cells(&self, row: usize) -> Range<usize> {
        let len = self.len();
        let start = row.saturating_mul(self.columns).min(len);
        let end = start.saturating_add(self.columns).min(len);
        start..end
    }

    /// Union of the frames in `row`.
    #[must_use]
    pub fn row_bounds(&self, row: usize) -> Option<Rect> {
        let cells = self.row_cells(row);
        let first = self.frame(cells.start)?;
        let last = self.frame(cells.end.checked_sub(1)?)?;
        Some(first.union(last))
    }

    fn row_pitch(&self) -> f64 {
        self.item_size.height + self.spacing
    }

    fn row_top(&self, row: usize) -> f64 {
        self.insets.y0 + row as f64 * self.row_pitch()
    }

    /// Row whose vertical band (row plus the gap below it) contains `y`,
    /// clamped to the existing rows.
    fn row_at_y(&self, y: f64) -> usize {
        let row = floor_index((y - self.insets.y0) / self.row_pitch());
        row.min(self.row_count().saturating_sub(1))
    }

    /// Computes which cells to realize for a vertical viewport.
    ///
    /// - `scroll_offset`: top of the viewport in content coordinates.
    /// - `viewport_extent`: height of the viewport.
    /// - `overscan_before` / `overscan_after`: extra margin above and below
    ///   the viewport to reduce popping.
    ///
    /// Whole rows are realized: the result always starts at the first cell of
    /// a row and ends after the last cell of a row (or at `len`).
    #[must_use]
    pub fn visible_cells(
        &self,
        scroll_offset: f64,
        viewport_extent: f64,
        overscan_before: f64,
        overscan_after: f64,
    ) -> VisibleCells {
        let content = self.content_size.height;
        if self.is_empty() {
            return VisibleCells::empty(0.0, 0.0, content);
        }

        let scroll_offset = scroll_offset.max(0.0);
        let min = (scroll_offset - overscan_before.max(0.0)).max(0.0);
        let max = (scroll_offset + viewport_extent.max(0.0) + overscan_after.max(0.0)).min(content);
        if max <= min {
            return VisibleCells::empty(min, (content - min).max(0.0), content);
        }

        let rows = self.row_count();
        let pitch = self.row_pitch();
        let top = self.insets.y0;

        // First row whose bottom edge lies below `min`.
        let mut first = self.row_at_y(min);
        if min >= self.row_top(first) + self.item_size.height {
            first += 1;
        }
        // Rows whose top edge lies above `max`.
        let end_row = ceil_index((max - top) / pitch).min(rows);

        if end_row <= first {
            // Viewport sits entirely in a gap or an inset.
            return VisibleCells::empty(min, (content - min).max(0.0), content);
        }

        let last_bottom = self.row_top(end_row - 1) + self.item_size.height;
        VisibleCells {
            start: first * self.columns,
            end: (end_row * self.columns).min(self.len()),
            before_extent: self.row_top(first),
            after_extent: (content - last_bottom).max(0.0),
            content_extent: content,
        }
    }

    /// Index of the cell under `point`, or `None` over gaps and insets.
    #[must_use]
    pub fn index_at_point(&self, point: Point) -> Option<usize> {
        if self.is_empty() || point.y < self.insets.y0 {
            return None;
        }
        let row = floor_index((point.y - self.insets.y0) / self.row_pitch());
        if row >= self.row_count() {
            return None;
        }
        self.row_cells(row)
            .find(|&index| self.frames[index].contains(point))
    }

    /// Position a dragged cell should move to when hovering `point`.
    ///
    /// Unlike [`FlowPass::index_at_point`] this never misses: the point is
    /// clamped to the nearest row, and within that row the cell whose center
    /// is horizontally closest wins. Returns `None` only when there are no
    /// cells.
    #[must_use]
    pub fn drop_index_at_point(&self, point: Point) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let row = self.row_at_y(point.y);
        self.row_cells(row).min_by(|&a, &b| {
            let da = self.frames[a].center().x - point.x;
            let db = self.frames[b].center().x - point.x;
            (da * da).total_cmp(&(db * db))
        })
    }
}
