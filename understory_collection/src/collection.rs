// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The collection binding: store, layout, reorder, and rendering in one owner.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{self, Debug};
use core::ops::RangeInclusive;

use kurbo::{Insets, Point, Rect, Size};
use understory_flow_layout::{
    FlowAlignment, FlowConfig, FlowLayout, FlowMetrics, FlowPass, VisibleCells,
};

use crate::{
    AnyCell, CellRenderer, CollectionError, DragPhase, DropProposal, ItemStore, ReorderController,
    ReorderOutcome, StaticCellRenderer, StaticCells,
};

type ReorderCallback<T> = Box<dyn FnMut(&[T])>;

/// One realized cell from [`Collection::render_visible`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedCell<V> {
    /// Item position.
    pub index: usize,
    /// Cell frame in content coordinates.
    pub frame: Rect,
    /// Renderer output for the item.
    pub visual: V,
}

/// Builder for a [`Collection`].
///
/// Defaults: 100×100 cells, no spacing, no explicit inset, leading alignment,
/// reordering disabled, no reorder callback.
pub struct CollectionBuilder<T> {
    items: Vec<T>,
    config: FlowConfig,
    reorderable: bool,
    on_reorder: Option<ReorderCallback<T>>,
}

impl<T> CollectionBuilder<T> {
    /// Starts a builder over an initial item sequence.
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        Self {
            items: items.into_iter().collect(),
            config: FlowConfig::default(),
            reorderable: false,
            on_reorder: None,
        }
    }

    /// Sets the uniform cell size.
    #[must_use]
    pub fn item_size(mut self, item_size: Size) -> Self {
        self.config.item_size = item_size;
        self
    }

    /// Sets the gap between rows and between cells in a row.
    #[must_use]
    pub fn spacing(mut self, spacing: f64) -> Self {
        self.config.spacing = spacing;
        self
    }

    /// Sets explicit section insets. These override anything the alignment
    /// would derive.
    #[must_use]
    pub fn inset(mut self, inset: Insets) -> Self {
        self.config.inset = Some(inset);
        self
    }

    /// Sets the row packing mode.
    #[must_use]
    pub fn alignment(mut self, alignment: FlowAlignment) -> Self {
        self.config.alignment = alignment;
        self
    }

    /// Replaces the whole layout configuration.
    #[must_use]
    pub fn config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    /// Enables or disables drag reordering.
    #[must_use]
    pub fn reorderable(mut self, reorderable: bool) -> Self {
        self.reorderable = reorderable;
        self
    }

    /// Sets the callback invoked with the full item sequence after every
    /// completed reorder.
    #[must_use]
    pub fn on_reorder(mut self, on_reorder: impl FnMut(&[T]) + 'static) -> Self {
        self.on_reorder = Some(Box::new(on_reorder));
        self
    }

    /// Validates the configuration and builds the collection.
    pub fn build<R: CellRenderer<T>>(
        self,
        renderer: R,
    ) -> Result<Collection<T, R>, CollectionError> {
        let layout = FlowLayout::new(self.config)?;
        Ok(Collection {
            store: ItemStore::new(self.items),
            layout,
            reorder: ReorderController::new(self.reorderable),
            renderer,
            on_reorder: self.on_reorder,
            container_width: 0.0,
            scroll_offset: 0.0,
            viewport_extent: f64::INFINITY,
            overscan: 0.0,
            pass: None,
        })
    }
}

impl CollectionBuilder<i64> {
    /// Starts a builder over the consecutive integers in `range`.
    #[must_use]
    pub fn from_range(range: RangeInclusive<i64>) -> Self {
        Self::new(range)
    }
}

impl<V> CollectionBuilder<AnyCell<V>> {
    /// Starts a builder over pre-built, type-erased children.
    #[must_use]
    pub fn from_cells(cells: StaticCells<V>) -> Self {
        Self::new(cells.into_vec())
    }

    /// Builds a collection whose cells render themselves.
    pub fn build_static(
        self,
    ) -> Result<Collection<AnyCell<V>, StaticCellRenderer>, CollectionError> {
        self.build(StaticCellRenderer)
    }
}

impl<T: Debug> Debug for CollectionBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionBuilder")
            .field("items", &self.items)
            .field("config", &self.config)
            .field("reorderable", &self.reorderable)
            .field("on_reorder", &self.on_reorder.is_some())
            .finish()
    }
}

/// A grid of items laid out in a flow, reorderable by drag and drop.
///
/// The collection exclusively owns its [`ItemStore`]. Rendering reads it and
/// only [`Collection::dropped`] moves items; both take `&mut self`, so a
/// render can never observe a move half applied. The collection is meant to
/// be driven from one UI thread.
///
/// Host responsibilities:
///
/// - Report the container width ([`Collection::set_container_width`]) and the
///   vertical viewport ([`Collection::set_viewport`]).
/// - Call [`Collection::render_visible`] on each render pass and place the
///   returned visuals at their frames.
/// - Forward drag events: [`Collection::drag_began`],
///   [`Collection::drag_hovered`] / [`Collection::drag_hovered_at`],
///   [`Collection::dropped`], [`Collection::drag_cancelled`].
pub struct Collection<T, R> {
    store: ItemStore<T>,
    layout: FlowLayout,
    reorder: ReorderController,
    renderer: R,
    on_reorder: Option<ReorderCallback<T>>,
    container_width: f64,
    scroll_offset: f64,
    viewport_extent: f64,
    overscan: f64,

    // Invalidated by width, configuration, and length changes.
    pass: Option<FlowPass>,
}

impl<T> Collection<T, ()> {
    /// Starts building a collection over `items`.
    #[must_use]
    pub fn builder(items: impl IntoIterator<Item = T>) -> CollectionBuilder<T> {
        CollectionBuilder::new(items)
    }
}

impl<T, R: CellRenderer<T>> Collection<T, R> {
    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The item store.
    #[must_use]
    pub const fn store(&self) -> &ItemStore<T> {
        &self.store
    }

    /// All items in their current order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        self.store.as_slice()
    }

    /// The item at `index`.
    pub fn item(&self, index: usize) -> Result<&T, CollectionError> {
        self.store.get(index)
    }

    /// Replaces every item.
    ///
    /// An active drag is cancelled since its positions no longer refer to the
    /// same items.
    pub fn replace_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.reorder.cancel();
        self.store.replace_all(items.into_iter().collect());
        self.pass = None;
        #[cfg(feature = "tracing")]
        tracing::debug!(len = self.store.len(), "items replaced");
    }

    /// Consumes the collection and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.store.into_vec()
    }

    /// The cell renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the cell renderer.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Active layout configuration.
    #[must_use]
    pub const fn config(&self) -> &FlowConfig {
        self.layout.config()
    }

    /// Replaces the layout configuration.
    ///
    /// On error the previous configuration stays active.
    pub fn set_config(&mut self, config: FlowConfig) -> Result<(), CollectionError> {
        if let Err(err) = self.layout.set_config(config) {
            #[cfg(feature = "tracing")]
            tracing::warn!(%err, "configuration rejected");
            return Err(err.into());
        }
        self.pass = None;
        Ok(())
    }

    /// Sets the uniform cell size.
    pub fn set_item_size(&mut self, item_size: Size) -> Result<(), CollectionError> {
        self.set_config(self.config().with_item_size(item_size))
    }

    /// Sets the gap between rows and between cells in a row.
    pub fn set_spacing(&mut self, spacing: f64) -> Result<(), CollectionError> {
        self.set_config(self.config().with_spacing(spacing))
    }

    /// Sets or clears explicit section insets.
    pub fn set_inset(&mut self, inset: Option<Insets>) -> Result<(), CollectionError> {
        self.set_config(FlowConfig {
            inset,
            ..*self.config()
        })
    }

    /// Sets the row packing mode.
    pub fn set_alignment(&mut self, alignment: FlowAlignment) -> Result<(), CollectionError> {
        self.set_config(self.config().with_alignment(alignment))
    }

    /// Whether drag reordering is enabled.
    #[must_use]
    pub const fn is_reorderable(&self) -> bool {
        self.reorder.is_enabled()
    }

    /// Enables or disables drag reordering. Disabling cancels an active drag.
    pub fn set_reorderable(&mut self, reorderable: bool) {
        self.reorder.set_enabled(reorderable);
    }

    /// Sets the callback invoked after every completed reorder.
    pub fn set_on_reorder(&mut self, on_reorder: impl FnMut(&[T]) + 'static) {
        self.on_reorder = Some(Box::new(on_reorder));
    }

    /// Current container width.
    #[must_use]
    pub const fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Sets the container width, invalidating the layout if it changed.
    pub fn set_container_width(&mut self, width: f64) {
        if width != self.container_width {
            self.container_width = width;
            self.pass = None;
        }
    }

    /// Sets the vertical viewport used by [`Collection::render_visible`].
    ///
    /// Until this is called the viewport is unbounded and every cell is
    /// visible.
    pub fn set_viewport(&mut self, scroll_offset: f64, viewport_extent: f64) {
        self.scroll_offset = scroll_offset.max(0.0);
        self.viewport_extent = viewport_extent.max(0.0);
    }

    /// Sets the extra margin realized above and below the viewport.
    pub fn set_overscan(&mut self, overscan: f64) {
        self.overscan = overscan.max(0.0);
    }

    /// Row capacity and section insets for the current width.
    #[must_use]
    pub fn metrics(&self) -> FlowMetrics {
        self.layout.metrics(self.container_width)
    }

    /// Computes or returns the cached layout pass.
    pub fn layout(&mut self) -> &FlowPass {
        let Self {
            pass,
            layout,
            store,
            container_width,
            ..
        } = self;
        pass.get_or_insert_with(|| layout.layout(*container_width, store.len()))
    }

    /// Cells intersecting the current viewport (plus overscan).
    pub fn visible_cells(&mut self) -> VisibleCells {
        let (scroll, extent) = (self.scroll_offset, self.viewport_extent);
        let overscan = self.overscan;
        self.layout()
            .visible_cells(scroll, extent, overscan, overscan)
    }

    /// Renders a single cell.
    pub fn render_cell(&mut self, index: usize) -> Result<R::Visual, CollectionError> {
        let item = self.store.get(index)?;
        Ok(self.renderer.render(item, self.layout.config().item_size))
    }

    /// Renders every visible cell, in index order.
    pub fn render_visible(&mut self) -> Vec<RenderedCell<R::Visual>> {
        let visible = self.visible_cells();
        let Self {
            pass,
            store,
            renderer,
            ..
        } = self;
        let Some(pass) = pass.as_ref() else {
            return Vec::new();
        };
        let size = pass.item_size();
        let mut cells = Vec::with_capacity(visible.end - visible.start);
        for (index, (item, frame)) in store
            .iter()
            .zip(pass.frames())
            .enumerate()
            .skip(visible.start)
            .take(visible.end - visible.start)
        {
            cells.push(RenderedCell {
                index,
                frame: *frame,
                visual: renderer.render(item, size),
            });
        }
        cells
    }

    /// Current drag phase.
    #[must_use]
    pub const fn drag_phase(&self) -> DragPhase {
        self.reorder.phase()
    }

    /// A drag started on the cell at `position`.
    ///
    /// Returns `Ok(false)` when reordering is disabled.
    pub fn drag_began(&mut self, position: usize) -> Result<bool, CollectionError> {
        self.reorder.begin_drag(position, self.store.len())
    }

    /// The drag hovers the cell at `position`, or no cell.
    pub fn drag_hovered(&mut self, position: Option<usize>) -> DropProposal {
        self.reorder.update_drag(position, self.store.len())
    }

    /// The drag hovers `point` in content coordinates.
    pub fn drag_hovered_at(&mut self, point: Point) -> DropProposal {
        let hovered = self.layout().drop_index_at_point(point);
        self.drag_hovered(hovered)
    }

    /// The drag was dropped.
    ///
    /// A `Move` proposal moves the item and then calls the reorder callback
    /// with the full new sequence, exactly once.
    pub fn dropped(&mut self) -> Result<ReorderOutcome, CollectionError> {
        let on_reorder = &mut self.on_reorder;
        self.reorder.drop(&mut self.store, |items| {
            if let Some(on_reorder) = on_reorder {
                on_reorder(items);
            }
        })
    }

    /// The drag was cancelled. Returns `true` if a drag was active.
    pub fn drag_cancelled(&mut self) -> bool {
        self.reorder.cancel()
    }
}

impl<T: Debug, R: Debug> Debug for Collection<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("store", &self.store)
            .field("layout", &self.layout)
            .field("reorder", &self.reorder)
            .field("renderer", &self.renderer)
            .field("container_width", &self.container_width)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, CollectionBuilder};
    use crate::{CollectionError, DragPhase, DropProposal, ReorderOutcome, StaticCells};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::{Insets, Point, Rect, Size};
    use understory_flow_layout::{ConfigError, FlowAlignment};

    fn label(item: &char, _size: Size) -> char {
        *item
    }

    type Calls<T> = Rc<RefCell<Vec<Vec<T>>>>;

    fn recorder<T: Clone + 'static>() -> (Calls<T>, impl FnMut(&[T]) + 'static) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        (calls, move |items: &[T]| sink.borrow_mut().push(items.to_vec()))
    }

    #[test]
    fn drag_to_position_reorders_and_notifies() {
        let (calls, on_reorder) = recorder();
        let mut collection = Collection::builder(['A', 'B', 'C', 'D'])
            .reorderable(true)
            .on_reorder(on_reorder)
            .build(label)
            .unwrap();

        assert_eq!(collection.drag_began(0), Ok(true));
        assert_eq!(collection.drag_hovered(Some(2)), DropProposal::Move);
        assert_eq!(
            collection.dropped(),
            Ok(ReorderOutcome::Moved { from: 0, to: 2 })
        );
        assert_eq!(collection.items(), &['B', 'C', 'A', 'D']);
        assert_eq!(*calls.borrow(), vec![vec!['B', 'C', 'A', 'D']]);
    }

    #[test]
    fn cancelled_drag_leaves_items_alone() {
        let (calls, on_reorder) = recorder();
        let mut collection = Collection::builder(['A', 'B', 'C'])
            .reorderable(true)
            .on_reorder(on_reorder)
            .build(label)
            .unwrap();

        collection.drag_began(1).unwrap();
        assert!(collection.drag_cancelled());
        assert_eq!(collection.dropped(), Ok(ReorderOutcome::Ignored));
        assert_eq!(collection.items(), &['A', 'B', 'C']);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn reordering_is_off_by_default() {
        let mut collection = Collection::builder(['A', 'B']).build(label).unwrap();
        assert!(!collection.is_reorderable());
        assert_eq!(collection.drag_began(0), Ok(false));
        assert_eq!(collection.drag_hovered(Some(1)), DropProposal::Forbidden);
        assert_eq!(collection.dropped(), Ok(ReorderOutcome::Ignored));
        assert_eq!(collection.items(), &['A', 'B']);
    }

    #[test]
    fn metrics_follow_container_width() {
        let mut collection = Collection::builder(0..10_u32)
            .item_size(Size::new(100.0, 100.0))
            .spacing(10.0)
            .build(|item: &u32, _: Size| *item)
            .unwrap();
        collection.set_container_width(250.0);
        assert_eq!(collection.metrics().items_per_row, 2);
        assert_eq!(collection.layout().row_count(), 5);
        collection.set_container_width(500.0);
        assert_eq!(collection.metrics().items_per_row, 4);
        assert_eq!(collection.layout().row_count(), 3);
    }

    #[test]
    fn explicit_inset_beats_leading_alignment() {
        let mut collection = Collection::builder(['A'])
            .inset(Insets::uniform(10.0))
            .alignment(FlowAlignment::Leading)
            .build(label)
            .unwrap();
        collection.set_container_width(250.0);
        assert_eq!(collection.metrics().insets, Insets::uniform(10.0));
        assert_eq!(
            collection.layout().frame(0),
            Some(Rect::new(10.0, 10.0, 110.0, 110.0))
        );
    }

    #[test]
    fn invalid_configuration_keeps_previous() {
        let mut collection = Collection::builder(['A'])
            .spacing(5.0)
            .build(label)
            .unwrap();
        assert_eq!(
            collection.set_spacing(-1.0),
            Err(CollectionError::InvalidConfiguration(
                ConfigError::NegativeSpacing(-1.0)
            ))
        );
        assert!(collection.set_item_size(Size::new(0.0, 0.0)).is_err());
        assert_eq!(collection.config().spacing, 5.0);
        assert_eq!(collection.config().item_size, Size::new(100.0, 100.0));

        let built = CollectionBuilder::new(['A'])
            .item_size(Size::new(-5.0, 5.0))
            .build(label);
        assert!(matches!(
            built,
            Err(CollectionError::InvalidConfiguration(
                ConfigError::NonPositiveItemSize { .. }
            ))
        ));
    }

    #[test]
    fn render_visible_only_renders_viewport_rows() {
        let rendered = Rc::new(RefCell::new(0_usize));
        let counter = Rc::clone(&rendered);
        let mut collection = Collection::builder(0..20_u32)
            .item_size(Size::new(50.0, 50.0))
            .build(move |item: &u32, size: Size| {
                *counter.borrow_mut() += 1;
                (*item, size)
            })
            .unwrap();
        // 4 per row, rows at y = 0, 50, 100, ...
        collection.set_container_width(200.0);
        collection.set_viewport(60.0, 80.0);

        let cells = collection.render_visible();
        let indices: Vec<usize> = cells.iter().map(|c| c.index).collect();
        assert_eq!(indices, (4..12).collect::<Vec<_>>());
        assert_eq!(cells[0].frame, Rect::new(0.0, 50.0, 50.0, 100.0));
        assert_eq!(cells[0].visual, (4, Size::new(50.0, 50.0)));
        assert_eq!(*rendered.borrow(), 8);
    }

    #[test]
    fn render_cell_checks_bounds() {
        let mut collection = Collection::builder(['A', 'B']).build(label).unwrap();
        assert_eq!(collection.render_cell(1), Ok('B'));
        assert_eq!(
            collection.render_cell(2),
            Err(CollectionError::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn hover_by_point_resolves_through_layout() {
        let mut collection = Collection::builder(['A', 'B', 'C', 'D'])
            .item_size(Size::new(10.0, 10.0))
            .reorderable(true)
            .build(label)
            .unwrap();
        collection.set_container_width(20.0);
        // Two per row: D sits at (10, 10).
        collection.drag_began(0).unwrap();
        assert_eq!(
            collection.drag_hovered_at(Point::new(15.0, 15.0)),
            DropProposal::Move
        );
        assert_eq!(
            collection.drag_phase(),
            DragPhase::Proposing {
                source: 0,
                destination: 3,
                proposal: DropProposal::Move
            }
        );
        collection.dropped().unwrap();
        assert_eq!(collection.items(), &['B', 'C', 'D', 'A']);
    }

    #[test]
    fn replacing_items_cancels_drag_and_relayouts() {
        let mut collection = Collection::builder(['A', 'B', 'C'])
            .reorderable(true)
            .build(label)
            .unwrap();
        collection.set_container_width(100.0);
        assert_eq!(collection.layout().len(), 3);
        collection.drag_began(2).unwrap();
        collection.replace_items(['X']);
        assert_eq!(collection.drag_phase(), DragPhase::Idle);
        assert_eq!(collection.layout().len(), 1);
        assert_eq!(collection.item(0), Ok(&'X'));
    }

    #[test]
    fn range_and_static_constructors() {
        let collection = CollectionBuilder::from_range(1..=10)
            .build(|n: &i64, _: Size| *n)
            .unwrap();
        assert_eq!(collection.len(), 10);
        assert_eq!(collection.item(9), Ok(&10));

        let cells = StaticCells::new()
            .cell(|_| "title")
            .cell(|_| "body")
            .cell(|_| "footer");
        let mut collection = CollectionBuilder::from_cells(cells).build_static().unwrap();
        assert_eq!(collection.render_cell(1), Ok("body"));
        collection.set_container_width(300.0);
        let visuals: Vec<&str> = collection
            .render_visible()
            .into_iter()
            .map(|c| c.visual)
            .collect();
        assert_eq!(visuals, ["title", "body", "footer"]);
    }
}
