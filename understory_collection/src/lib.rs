// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_collection --heading-base-level=0

//! Understory Collection: a renderer-agnostic collection view core.
//!
//! This crate places a sequence of heterogeneous items into a flow-laid-out
//! grid of uniform cells and lets users reorder them by drag and drop. It
//! never creates views itself; the host supplies a [`CellRenderer`] and
//! forwards drag events.
//!
//! The core concepts are:
//!
//! - [`ItemStore`]: the ordered items. Identity is positional and the only
//!   mutation besides wholesale replacement is a single remove+insert
//!   ([`ItemStore::move_item`]).
//! - [`ReorderController`]: the drag/drop state machine
//!   (`Idle → Dragging → Proposing → Idle`) that turns one completed drop into
//!   one store move followed by one notification.
//! - [`CellRenderer`]: the seam to the host's views. Any
//!   `FnMut(&T, Size) -> V` closure qualifies. [`AnyCell`] / [`StaticCells`]
//!   erase differently typed, pre-built children into one sequence.
//! - [`Collection`]: owns all of the above plus an
//!   [`understory_flow_layout::FlowLayout`], caches the layout pass, and
//!   exposes the drag adapter (`drag_began`, `drag_hovered`, `dropped`,
//!   `drag_cancelled`) and the render pass ([`Collection::render_visible`]).
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use kurbo::Size;
//! use understory_collection::{Collection, ReorderOutcome};
//!
//! let order = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&order);
//!
//! let mut grid = Collection::builder(["A", "B", "C", "D"])
//!     .item_size(Size::new(100.0, 100.0))
//!     .spacing(10.0)
//!     .reorderable(true)
//!     .on_reorder(move |items: &[&str]| *sink.borrow_mut() = items.to_vec())
//!     .build(|item: &&str, size: Size| format!("{item} @ {}x{}", size.width, size.height))
//!     .unwrap();
//!
//! grid.set_container_width(250.0);
//! assert_eq!(grid.metrics().items_per_row, 2);
//!
//! // Drag "A" onto the third cell and drop it there.
//! grid.drag_began(0).unwrap();
//! grid.drag_hovered(Some(2));
//! assert_eq!(grid.dropped().unwrap(), ReorderOutcome::Moved { from: 0, to: 2 });
//! assert_eq!(*order.borrow(), ["B", "C", "A", "D"]);
//!
//! let cells = grid.render_visible();
//! assert_eq!(cells[2].visual, "A @ 100x100");
//! ```
//!
//! ## Threading
//!
//! Everything runs synchronously on the caller's thread. The store is only
//! reachable through `&mut Collection` during a move, so no render can see a
//! move half applied and no locking is needed.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//! - `tracing`: emits `tracing` events for drag sessions, applied moves, and
//!   rejected configuration updates. No subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;
mod collection;
mod error;
mod reorder;
mod store;

pub use cell::{AnyCell, CellRenderer, StaticCellRenderer, StaticCells};
pub use collection::{Collection, CollectionBuilder, RenderedCell};
pub use error::CollectionError;
pub use reorder::{DragPhase, DropProposal, ReorderController, ReorderOutcome};
pub use store::ItemStore;

pub use understory_flow_layout::{
    FlowAlignment, FlowConfig, FlowMetrics, FlowPass, SectionInsets, VisibleCells,
};
