// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_flow_layout --heading-base-level=0

//! Understory Flow Layout: uniform-cell flow packing for grids and collections.
//!
//! This crate computes where a dense strip of same-sized cells, indexed
//! `0..len`, lands when packed into rows of a container with a given width.
//! It is renderer-agnostic: it never creates views, it only answers geometry
//! questions.
//!
//! The core concepts are:
//!
//! - [`FlowConfig`]: item size, spacing, optional explicit insets, and a
//!   [`FlowAlignment`]. Validated by [`FlowConfig::validate`].
//! - [`items_per_row`]: the row capacity rule,
//!   `floor(container_width / (item_width + 2 * spacing))`.
//! - [`FlowLayout`]: owns a validated configuration and reports
//!   [`FlowMetrics`] (row capacity + section insets, also available edge by
//!   edge as [`SectionInsets`]) or a full [`FlowPass`].
//! - [`FlowPass`]: placed cell frames plus visibility ([`FlowPass::visible_cells`])
//!   and hit testing ([`FlowPass::index_at_point`], [`FlowPass::drop_index_at_point`]).
//!
//! Explicit insets always take precedence over anything derived from the
//! alignment mode.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Size};
//! use understory_flow_layout::{FlowConfig, FlowLayout};
//!
//! let flow = FlowLayout::new(
//!     FlowConfig::default()
//!         .with_item_size(Size::new(100.0, 100.0))
//!         .with_spacing(10.0),
//! )
//! .unwrap();
//!
//! // 250 / (100 + 2 * 10) → two cells per row.
//! assert_eq!(flow.items_per_row(250.0), 2);
//!
//! let pass = flow.layout(250.0, 5);
//! assert_eq!(pass.row_count(), 3);
//!
//! // Host frameworks realize the cells intersecting the viewport.
//! let visible = pass.visible_cells(0.0, 150.0, 0.0, 0.0);
//! assert_eq!(visible.indices(), 0..4);
//!
//! // Explicit insets win over alignment.
//! let flow = FlowLayout::new(FlowConfig::default().with_inset(Insets::uniform(10.0))).unwrap();
//! assert_eq!(flow.metrics(250.0).insets, Insets::uniform(10.0));
//! ```
//!
//! All sizes and offsets live in one caller-chosen coordinate space
//! (typically logical pixels) with `y` growing downward.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod flow;
mod pass;
mod util;

pub use config::{ConfigError, FlowAlignment, FlowConfig};
pub use flow::{FlowLayout, FlowMetrics, SectionInsets, items_per_row};
pub use pass::{FlowPass, VisibleCells};
