// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the collection demos.
//!
//! Run a demo with:
//! - `cargo run -p understory_demos --example collection_reorder`
//!
//! Set `RUST_LOG=understory_collection=debug` to see drag sessions.

use understory_collection::RenderedCell;

/// Installs a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // A second install in the same process is harmless.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Prints rendered cells as text, one grid row per line.
///
/// Cells sharing a top edge share a line.
pub fn print_cells<V: std::fmt::Display>(cells: &[RenderedCell<V>]) {
    let mut row_top = None;
    let mut line = String::new();
    for cell in cells {
        if row_top.is_some_and(|top| top != cell.frame.y0) {
            println!("{line}");
            line.clear();
        }
        row_top = Some(cell.frame.y0);
        line.push_str(&format!(
            "[{:>2} {:<8} @{:>5.1},{:>5.1}] ",
            cell.index, cell.visual, cell.frame.x0, cell.frame.y0
        ));
    }
    if !line.is_empty() {
        println!("{line}");
    }
}
