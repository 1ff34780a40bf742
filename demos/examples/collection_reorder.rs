// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flow-laid-out collection with drag reordering.
//!
//! This example shows how a host drives `understory_collection`:
//! - report the container width and viewport,
//! - render the visible cells,
//! - forward drag events and react to the reorder callback.
//!
//! Run:
//! - `cargo run -p understory_demos --example collection_reorder`
//! - `RUST_LOG=understory_collection=trace cargo run -p understory_demos --example collection_reorder`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Insets, Point, Size};
use understory_collection::{
    Collection, CollectionBuilder, FlowAlignment, ReorderOutcome, StaticCells,
};
use understory_demos::{init_tracing, print_cells};

fn main() {
    init_tracing();

    // Persist the order somewhere the host owns.
    let saved = Rc::new(RefCell::new(Vec::<String>::new()));
    let sink = Rc::clone(&saved);

    let colors = [
        "red", "orange", "yellow", "green", "blue", "indigo", "violet",
    ];
    let mut grid = Collection::builder(colors.map(String::from))
        .item_size(Size::new(80.0, 60.0))
        .spacing(8.0)
        .alignment(FlowAlignment::Default)
        .reorderable(true)
        .on_reorder(move |items: &[String]| {
            tracing::info!(order = ?items, "order saved");
            *sink.borrow_mut() = items.to_vec();
        })
        .build(|item: &String, _size: Size| item.to_uppercase())
        .expect("valid configuration");

    grid.set_container_width(300.0);
    let metrics = grid.metrics();
    println!(
        "width 300: {} per row, insets {:?}",
        metrics.items_per_row, metrics.insets
    );
    print_cells(&grid.render_visible());

    // Drag "red" and release it over the cell where "green" sits.
    let target = grid.layout().frame(3).expect("cell 3 is laid out").center();
    grid.drag_began(0).expect("cell 0 exists");
    println!("hovering {target:?}: {:?}", grid.drag_hovered_at(target));
    match grid.dropped() {
        Ok(ReorderOutcome::Moved { from, to }) => println!("moved {from} -> {to}"),
        Ok(other) => println!("no move: {other:?}"),
        Err(err) => println!("drop failed: {err}"),
    }
    println!("saved order: {:?}", saved.borrow());
    print_cells(&grid.render_visible());

    // A cancelled drag changes nothing.
    grid.drag_began(6).expect("cell 6 exists");
    grid.drag_hovered_at(Point::new(0.0, 0.0));
    grid.drag_cancelled();
    println!("after cancel: {:?}", grid.items());

    // Explicit insets override the alignment; a narrow viewport limits rendering.
    grid.set_inset(Some(Insets::uniform(12.0)))
        .expect("valid insets");
    grid.set_viewport(60.0, 40.0);
    println!("viewport 60..100: {:?}", grid.visible_cells().indices());
    print_cells(&grid.render_visible());

    // Rejected updates keep the previous configuration.
    if let Err(err) = grid.set_spacing(-4.0) {
        println!("rejected: {err}; spacing still {}", grid.config().spacing);
    }

    // Integer ranges and heterogeneous static children.
    let mut numbers = CollectionBuilder::from_range(1..=12)
        .item_size(Size::new(40.0, 40.0))
        .spacing(4.0)
        .build(|n: &i64, _: Size| n.to_string())
        .expect("valid configuration");
    numbers.set_container_width(200.0);
    print_cells(&numbers.render_visible());

    let cells = StaticCells::new()
        .cell(|_| String::from("Title"))
        .cell(|size: Size| format!("{}x{}", size.width, size.height))
        .cell(|_| String::from("Footer"));
    let mut mixed = CollectionBuilder::from_cells(cells)
        .item_size(Size::new(120.0, 30.0))
        .build_static()
        .expect("valid configuration");
    mixed.set_container_width(400.0);
    print_cells(&mixed.render_visible());
}
