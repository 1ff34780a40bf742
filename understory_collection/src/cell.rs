// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell rendering seam and type-erased static cells.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::{self, Debug};

use kurbo::Size;

/// Turns an item into a visual cell of a given size.
///
/// This is the seam to the host's view system. The collection calls it for
/// every cell it realizes and never caches the result, so implementations must
/// be safe to call repeatedly for the same item and size.
///
/// Any `FnMut(&T, Size) -> V` closure is a renderer.
pub trait CellRenderer<T> {
    /// Host-specific handle for a rendered cell.
    type Visual;

    /// Renders `item` into a cell of `size`.
    fn render(&mut self, item: &T, size: Size) -> Self::Visual;
}

impl<T, V, F> CellRenderer<T> for F
where
    F: FnMut(&T, Size) -> V,
{
    type Visual = V;

    fn render(&mut self, item: &T, size: Size) -> V {
        self(item, size)
    }
}

/// A type-erased, pre-built cell.
///
/// Lets differently typed children share one homogeneous store: each child
/// is reduced to "something that renders into a `V` at a size".
pub struct AnyCell<V>(Box<dyn Fn(Size) -> V>);

impl<V> AnyCell<V> {
    /// Wraps a cell builder.
    #[must_use]
    pub fn new(build: impl Fn(Size) -> V + 'static) -> Self {
        Self(Box::new(build))
    }

    /// Builds the cell's visual at `size`.
    #[must_use]
    pub fn render(&self, size: Size) -> V {
        (self.0)(size)
    }
}

impl<V> Debug for AnyCell<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AnyCell")
    }
}

/// Renderer for stores of [`AnyCell`]s: each cell renders itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StaticCellRenderer;

impl<V> CellRenderer<AnyCell<V>> for StaticCellRenderer {
    type Visual = V;

    fn render(&mut self, item: &AnyCell<V>, size: Size) -> V {
        item.render(size)
    }
}

/// An ordered list of heterogeneous, pre-built children.
///
/// ```
/// use kurbo::Size;
/// use understory_collection::StaticCells;
///
/// #[derive(Debug, PartialEq)]
/// enum Visual {
///     Label(&'static str),
///     Swatch(u32, f64),
/// }
///
/// let cells = StaticCells::new()
///     .cell(|_| Visual::Label("title"))
///     .cell(|size: Size| Visual::Swatch(0xff0000, size.width));
/// assert_eq!(cells.len(), 2);
/// ```
pub struct StaticCells<V> {
    cells: Vec<AnyCell<V>>,
}

impl<V> StaticCells<V> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Appends a child.
    #[must_use]
    pub fn cell(mut self, build: impl Fn(Size) -> V + 'static) -> Self {
        self.cells.push(AnyCell::new(build));
        self
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if there are no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Consumes the list and returns the erased cells.
    #[must_use]
    pub fn into_vec(self) -> Vec<AnyCell<V>> {
        self.cells
    }
}

impl<V> Default for StaticCells<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FromIterator<AnyCell<V>> for StaticCells<V> {
    fn from_iter<I: IntoIterator<Item = AnyCell<V>>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<V> Debug for StaticCells<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCells")
            .field("len", &self.cells.len())
            .finish_non_exhaustive()
    }
}
