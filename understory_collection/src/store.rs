// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered item storage with positional moves.

use alloc::vec::Vec;

use crate::CollectionError;

/// An ordered sequence of items identified by position.
///
/// Items are opaque to the store. Identity is the index: a move shifts every
/// item between the source and destination by one slot and nothing else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemStore<T> {
    items: Vec<T>,
}

impl<T> ItemStore<T> {
    /// Creates a store from an initial sequence.
    #[must_use]
    pub const fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at `index`.
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        self.items
            .get(index)
            .ok_or(CollectionError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })
    }

    /// All items in order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over the items in order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Moves the item at `from` so that it ends up at `to`.
    ///
    /// This is a single remove followed by an insert: items strictly between
    /// the two positions shift one slot toward `from`. Moving an item onto
    /// its own position is a no-op. Both indices must be in `0..len`; on
    /// error the store is unchanged.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), CollectionError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(CollectionError::IndexOutOfRange { index, len });
            }
        }
        if from < to {
            self.items[from..=to].rotate_left(1);
        } else if to < from {
            self.items[to..=from].rotate_right(1);
        }
        Ok(())
    }

    /// Replaces every item. No per-item change tracking is attempted.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Consumes the store and returns its items.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> FromIterator<T> for ItemStore<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a ItemStore<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::ItemStore;
    use crate::CollectionError;
    use alloc::vec;

    #[test]
    fn move_forward_shifts_intermediate_items_back() {
        let mut store = ItemStore::new(vec!['A', 'B', 'C', 'D']);
        store.move_item(0, 2).unwrap();
        assert_eq!(store.as_slice(), &['B', 'C', 'A', 'D']);
    }

    #[test]
    fn move_backward_shifts_intermediate_items_forward() {
        let mut store = ItemStore::new(vec!['A', 'B', 'C', 'D']);
        store.move_item(3, 1).unwrap();
        assert_eq!(store.as_slice(), &['A', 'D', 'B', 'C']);
    }

    #[test]
    fn inverse_move_restores_order() {
        let mut store = ItemStore::new(vec![1, 2, 3, 4, 5]);
        store.move_item(1, 4).unwrap();
        store.move_item(4, 1).unwrap();
        assert_eq!(store.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn self_move_is_a_no_op() {
        let mut store = ItemStore::new(vec![1, 2, 3]);
        store.move_item(1, 1).unwrap();
        assert_eq!(store.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn out_of_range_is_rejected_without_mutation() {
        let mut store = ItemStore::new(vec![1, 2, 3]);
        assert_eq!(
            store.move_item(0, 3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            store.move_item(7, 0),
            Err(CollectionError::IndexOutOfRange { index: 7, len: 3 })
        );
        assert_eq!(store.as_slice(), &[1, 2, 3]);
        assert_eq!(
            store.get(3),
            Err(CollectionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(store.get(2), Ok(&3));
    }

    #[test]
    fn replace_all_resets_length() {
        let mut store: ItemStore<u8> = [1, 2, 3].into_iter().collect();
        store.replace_all(vec![9]);
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(1),
            Err(CollectionError::IndexOutOfRange { index: 1, len: 1 })
        );
        store.replace_all(vec![]);
        assert!(store.is_empty());
    }
}
