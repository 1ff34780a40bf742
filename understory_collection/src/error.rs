// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the store, the reorder controller, and the collection.

use understory_flow_layout::ConfigError;

/// Errors reported by collection operations.
///
/// A failed operation never leaves partial state behind: the store and the
/// active configuration are exactly as they were before the call.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
pub enum CollectionError {
    /// A position outside `0..len` was used.
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange {
        /// Rejected position.
        index: usize,
        /// Store length at the time of the call.
        len: usize,
    },
    /// A configuration update failed validation.
    #[error(transparent)]
    InvalidConfiguration(#[from] ConfigError),
}
