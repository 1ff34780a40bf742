// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag/drop reorder state machine.
//!
//! A [`ReorderController`] turns the three phases of a drag/drop interaction
//! into at most one [`ItemStore::move_item`] call:
//!
//! ```text
//! Idle ──begin_drag──▶ Dragging ──update_drag──▶ Proposing(Move | Forbidden)
//!   ▲                      │                          │
//!   └──────── drop / cancel ┴──────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. **Disabled**: `begin_drag` is a no-op while reordering is disabled.
//! 2. **Proposal**: `update_drag` proposes [`DropProposal::Move`] while a drag
//!    is active and [`DropProposal::Forbidden`] otherwise.
//! 3. **Destination**: the hovered position if any (clamped to the last
//!    position), else the last position in the store.
//! 4. **Drop**: a `Move` proposal performs exactly one store move and then
//!    notifies with the full post-move sequence. A `Forbidden` proposal is
//!    discarded. A drop with no active drag does nothing.
//! 5. **Cancel**: returns to idle with no mutation and no notification.
//!
//! ```
//! use understory_collection::{DropProposal, ItemStore, ReorderController, ReorderOutcome};
//!
//! let mut store = ItemStore::new(vec!['A', 'B', 'C', 'D']);
//! let mut reorder = ReorderController::new(true);
//!
//! reorder.begin_drag(0, store.len()).unwrap();
//! assert_eq!(reorder.update_drag(Some(2), store.len()), DropProposal::Move);
//!
//! let mut notified = Vec::new();
//! let outcome = reorder
//!     .drop(&mut store, |items| notified = items.to_vec())
//!     .unwrap();
//! assert_eq!(outcome, ReorderOutcome::Moved { from: 0, to: 2 });
//! assert_eq!(notified, ['B', 'C', 'A', 'D']);
//! ```

use crate::{CollectionError, ItemStore};

/// Whether dropping now would reorder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropProposal {
    /// Dropping moves the dragged item to the proposed destination.
    Move,
    /// Dropping does nothing.
    Forbidden,
}

/// Current phase of the drag/drop session.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// No drag is in progress.
    #[default]
    Idle,
    /// A drag started at `source` and has not hovered anywhere yet.
    Dragging {
        /// Position the drag started from.
        source: usize,
    },
    /// A drag is hovering and has a proposal.
    Proposing {
        /// Position the drag started from.
        source: usize,
        /// Position the item would move to.
        destination: usize,
        /// What a drop would do.
        proposal: DropProposal,
    },
}

impl DragPhase {
    /// Returns `true` while a drag session exists.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Source position of the active drag, if any.
    #[must_use]
    pub const fn source(&self) -> Option<usize> {
        match *self {
            Self::Idle => None,
            Self::Dragging { source } | Self::Proposing { source, .. } => Some(source),
        }
    }
}

/// What a call to [`ReorderController::drop`] did.
///
/// Hosts mirroring the store in a visible representation should apply
/// `Moved` as one batched remove+insert.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReorderOutcome {
    /// The item at `from` now lives at `to` and the reorder callback ran.
    Moved {
        /// Source position.
        from: usize,
        /// Destination position.
        to: usize,
    },
    /// The drop was forbidden; nothing changed.
    Discarded,
    /// No drag was active; nothing changed.
    Ignored,
}

/// Drag/drop reorder state machine over an [`ItemStore`].
///
/// The controller does not own the store. Callers pass it into
/// [`ReorderController::drop`], which is the only place a move happens; the
/// move and the notification run inside that single call, in that order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReorderController {
    enabled: bool,
    phase: DragPhase,
}

impl ReorderController {
    /// Creates an idle controller.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            phase: DragPhase::Idle,
        }
    }

    /// Whether drags are accepted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables reordering. Disabling cancels an active drag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.cancel();
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Starts a drag at `position` in a store of length `len`.
    ///
    /// Returns `Ok(false)` without changing state when reordering is disabled.
    /// Starting while a drag is active replaces that session.
    pub fn begin_drag(&mut self, position: usize, len: usize) -> Result<bool, CollectionError> {
        if !self.enabled {
            return Ok(false);
        }
        if position >= len {
            return Err(CollectionError::IndexOutOfRange {
                index: position,
                len,
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(source = position, len, "drag began");
        self.phase = DragPhase::Dragging { source: position };
        Ok(true)
    }

    /// Recomputes the proposal for the hovered position.
    ///
    /// `None` means the pointer is not over any cell; the destination then
    /// falls back to the last position in the store.
    pub fn update_drag(&mut self, hovered: Option<usize>, len: usize) -> DropProposal {
        let Some(source) = self.phase.source() else {
            return DropProposal::Forbidden;
        };
        let (destination, proposal) = match len.checked_sub(1) {
            Some(last) if source <= last => {
                (hovered.map_or(last, |h| h.min(last)), DropProposal::Move)
            }
            // The store shrank under the drag; nothing sensible to move.
            _ => (0, DropProposal::Forbidden),
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(source, destination, ?proposal, "drag hovered");
        self.phase = DragPhase::Proposing {
            source,
            destination,
            proposal,
        };
        proposal
    }

    /// Resolves the drag.
    ///
    /// With a `Move` proposal this moves the item in `store` and then calls
    /// `on_reorder` with the whole post-move sequence. A drag that never
    /// hovered drops at the last position. The controller is idle afterwards
    /// in every case, including errors; an error leaves `store` unchanged
    /// and skips the notification.
    pub fn drop<T>(
        &mut self,
        store: &mut ItemStore<T>,
        on_reorder: impl FnOnce(&[T]),
    ) -> Result<ReorderOutcome, CollectionError> {
        let (from, to) = match core::mem::take(&mut self.phase) {
            DragPhase::Idle => return Ok(ReorderOutcome::Ignored),
            DragPhase::Dragging { source } => match store.len().checked_sub(1) {
                Some(last) => (source, last),
                None => return Ok(ReorderOutcome::Discarded),
            },
            DragPhase::Proposing {
                proposal: DropProposal::Forbidden,
                ..
            } => {
                #[cfg(feature = "tracing")]
                tracing::debug!("drop discarded");
                return Ok(ReorderOutcome::Discarded);
            }
            DragPhase::Proposing {
                source,
                destination,
                proposal: DropProposal::Move,
            } => (source, destination),
        };

        if let Err(err) = store.move_item(from, to) {
            #[cfg(feature = "tracing")]
            tracing::warn!(from, to, %err, "drop rejected");
            return Err(err);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(from, to, "item moved");
        on_reorder(store.as_slice());
        Ok(ReorderOutcome::Moved { from, to })
    }

    /// Abandons the active drag without touching the store.
    ///
    /// Returns `true` if a drag was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.phase.is_active();
        #[cfg(feature = "tracing")]
        if was_active {
            tracing::debug!("drag cancelled");
        }
        self.phase = DragPhase::Idle;
        was_active
    }
}
