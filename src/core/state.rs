//! Game state: selection, matched set and mismatch flag.
//!
//! ## GameState
//!
//! The mutable core of one session. Only the selection state machine and
//! its timers mutate it; everything else reads a `Snapshot`.
//!
//! ## Snapshot
//!
//! Read-only view handed to the renderer. `matched` is an `im::OrdSet`, so
//! taking a snapshot is O(1) regardless of how far the game has progressed.

use im::OrdSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::ids::{SessionId, TileId};

/// At most two tiles are ever selected or flagged at once.
pub type TilePair = SmallVec<[TileId; 2]>;

/// Per-tile state derived from the session sets.
///
/// The mismatch flag overlays these and is queried separately with
/// [`GameState::is_flagged`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileState {
    Hidden,
    Selected,
    Matched,
}

/// Mutable state for one session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GameState {
    selected: TilePair,
    matched: OrdSet<TileId>,
    incorrect: TilePair,
}

impl GameState {
    /// Create an empty state: nothing selected, matched or flagged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tiles face-up by player action, in click order.
    #[must_use]
    pub fn selected(&self) -> &[TileId] {
        &self.selected
    }

    #[must_use]
    pub fn matched(&self) -> &OrdSet<TileId> {
        &self.matched
    }

    /// The pair from the most recent mismatch while its flag is up.
    #[must_use]
    pub fn incorrect(&self) -> &[TileId] {
        &self.incorrect
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// True while two tiles are face-up awaiting resolution.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.selected.len() == 2
    }

    #[must_use]
    pub fn is_selected(&self, tile: TileId) -> bool {
        self.selected.contains(&tile)
    }

    #[must_use]
    pub fn is_matched(&self, tile: TileId) -> bool {
        self.matched.contains(&tile)
    }

    #[must_use]
    pub fn is_flagged(&self, tile: TileId) -> bool {
        self.incorrect.contains(&tile)
    }

    #[must_use]
    pub fn tile_state(&self, tile: TileId) -> TileState {
        if self.is_matched(tile) {
            TileState::Matched
        } else if self.is_selected(tile) {
            TileState::Selected
        } else {
            TileState::Hidden
        }
    }

    /// Capture a read-only view of this state.
    #[must_use]
    pub fn snapshot(&self, session: SessionId, won: bool) -> Snapshot {
        Snapshot {
            session,
            selected: self.selected.clone(),
            matched: self.matched.clone(),
            incorrect: self.incorrect.clone(),
            resolving: self.is_resolving(),
            won,
        }
    }

    // === Transitions (driven by the selection state machine) ===

    pub(crate) fn select(&mut self, tile: TileId) {
        debug_assert!(self.selected.len() < 2);
        self.selected.push(tile);
    }

    /// Move the selected pair into the matched set.
    pub(crate) fn confirm_match(&mut self) {
        for tile in self.selected.drain(..) {
            self.matched.insert(tile);
        }
    }

    pub(crate) fn flag(&mut self, first: TileId, second: TileId) {
        self.incorrect.clear();
        self.incorrect.push(first);
        self.incorrect.push(second);
    }

    pub(crate) fn clear_incorrect(&mut self) {
        self.incorrect.clear();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected.clear();
    }
}

/// Renderer-facing view of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub session: SessionId,
    pub selected: TilePair,
    pub matched: OrdSet<TileId>,
    pub incorrect: TilePair,
    /// Two tiles are face-up and clicks are blocked until they resolve.
    pub resolving: bool,
    pub won: bool,
}

impl Snapshot {
    /// How one tile should be drawn.
    #[must_use]
    pub fn tile(&self, tile: TileId) -> TileView {
        let matched = self.matched.contains(&tile);
        TileView {
            face_up: matched || self.selected.contains(&tile),
            matched,
            flagged: self.incorrect.contains(&tile),
        }
    }

    /// Matched tiles in ascending id order.
    #[must_use]
    pub fn matched_tiles(&self) -> Vec<TileId> {
        self.matched.iter().copied().collect()
    }
}

/// Drawing state for one tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub face_up: bool,
    pub matched: bool,
    pub flagged: bool,
}
