//! Two-at-a-time selection rules.
//!
//! ## Click preconditions
//!
//! Checked in order; the first that holds makes the click a no-op:
//!
//! 1. the tile is not playable
//! 2. two tiles are already face-up awaiting resolution
//! 3. the tile is already selected or already matched
//!
//! ## Transitions
//!
//! - nothing selected: the tile becomes the first selection
//! - one selected, same image: both move to `matched` immediately
//! - one selected, different image: both stay face-up; after the reveal
//!   delay they are flagged, and after the reset delay the flag and the
//!   selection clear together
//!
//! Clicks stay blocked for the whole mismatch window because two tiles
//! remain selected until the final reset fires.

use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::core::{EngineConfig, GameState, TileId};
use crate::deck::Deck;
use crate::timing::{Scheduler, TimerKind};

/// Why a click was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Not a tile slot on this board.
    NotPlayable,
    /// A pair is face-up and has not resolved yet.
    Resolving,
    AlreadySelected,
    AlreadyMatched,
    /// The session handle no longer refers to the current game.
    StaleSession,
}

/// Result of a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First tile of a pair turned face-up.
    Selected(TileId),
    /// The pair matched and is now permanently face-up.
    Matched { first: TileId, second: TileId },
    /// The pair differs; the timed reset has been scheduled.
    Mismatched { first: TileId, second: TileId },
}

impl ClickOutcome {
    /// True if the click changed game state.
    #[must_use]
    pub const fn has_update(self) -> bool {
        !matches!(self, ClickOutcome::Ignored(_))
    }
}

/// Selection state machine for one session.
///
/// Owns the session's `GameState` and `Deck`. State changes only through
/// [`click`](Self::click) and [`handle_timer`](Self::handle_timer).
#[derive(Clone, Debug)]
pub struct SelectionStateMachine {
    state: GameState,
    deck: Deck,
    reveal_delay: Duration,
    reset_delay: Duration,
}

impl SelectionStateMachine {
    /// Fresh state bound to `deck`. Tile `i` is playable iff `i < deck.len()`.
    #[must_use]
    pub fn new(deck: Deck, config: &EngineConfig) -> Self {
        Self {
            state: GameState::new(),
            deck,
            reveal_delay: config.reveal_delay,
            reset_delay: config.reset_delay,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.deck.len()
    }

    /// True once every tile is matched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state.matched_count() == self.playable_count()
    }

    /// Check the click preconditions without changing anything.
    #[must_use]
    pub fn check_click(&self, tile: TileId) -> Option<IgnoreReason> {
        if tile.index() >= self.playable_count() {
            Some(IgnoreReason::NotPlayable)
        } else if self.state.is_resolving() {
            Some(IgnoreReason::Resolving)
        } else if self.state.is_selected(tile) {
            Some(IgnoreReason::AlreadySelected)
        } else if self.state.is_matched(tile) {
            Some(IgnoreReason::AlreadyMatched)
        } else {
            None
        }
    }

    /// Apply a player's click.
    ///
    /// A mismatch asks `scheduler` for one `FlagMismatch` timer after the
    /// reveal delay; nothing else is scheduled here.
    pub fn click(&mut self, tile: TileId, scheduler: &mut impl Scheduler) -> ClickOutcome {
        if let Some(reason) = self.check_click(tile) {
            trace!("Ignored click on {}: {:?}", tile, reason);
            return ClickOutcome::Ignored(reason);
        }

        let Some(&first) = self.state.selected().first() else {
            self.state.select(tile);
            trace!("Selected {}", tile);
            return ClickOutcome::Selected(tile);
        };

        self.state.select(tile);
        if self.deck.is_match(first, tile) {
            self.state.confirm_match();
            debug!(
                "Matched {} and {} ({}/{} tiles)",
                first,
                tile,
                self.state.matched_count(),
                self.playable_count()
            );
            ClickOutcome::Matched { first, second: tile }
        } else {
            debug!("Mismatched {} and {}", first, tile);
            scheduler.schedule(
                self.reveal_delay,
                TimerKind::FlagMismatch { first, second: tile },
            );
            ClickOutcome::Mismatched { first, second: tile }
        }
    }

    /// Apply a fired timer. Returns whether state changed.
    ///
    /// Flagging arms the two reset timers, both after the reset delay.
    pub fn handle_timer(&mut self, kind: TimerKind, scheduler: &mut impl Scheduler) -> bool {
        match kind {
            TimerKind::FlagMismatch { first, second } => {
                if self.state.selected() != [first, second] {
                    debug!("Dropped mismatch flag for {} and {}: selection changed", first, second);
                    return false;
                }
                self.state.flag(first, second);
                scheduler.schedule(self.reset_delay, TimerKind::ClearIncorrect);
                scheduler.schedule(self.reset_delay, TimerKind::ClearSelection);
                true
            }
            TimerKind::ClearIncorrect => {
                let changed = !self.state.incorrect().is_empty();
                self.state.clear_incorrect();
                changed
            }
            TimerKind::ClearSelection => {
                let changed = !self.state.selected().is_empty();
                self.state.clear_selection();
                changed
            }
        }
    }
}
