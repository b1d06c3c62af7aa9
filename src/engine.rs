//! Session-owning engine: the surface a renderer talks to.
//!
//! ## Lifecycle
//!
//! 1. `start_game` deals a deck for a layout and returns a `SessionHandle`
//! 2. the renderer forwards clicks with `click` and draws from `snapshot`
//! 3. the host advances time with `advance` (or delivers timers through
//!    `fire`) so mismatches resolve
//! 4. the `on_win` collaborator runs once when every tile is matched
//!
//! Starting another game or calling `end_game` retires the session: its
//! timers are cancelled, and any handle or timer still referring to it
//! becomes inert.
//!
//! ## Example
//!
//! ```
//! use std::time::Duration;
//! use memory_match::{BoardLayout, Engine, EngineConfig, ImageId, TileId};
//!
//! let mut engine = Engine::new(EngineConfig::new(42));
//! let session = engine
//!     .start_game(&ImageId::sequence(18), BoardLayout::heart())
//!     .unwrap();
//!
//! engine.click(session, TileId::new(0));
//! let snapshot = engine.snapshot(session).unwrap();
//! assert_eq!(snapshot.selected.as_slice(), &[TileId::new(0)]);
//!
//! engine.advance(Duration::from_millis(1200));
//! ```

use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::board::BoardLayout;
use crate::core::{
    EngineConfig, EngineError, GameRng, ImageId, RandomSource, Result, SessionId, Snapshot, TileId,
};
use crate::deck::{Deck, DeckGenerator};
use crate::rules::{ClickOutcome, IgnoreReason, SelectionStateMachine, WinDetector};
use crate::timing::{SessionScheduler, Timer, TimerQueue};

/// Opaque reference to one game session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle {
    id: SessionId,
}

impl SessionHandle {
    #[must_use]
    pub fn id(self) -> SessionId {
        self.id
    }
}

/// Everything owned by one game.
#[derive(Debug)]
struct Session {
    id: SessionId,
    layout: BoardLayout,
    machine: SelectionStateMachine,
    win: WinDetector,
}

impl Session {
    fn snapshot(&self) -> Snapshot {
        self.machine.state().snapshot(self.id, self.win.has_won())
    }
}

/// The matching-game engine.
///
/// Single-threaded: every mutation happens inside a `&mut self` call made
/// by the host's event loop, in the order the host makes them.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    rng: GameRng,
    timers: TimerQueue,
    last_session: SessionId,
    session: Option<Session>,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            rng: GameRng::new(config.seed),
            config,
            timers: TimerQueue::new(),
            last_session: SessionId::new(0),
            session: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // === Sessions ===

    /// Deal a new game, shuffling with the engine's seeded RNG.
    ///
    /// Each call forks a fresh stream, so the n-th game of an engine with a
    /// given seed always deals the same deck. On error the current session
    /// is left untouched.
    pub fn start_game(&mut self, pool: &[ImageId], layout: BoardLayout) -> Result<SessionHandle> {
        let mut rng = self.rng.fork();
        self.start_game_with_rng(pool, layout, &mut rng)
    }

    /// Deal a new game with a caller-supplied random source.
    pub fn start_game_with_rng<R: RandomSource + ?Sized>(
        &mut self,
        pool: &[ImageId],
        layout: BoardLayout,
        rng: &mut R,
    ) -> Result<SessionHandle> {
        let deck = DeckGenerator::new(layout.playable_count()).generate(
            pool,
            layout.pairs_needed(),
            rng,
        )?;
        Ok(self.install(layout, deck))
    }

    /// Start a game on a pre-dealt deck, e.g. a replay.
    ///
    /// The deck must cover exactly the layout's playable tiles.
    pub fn start_game_with_deck(&mut self, layout: BoardLayout, deck: Deck) -> Result<SessionHandle> {
        if deck.len() != layout.playable_count() {
            return Err(EngineError::PairCountMismatch {
                pairs: deck.len() / 2,
                playable: layout.playable_count(),
            });
        }
        deck.validate()?;
        Ok(self.install(layout, deck))
    }

    fn install(&mut self, layout: BoardLayout, deck: Deck) -> SessionHandle {
        self.end_game();

        let id = self.last_session.next();
        self.last_session = id;

        let playable = layout.playable_count();
        debug!("Started {} with {} tiles", id, playable);
        self.session = Some(Session {
            id,
            layout,
            machine: SelectionStateMachine::new(deck, &self.config),
            win: WinDetector::new(playable),
        });
        SessionHandle { id }
    }

    /// Retire the current session and release its timers.
    pub fn end_game(&mut self) {
        if let Some(old) = self.session.take() {
            let dropped = self.timers.cancel_session(old.id);
            debug!("Ended {} ({} pending timers released)", old.id, dropped);
        }
    }

    /// Handle of the live session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<SessionHandle> {
        self.session.as_ref().map(|s| SessionHandle { id: s.id })
    }

    fn session(&self, handle: SessionHandle) -> Result<&Session> {
        self.session
            .as_ref()
            .filter(|s| s.id == handle.id)
            .ok_or(EngineError::StaleSession(handle.id))
    }

    fn session_mut(&mut self, handle: SessionHandle) -> Result<&mut Session> {
        self.session
            .as_mut()
            .filter(|s| s.id == handle.id)
            .ok_or(EngineError::StaleSession(handle.id))
    }

    // === Renderer surface ===

    /// Forward a player's click. Never fails; see [`ClickOutcome`].
    pub fn click(&mut self, handle: SessionHandle, tile: TileId) -> ClickOutcome {
        let Some(session) = self.session.as_mut().filter(|s| s.id == handle.id) else {
            return ClickOutcome::Ignored(IgnoreReason::StaleSession);
        };
        if !session.layout.is_playable(tile) {
            trace!("Ignored click on {}: not on the board", tile);
            return ClickOutcome::Ignored(IgnoreReason::NotPlayable);
        }

        let mut scheduler = SessionScheduler::new(&mut self.timers, session.id);
        let outcome = session.machine.click(tile, &mut scheduler);
        if outcome.has_update() {
            session.win.observe(session.machine.state().matched_count());
        }
        outcome
    }

    /// Read-only view for drawing.
    pub fn snapshot(&self, handle: SessionHandle) -> Result<Snapshot> {
        Ok(self.session(handle)?.snapshot())
    }

    /// Register the collaborator to run once when the game is won.
    ///
    /// The callback runs inside the engine call that completed the game, so
    /// it must not call back into the engine synchronously.
    pub fn on_win(&mut self, handle: SessionHandle, callback: impl FnOnce() + 'static) -> Result<()> {
        self.session_mut(handle)?.win.on_win(callback);
        Ok(())
    }

    pub fn layout(&self, handle: SessionHandle) -> Result<&BoardLayout> {
        Ok(&self.session(handle)?.layout)
    }

    /// The session's deck, for looking up which image a face-up tile shows.
    pub fn deck(&self, handle: SessionHandle) -> Result<&Deck> {
        Ok(self.session(handle)?.machine.deck())
    }

    pub fn has_won(&self, handle: SessionHandle) -> Result<bool> {
        Ok(self.session(handle)?.win.has_won())
    }

    // === Time ===

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// When the next timer is due, for hosts that arm one real timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Timers armed and not yet fired, earliest first.
    pub fn pending_timers(&self) -> impl Iterator<Item = &Timer> {
        self.timers.pending()
    }

    /// Move the clock forward, firing every timer that comes due in
    /// deadline order. Returns how many changed state.
    ///
    /// The clock saturates at `Duration::MAX`.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let deadline = self.timers.now().saturating_add(elapsed);
        let mut applied = 0;
        while let Some(timer) = self.timers.pop_due(deadline) {
            if self.apply(timer) {
                applied += 1;
            }
        }
        applied
    }

    /// Deliver one timer from a host-owned scheduler.
    ///
    /// Timers from a retired session, or that already fired, are dropped.
    /// Returns whether state changed.
    pub fn fire(&mut self, timer: Timer) -> bool {
        if !self.is_current(timer.session) {
            debug!("Dropped {} from retired {}", timer.id, timer.session);
            return false;
        }
        match self.timers.take(&timer) {
            Some(timer) => self.apply(timer),
            None => {
                debug!("Dropped {}: no longer pending", timer.id);
                false
            }
        }
    }

    fn is_current(&self, session: SessionId) -> bool {
        self.session.as_ref().is_some_and(|s| s.id == session)
    }

    fn apply(&mut self, timer: Timer) -> bool {
        let Some(session) = self.session.as_mut().filter(|s| s.id == timer.session) else {
            debug!("Dropped {} from retired {}", timer.id, timer.session);
            return false;
        };

        trace!("Firing {} at {:?}: {:?}", timer.id, timer.due, timer.kind);
        let mut scheduler = SessionScheduler::new(&mut self.timers, session.id);
        let changed = session.machine.handle_timer(timer.kind, &mut scheduler);
        if changed {
            session.win.observe(session.machine.state().matched_count());
        }
        changed
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
