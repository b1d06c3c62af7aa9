//! # memory-match
//!
//! Engine for a tile-matching memory puzzle.
//!
//! A board of cells, some playable, hides an image under each tile. The
//! player turns up two tiles at a time: matching images stay face-up,
//! mismatches are flagged and flip back after a short delay. When every
//! tile is matched the host is told, once.
//!
//! ## Design Principles
//!
//! 1. **Renderer-agnostic**: the engine owns rules, timing and randomness.
//!    Drawing, assets and animation belong to the host.
//!
//! 2. **One mutation path**: state changes only through a click or a fired
//!    timer, both handled by `SelectionStateMachine`.
//!
//! 3. **Inert stale work**: timers carry their session id and are dropped
//!    once that session is retired.
//!
//! 4. **Reproducible deals**: shuffling goes through `RandomSource`; the
//!    default is a seeded ChaCha8 stream.
//!
//! ## Modules
//!
//! - `core`: ids, RNG, configuration, errors, game state and snapshots
//! - `board`: the cell grid and the shipped heart layout
//! - `deck`: pair-deck generation
//! - `timing`: session-scoped timers on a virtual clock
//! - `rules`: selection state machine and win detection
//! - `engine`: session lifecycle and the renderer-facing surface

pub mod core;
pub mod board;
pub mod deck;
pub mod timing;
pub mod rules;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    TileId, ImageId, SessionId,
    GameRng, RandomSource, ScriptedSource,
    EngineConfig,
    EngineError, LayoutError, Result,
    GameState, Snapshot, TileState, TileView,
};

pub use crate::board::{BoardLayout, Cell};

pub use crate::deck::{Deck, DeckGenerator};

pub use crate::timing::{Scheduler, Timer, TimerKind, TimerQueue};

pub use crate::rules::{ClickOutcome, IgnoreReason, SelectionStateMachine, WinDetector};

pub use crate::engine::{Engine, SessionHandle};
