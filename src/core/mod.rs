//! Core engine types: ids, RNG, configuration, errors, state.
//!
//! These are shared by the board, deck, rules and engine modules.

pub mod ids;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use ids::{ImageId, SessionId, TileId};
pub use rng::{GameRng, RandomSource, ScriptedSource};
pub use config::{EngineConfig, DEFAULT_RESET_DELAY, DEFAULT_REVEAL_DELAY};
pub use error::{EngineError, LayoutError, Result};
pub use state::{GameState, Snapshot, TilePair, TileState, TileView};
