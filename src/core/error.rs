//! Construction errors.
//!
//! Player input is never an error; ignored clicks are reported through
//! `ClickOutcome`. These variants cover misconfigured sessions and calls
//! against a session that has been torn down.

use thiserror::Error;

use super::ids::{ImageId, SessionId, TileId};

/// Why a board layout was rejected.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("board has no playable tiles")]
    NoPlayableTiles,
    #[error("{0} appears more than once")]
    DuplicateTile(TileId),
    #[error("tile ids must be contiguous from 0, missing {0}")]
    MissingTile(TileId),
    #[error("playable tile count {0} is odd")]
    OddTileCount(usize),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("image pool is empty")]
    EmptyImagePool,
    #[error("{pairs} pairs do not fill {playable} playable tiles")]
    PairCountMismatch { pairs: usize, playable: usize },
    #[error("invalid board layout: {0}")]
    InvalidLayout(#[from] LayoutError),
    #[error("{tiles} tiles exceed the addressable maximum of {max}")]
    TooManyTiles { tiles: usize, max: usize },
    #[error("{image} fills {count} tiles, which is not a whole number of pairs")]
    UnpairedImage { image: ImageId, count: usize },
    #[error("{0} is no longer the active session")]
    StaleSession(SessionId),
}

pub type Result<T> = std::result::Result<T, EngineError>;
