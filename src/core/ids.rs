//! Identifier newtypes.
//!
//! ## Layout
//!
//! - `TileId`: a playable slot on the board, `0..playable_count`
//! - `ImageId`: an opaque image reference; the renderer maps it to an asset
//! - `SessionId`: generation counter for one game session
//!
//! ```
//! use memory_match::core::{ImageId, TileId};
//!
//! let tile = TileId::new(3);
//! assert_eq!(tile.index(), 3);
//!
//! let pool = ImageId::sequence(18);
//! assert_eq!(pool.len(), 18);
//! assert_eq!(pool[17], ImageId::new(17));
//! ```

use serde::{Deserialize, Serialize};

/// Playable slot identifier.
///
/// Tile ids on a valid board form the contiguous range `0..N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    /// Most playable slots a board can address.
    pub const MAX_COUNT: usize = u16::MAX as usize + 1;

    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into slot-ordered storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all tile IDs for a board with `count` playable slots.
    ///
    /// Stops at `u16::MAX`; counts above [`MAX_COUNT`](Self::MAX_COUNT)
    /// are rejected when a deck is built.
    pub fn all(count: usize) -> impl Iterator<Item = TileId> {
        (0..=u16::MAX).take(count).map(TileId)
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Image identifier.
///
/// The engine only compares images for equality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageId(pub u32);

impl ImageId {
    /// Create a new image ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Build a pool of `count` distinct images, `ImageId(0)..ImageId(count)`.
    #[must_use]
    pub fn sequence(count: u32) -> Vec<ImageId> {
        (0..count).map(ImageId).collect()
    }
}

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Image({})", self.0)
    }
}

/// Game session generation.
///
/// Every `start_game` allocates a fresh id. Timers carry the id of the
/// session that armed them and are dropped if it is no longer current.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// The id of the session after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Session({})", self.0)
    }
}
