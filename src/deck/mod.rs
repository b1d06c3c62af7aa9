//! Decks: which image sits under each tile.
//!
//! ## Key Types
//!
//! - `Deck`: slot-ordered image assignment for one session
//! - `DeckGenerator`: cycles an image pool into pairs and shuffles them
//!
//! ## Invariant
//!
//! Every image in a deck fills an even number of slots. When the pool has
//! at least `N / 2` entries that number is exactly two; smaller pools are
//! cycled, so some images fill two pairs' worth of slots. Any two slots
//! showing the same image match.

mod generator;

pub use generator::{shuffle, DeckGenerator};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, ImageId, Result, TileId};

/// Slot-to-image assignment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    images: Vec<ImageId>,
}

impl Deck {
    /// Build a deck from an explicit assignment, slot `i` taking `images[i]`.
    ///
    /// Fails if any image fills an odd number of slots.
    pub fn from_images(images: Vec<ImageId>) -> Result<Self> {
        let deck = Self::new_unchecked(images);
        deck.validate()?;
        Ok(deck)
    }

    pub(crate) fn new_unchecked(images: Vec<ImageId>) -> Self {
        Self { images }
    }

    /// Check that every tile is addressable and every image fills a whole
    /// number of pairs.
    pub fn validate(&self) -> Result<()> {
        if self.images.len() > TileId::MAX_COUNT {
            return Err(EngineError::TooManyTiles {
                tiles: self.images.len(),
                max: TileId::MAX_COUNT,
            });
        }
        let mut counts: Vec<(ImageId, usize)> = self.pair_counts().into_iter().collect();
        counts.sort_unstable();
        match counts.into_iter().find(|&(_, count)| count % 2 != 0) {
            Some((image, count)) => Err(EngineError::UnpairedImage { image, count }),
            None => Ok(()),
        }
    }

    /// Number of assigned slots, `N`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image under a tile, `None` for ids outside the deck.
    #[must_use]
    pub fn image(&self, tile: TileId) -> Option<ImageId> {
        self.images.get(tile.index()).copied()
    }

    /// All images in slot order.
    #[must_use]
    pub fn images(&self) -> &[ImageId] {
        &self.images
    }

    /// True if both tiles exist and show the same image.
    #[must_use]
    pub fn is_match(&self, a: TileId, b: TileId) -> bool {
        match (self.image(a), self.image(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Other tiles showing the same image as `tile`.
    pub fn partners(&self, tile: TileId) -> impl Iterator<Item = TileId> + '_ {
        let image = self.image(tile);
        TileId::all(self.images.len())
            .filter(move |&other| other != tile && self.image(other) == image)
    }

    /// Slots filled per image.
    #[must_use]
    pub fn pair_counts(&self) -> FxHashMap<ImageId, usize> {
        let mut counts = FxHashMap::default();
        for &image in &self.images {
            *counts.entry(image).or_insert(0) += 1;
        }
        counts
    }
}
