//! Pair-deck generation.

use log::debug;

use crate::core::{EngineError, ImageId, RandomSource, Result, TileId};

use super::Deck;

/// Deals images onto a board of a fixed playable size.
///
/// ## Algorithm
///
/// 1. Choose `pairs_needed` images by cycling through the pool
///    (`pool[i % pool.len()]`), so every pool entry is used as evenly as
///    possible.
/// 2. Expand each chosen image into two entries.
/// 3. Fisher-Yates shuffle the `N` entries with the supplied source.
/// 4. Slot `i` gets entry `i`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeckGenerator {
    playable_count: usize,
}

impl DeckGenerator {
    #[must_use]
    pub fn new(playable_count: usize) -> Self {
        Self { playable_count }
    }

    #[must_use]
    pub fn playable_count(&self) -> usize {
        self.playable_count
    }

    /// Deal a deck.
    ///
    /// Fails if the pool is empty, the playable count exceeds
    /// [`TileId::MAX_COUNT`], or `pairs_needed * 2` is not the playable
    /// count. A pool smaller than `pairs_needed` is reused.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        pool: &[ImageId],
        pairs_needed: usize,
        rng: &mut R,
    ) -> Result<Deck> {
        if pool.is_empty() {
            return Err(EngineError::EmptyImagePool);
        }
        if self.playable_count > TileId::MAX_COUNT {
            return Err(EngineError::TooManyTiles {
                tiles: self.playable_count,
                max: TileId::MAX_COUNT,
            });
        }
        if pairs_needed == 0 || pairs_needed * 2 != self.playable_count {
            return Err(EngineError::PairCountMismatch {
                pairs: pairs_needed,
                playable: self.playable_count,
            });
        }
        if pool.len() < pairs_needed {
            debug!(
                "Image pool has {} entries for {} pairs, reusing images",
                pool.len(),
                pairs_needed
            );
        }

        let mut images: Vec<ImageId> = (0..pairs_needed)
            .map(|i| pool[i % pool.len()])
            .flat_map(|image| [image, image])
            .collect();

        shuffle(&mut images, rng);

        debug!("Dealt {} tiles from {} pool images", images.len(), pool.len());
        Ok(Deck::new_unchecked(images))
    }
}

/// Unbiased in-place Fisher-Yates shuffle.
///
/// Walks from the last index down, swapping each position with a uniform
/// draw from the not-yet-fixed prefix. Draws `len - 1` values.
pub fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below(i + 1);
        items.swap(i, j);
    }
}
