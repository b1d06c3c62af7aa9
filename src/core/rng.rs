//! Injectable randomness for deck shuffling.
//!
//! ## Key Types
//!
//! - **`RandomSource`**: the one capability the shuffle needs, a uniform
//!   draw from `0..bound`
//! - **`GameRng`**: seeded ChaCha8 generator, forked once per session
//! - **`ScriptedSource`**: replays a fixed list of draws for tests
//!
//! ```
//! use memory_match::core::{GameRng, RandomSource};
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//! assert_eq!(a.next_below(100), b.next_below(100));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform draws.
///
/// `next_below(bound)` must return a value in `0..bound`. Callers never
/// pass `bound == 0`.
pub trait RandomSource {
    fn next_below(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_below(&mut self, bound: usize) -> usize {
        (**self).next_below(bound)
    }
}

/// Deterministic RNG.
///
/// Uses ChaCha8 so the same seed deals the same decks on every platform.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// The n-th fork of a given seed is always the same stream, so the
    /// n-th session of an engine deals the same deck on replay.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn next_below(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }
}

/// Replays a fixed sequence of draws.
///
/// Each draw is reduced modulo the requested bound so any script is valid.
/// The script wraps around when exhausted; an empty script always draws 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    draws: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(draws: Vec<usize>) -> Self {
        Self { draws, cursor: 0 }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub fn draws_taken(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_below(&mut self, bound: usize) -> usize {
        let raw = if self.draws.is_empty() {
            0
        } else {
            self.draws[self.cursor % self.draws.len()]
        };
        self.cursor += 1;
        raw % bound
    }
}
