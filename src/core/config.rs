//! Engine configuration.
//!
//! The delays reproduce the pacing of the shipped game: a mismatched pair
//! stays face-up for 700 ms before it is flagged, and the flag and the
//! face-up display both clear 500 ms later.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default pause before a mismatched pair is flagged.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(700);

/// Default time the mismatch flag stays up before the pair flips back.
pub const DEFAULT_RESET_DELAY: Duration = Duration::from_millis(500);

/// Engine configuration.
///
/// ```
/// use std::time::Duration;
/// use memory_match::core::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_seed(7)
///     .with_reveal_delay(Duration::from_millis(300));
/// assert_eq!(config.seed, 7);
/// assert_eq!(config.reset_delay, Duration::from_millis(500));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for deck shuffling. Each session forks its own stream.
    pub seed: u64,

    /// Time a mismatched pair stays face-up before it is flagged.
    pub reveal_delay: Duration,

    /// Time from flagging until the flag and the selection clear.
    pub reset_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            reveal_delay: DEFAULT_REVEAL_DELAY,
            reset_delay: DEFAULT_RESET_DELAY,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::default().with_seed(seed)
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    #[must_use]
    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.seed, 0);
        assert_eq!(config.reveal_delay, Duration::from_millis(700));
        assert_eq!(config.reset_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new(9)
            .with_reveal_delay(Duration::from_millis(10))
            .with_reset_delay(Duration::from_millis(20));

        assert_eq!(config.seed, 9);
        assert_eq!(config.reveal_delay, Duration::from_millis(10));
        assert_eq!(config.reset_delay, Duration::from_millis(20));
    }

    #[test]
    fn test_config_serde() {
        let config = EngineConfig::new(42);
        let json = serde_json::to_string(&config).unwrap();
        let restored: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
    }
}
