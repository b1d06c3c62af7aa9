//! One-shot win detection.

use log::info;

type WinCallback = Box<dyn FnOnce()>;

/// Fires a callback the first time every playable tile is matched.
///
/// The callback is `FnOnce` and is taken out when invoked, so no number of
/// later observations can call it again. A callback registered after the
/// win has already been observed runs immediately.
pub struct WinDetector {
    target: usize,
    won: bool,
    callback: Option<WinCallback>,
}

impl WinDetector {
    /// Detector for a board with `target` playable tiles.
    #[must_use]
    pub fn new(target: usize) -> Self {
        Self {
            target,
            won: false,
            callback: None,
        }
    }

    #[must_use]
    pub fn has_won(&self) -> bool {
        self.won
    }

    /// Register the collaborator to call on win, replacing any earlier one
    /// that has not fired yet.
    pub fn on_win(&mut self, callback: impl FnOnce() + 'static) {
        self.callback = Some(Box::new(callback));
        if self.won {
            self.notify();
        }
    }

    /// Observe the matched count after a mutation.
    ///
    /// Returns true only on the observation where the game became won.
    pub fn observe(&mut self, matched: usize) -> bool {
        if self.won || matched != self.target {
            return false;
        }
        self.won = true;
        info!("All {} tiles matched", self.target);
        self.notify();
        true
    }

    fn notify(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback();
        }
    }
}

impl std::fmt::Debug for WinDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WinDetector")
            .field("target", &self.target)
            .field("won", &self.won)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}
