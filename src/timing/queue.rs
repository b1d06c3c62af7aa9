//! Virtual-clock timer queue.

use std::collections::BTreeMap;
use std::time::Duration;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::core::{SessionId, TileId};

/// Unique identifier for an armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl std::fmt::Display for TimerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Timer({})", self.0)
    }
}

/// What a timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// Raise the mismatch flag on a pair that is still face-up.
    FlagMismatch { first: TileId, second: TileId },
    /// Drop the mismatch flag.
    ClearIncorrect,
    /// Flip the selected pair back.
    ClearSelection,
}

/// A delayed callback owned by one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub session: SessionId,
    pub kind: TimerKind,
    /// Virtual time at which the timer fires.
    pub due: Duration,
}

/// Timers ordered by deadline on a virtual clock.
///
/// The clock only moves when the host says so. Timers with equal deadlines
/// fire in the order they were armed.
///
/// ```
/// use std::time::Duration;
/// use memory_match::core::SessionId;
/// use memory_match::timing::{TimerKind, TimerQueue};
///
/// let mut queue = TimerQueue::new();
/// queue.arm(Duration::from_millis(500), SessionId::new(1), TimerKind::ClearIncorrect);
///
/// let deadline = Duration::from_millis(400);
/// assert!(queue.pop_due(deadline).is_none());
///
/// let deadline = Duration::from_millis(500);
/// let timer = queue.pop_due(deadline).unwrap();
/// assert_eq!(timer.kind, TimerKind::ClearIncorrect);
/// assert_eq!(queue.now(), deadline);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), Timer>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Arm a timer `delay` after the current virtual time, saturating at
    /// `Duration::MAX`.
    pub fn arm(&mut self, delay: Duration, session: SessionId, kind: TimerKind) -> Timer {
        let id = TimerId(self.next_id);
        self.next_id += 1;

        let timer = Timer {
            id,
            session,
            kind,
            due: self.now.saturating_add(delay),
        };
        trace!("Armed {} for {} at {:?}: {:?}", id, session, timer.due, kind);
        self.pending.insert((timer.due, id), timer);
        timer
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|&(due, _)| due)
    }

    /// Remove and return the earliest timer due at or before `deadline`.
    ///
    /// The clock moves to the timer's deadline, so timers armed while
    /// handling it are scheduled relative to the moment it fired. When
    /// nothing is due the clock moves to `deadline`.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Timer> {
        match self.pending.first_key_value() {
            Some((&(due, _), _)) if due <= deadline => {
                let (_, timer) = self.pending.pop_first()?;
                self.now = self.now.max(timer.due);
                Some(timer)
            }
            _ => {
                self.now = self.now.max(deadline);
                None
            }
        }
    }

    /// Remove a specific pending timer, moving the clock to its deadline.
    ///
    /// Returns `None` if it already fired or was cancelled.
    pub fn take(&mut self, timer: &Timer) -> Option<Timer> {
        let taken = self.pending.remove(&(timer.due, timer.id))?;
        self.now = self.now.max(taken.due);
        Some(taken)
    }

    /// Drop every timer armed by `session`. Returns how many were dropped.
    pub fn cancel_session(&mut self, session: SessionId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, timer| timer.session != session);
        let dropped = before - self.pending.len();
        if dropped > 0 {
            trace!("Cancelled {} timers for {}", dropped, session);
        }
        dropped
    }

    /// Timers still waiting, earliest first.
    pub fn pending(&self) -> impl Iterator<Item = &Timer> {
        self.pending.values()
    }
}
