//! Session-scoped timers.
//!
//! A mismatch resolves over two delays. Rather than holding closures, the
//! engine arms plain `Timer` values tagged with the `SessionId` that armed
//! them. Starting or ending a session cancels its timers, and a timer that
//! still reaches the engine for a session that is no longer current is
//! dropped without touching state.
//!
//! `TimerQueue` is the built-in scheduler: a virtual clock the host advances
//! from its event loop. Hosts that own real timers can instead arm one per
//! `Engine::next_deadline` and hand fired timers back through `Engine::fire`.

mod queue;

pub use queue::{Timer, TimerId, TimerKind, TimerQueue};

use std::time::Duration;

use crate::core::SessionId;

/// Arms delayed callbacks on behalf of one session.
///
/// The selection state machine only says what should happen and when; the
/// implementation decides which session the timer belongs to and how the
/// delay is measured.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, kind: TimerKind);
}

/// Arms timers on a `TimerQueue` tagged with a fixed session.
#[derive(Debug)]
pub struct SessionScheduler<'a> {
    queue: &'a mut TimerQueue,
    session: SessionId,
}

impl<'a> SessionScheduler<'a> {
    pub fn new(queue: &'a mut TimerQueue, session: SessionId) -> Self {
        Self { queue, session }
    }
}

impl Scheduler for SessionScheduler<'_> {
    fn schedule(&mut self, delay: Duration, kind: TimerKind) {
        self.queue.arm(delay, self.session, kind);
    }
}
