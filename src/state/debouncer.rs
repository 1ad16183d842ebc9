//! Cancellable single-slot debouncer and the clock it reads.
//!
//! The debouncer never spawns timers of its own. It records a deadline and
//! the event loop asks it, via [`Debouncer::take_due`], whether the deadline
//! has passed. Time comes from a [`Clock`], so tests drive a [`ManualClock`]
//! instead of sleeping.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

// ===== Clock =====

/// Source of monotonic time.
pub trait Clock {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Virtual clock that only moves when told to.
///
/// Clones share the same time, so a test can keep a handle while the
/// controller owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    /// Clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ===== Debouncer =====

#[derive(Debug)]
struct Pending<T> {
    deadline: Instant,
    action: T,
}

/// Holds at most one pending action until a quiet period elapses.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    /// Debouncer with the given quiet period.
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Quiet period between the last schedule and firing.
    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Arm `action` to fire one quiet period after `now`.
    ///
    /// Any previously pending action is dropped without firing.
    pub fn schedule(&mut self, action: T, now: Instant) {
        self.pending = Some(Pending {
            deadline: now + self.quiet_period,
            action,
        });
    }

    /// Drop the pending action, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether an action is armed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending action.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending action if its deadline has been reached.
    ///
    /// Returns each scheduled action at most once.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.action),
            _ => None,
        }
    }
}
