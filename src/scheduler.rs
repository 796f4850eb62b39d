//! Periodic tick scheduling.
//!
//! The game loop polls a [`Scheduler`] instead of registering callbacks; a
//! poll that reports "due" stands in for the callback firing.

use std::time::{Duration, Instant};

/// Identifies one scheduled repetition. Stale handles are ignored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wraps an id chosen by the [`Scheduler`] implementation.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Timer collaborator driving the simulation step.
pub trait Scheduler {
    /// Starts a repeating timer, replacing any active one. The first firing
    /// is one full `interval` from now.
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle;

    /// Stops the timer identified by `handle`, if it is still active.
    fn cancel(&mut self, handle: TimerHandle);

    /// Returns `true` at most once per elapsed period of the active timer.
    fn poll_due(&mut self, now: Instant) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct ActiveTimer {
    handle: TimerHandle,
    interval: Duration,
    next_due: Instant,
}

/// Wall-clock [`Scheduler`] for the terminal loop.
#[derive(Debug, Default)]
pub struct IntervalTimer {
    active: Option<ActiveTimer>,
    next_id: u64,
}

impl IntervalTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`Scheduler::schedule_repeating`] with an explicit start instant.
    pub fn schedule_repeating_from(&mut self, interval: Duration, now: Instant) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        self.active = Some(ActiveTimer {
            handle,
            interval,
            next_due: now + interval,
        });
        handle
    }

    /// Interval of the active timer.
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.active.map(|timer| timer.interval)
    }

    /// Time left before the next firing, zero when overdue.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.active
            .map(|timer| timer.next_due.saturating_duration_since(now))
    }
}

impl Scheduler for IntervalTimer {
    fn schedule_repeating(&mut self, interval: Duration) -> TimerHandle {
        self.schedule_repeating_from(interval, Instant::now())
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if self.active.is_some_and(|timer| timer.handle == handle) {
            self.active = None;
        }
    }

    fn poll_due(&mut self, now: Instant) -> bool {
        let Some(timer) = self.active.as_mut() else {
            return false;
        };

        if now < timer.next_due {
            return false;
        }

        // Missed periods are dropped so a stall never bursts several ticks.
        timer.next_due += timer.interval;
        if timer.next_due <= now {
            timer.next_due = now + timer.interval;
        }

        true
    }
}
