// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cooperative periodic scheduling.
//!
//! [`Scheduler`] owns the "when" of the pipeline: each registered key has a
//! period, and [`Scheduler::poll`] reports which keys are due at a given
//! logical time, in registration order.
//!
//! # Behavior
//!
//! - A key first fires on the first poll after registration, then once per
//!   elapsed period.
//! - When several keys are due in the same poll they are reported in
//!   registration order.
//! - Missed periods are not queued: at most one pending invocation per key.
//!   If the loop stalls for longer than a period, the key's timeline slips
//!   forward instead of bursting catch-up invocations ("coalesce, don't
//!   backlog").
//! - Keys cannot be unregistered; wired producers run for process lifetime.

use binnacle_core::Millis;

#[derive(Debug)]
struct Entry<K> {
    period: Millis,
    next_due: Millis,
    key: K,
}

/// Tracks due times for a set of periodic keys.
///
/// The scheduler is deliberately dumb: it neither samples sensors nor calls
/// consumers. The pipeline asks it what is due and performs the work itself,
/// so tests can drive scheduling with a hand-rolled clock.
#[derive(Debug, Default)]
pub struct Scheduler<K: Copy> {
    entries: Vec<Entry<K>>,
}

impl<K: Copy> Scheduler<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a recurring key.
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero; the graph builder rejects zero periods
    /// before they can reach this point.
    pub fn on_repeat(&mut self, period: Millis, key: K) {
        assert!(period > 0, "scheduler period must be non-zero");
        self.entries.push(Entry {
            period,
            next_due: 0,
            key,
        });
    }

    /// Collect every key due at `now` into `due`, in registration order.
    ///
    /// `due` is cleared first; callers reuse one buffer across ticks to keep
    /// the hot path allocation-free.
    pub fn poll(&mut self, now: Millis, due: &mut Vec<K>) {
        due.clear();
        for entry in &mut self.entries {
            if now >= entry.next_due {
                due.push(entry.key);
                entry.next_due += entry.period;
                if entry.next_due <= now {
                    // Overrun: slip the timeline, do not backlog.
                    entry.next_due = now + entry.period;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
