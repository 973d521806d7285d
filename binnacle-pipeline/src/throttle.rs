// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Leading-edge throttling.

use binnacle_core::Millis;

/// Leading-edge throttle: the first value is admitted immediately, then
/// values are rejected until `min_interval` has elapsed since the last
/// admitted one. Rejected values are dropped, not deferred: the next
/// admitted value is whatever arrives after the window, which for a
/// latest-value display is exactly what is wanted.
#[derive(Debug, Clone)]
pub struct Throttle {
    min_interval: Millis,
    last_admitted: Option<Millis>,
}

impl Throttle {
    pub fn new(min_interval: Millis) -> Self {
        Self {
            min_interval,
            last_admitted: None,
        }
    }

    /// Whether a value arriving at `now` passes the throttle. Admitting a
    /// value opens a new suppression window.
    pub fn admit(&mut self, now: Millis) -> bool {
        let admitted = match self.last_admitted {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.min_interval,
        };
        if admitted {
            self.last_admitted = Some(now);
        }
        admitted
    }
}
