// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use binnacle_core::{Clock, Millis};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A [`Clock`] driven entirely by the test.
///
/// Clones share the same timeline, so one handle can advance time while
/// another is wired into the code under test.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicU64>,
}

impl ManualClock {
    /// A clock starting at t=0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: Millis) {
        self.now.fetch_add(ms, Ordering::Relaxed);
    }

    /// Jump to an absolute time. May move backwards, which is exactly what
    /// clock-anomaly tests need.
    pub fn set(&self, ms: Millis) {
        self.now.store(ms, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.load(Ordering::Relaxed)
    }
}
