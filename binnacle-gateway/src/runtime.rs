// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The tick loop.

use binnacle_core::Clock;
use binnacle_pipeline::Pipeline;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Drive the pipeline until cancelled.
///
/// One coarse timer wakes the loop every `tick`; the pipeline's own
/// scheduler decides which producers are actually due at the clock's
/// current logical time. Missed wakeups delay rather than burst, matching
/// the scheduler's coalesce-don't-backlog contract. Everything inside a
/// tick runs synchronously on this task.
pub async fn run(
    mut pipeline: Pipeline,
    clock: impl Clock,
    cancel: CancellationToken,
    tick: Duration,
) {
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(producers = pipeline.producer_count(), "tick loop started");
    loop {
        tokio::select! {
            _ = interval.tick() => pipeline.tick(clock.now()),
            _ = cancel.cancelled() => break,
        }
    }
    info!("tick loop stopped");
}
