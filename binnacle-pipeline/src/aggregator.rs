// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Composite aggregation of independently-timed readings.
//!
//! Oil and coolant temperature arrive on their own producers with their own
//! periods, but the field-bus wants them together in one engine-dynamic
//! record. [`EngineAggregator`] holds the latest value per field and emits
//! the whole record on *every* constituent update (the union of the
//! constituent periods, never their intersection), so the bus always sees
//! the freshest known state without waiting for synchronized sampling.
//!
//! # Partial state
//!
//! A field that has never been updated stays at the record's not-available
//! default; the aggregator never blocks waiting for all fields to arrive at
//! least once. Status bitfields keep their explicit no-fault value rather
//! than not-available: downstream instruments read an unavailable status
//! field as every alarm in it firing at once.
//!
//! # Transmit failure
//!
//! A rejected transmit drops that emission. No retry inside the tick, no
//! queue of pending records: the bus state, not message content, is
//! authoritative for "latest", and the next constituent update carries
//! fresher data anyway.

use crate::sink::AcceptReading;
use crate::SharedBus;
use binnacle_core::{EngineDynamicRecord, EngineField, Reading};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Stateful aggregator feeding the engine-dynamic record to the bus.
pub struct EngineAggregator {
    record: EngineDynamicRecord,
    bus: SharedBus,
}

impl EngineAggregator {
    pub fn new(instance: u8, bus: SharedBus) -> Self {
        Self {
            record: EngineDynamicRecord::not_available(instance),
            bus,
        }
    }

    /// Store `value` under `field` and immediately emit the full record.
    pub fn on_update(&mut self, field: EngineField, value: f64) {
        self.record.set(field, value);
        if let Err(error) = self.bus.lock().send_engine_dynamic(&self.record) {
            debug!(%field, %error, "dropping engine-dynamic emission");
        }
    }

    /// Latest known composite state.
    pub fn record(&self) -> &EngineDynamicRecord {
        &self.record
    }
}

/// Aggregator handle shared between the composite-field sinks wired to it.
pub type SharedAggregator = Arc<Mutex<EngineAggregator>>;

/// Sink that routes one reading stream into one field of a shared
/// [`EngineAggregator`].
pub struct CompositeFieldConsumer {
    aggregator: SharedAggregator,
    field: EngineField,
}

impl CompositeFieldConsumer {
    pub fn new(aggregator: SharedAggregator, field: EngineField) -> Self {
        Self { aggregator, field }
    }
}

impl AcceptReading for CompositeFieldConsumer {
    fn accept(&mut self, reading: &Reading) {
        self.aggregator.lock().on_update(self.field, reading.value);
    }
}
