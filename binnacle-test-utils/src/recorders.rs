// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Recording doubles for the outbound channels, with failure injection.

use binnacle_core::{
    EngineDynamicRecord, InstrumentBus, Signal, TelemetryMetadata, TelemetrySink,
    TemperatureRecord, TransmitError,
};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Default)]
struct BusState {
    engine_records: Vec<EngineDynamicRecord>,
    temperature_records: Vec<TemperatureRecord>,
    fail_remaining: u32,
}

/// An [`InstrumentBus`] that records every transmitted record.
///
/// Clones share state: hand one clone to the pipeline, keep the other for
/// assertions. `fail_next` makes the following N sends report a busy bus,
/// for exercising the drop-don't-retry contract.
#[derive(Debug, Clone, Default)]
pub struct RecordingBus {
    state: Arc<Mutex<BusState>>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `sends` transmissions with [`TransmitError::Busy`].
    pub fn fail_next(&self, sends: u32) {
        self.state.lock().fail_remaining = sends;
    }

    /// Every engine-dynamic record successfully transmitted, oldest first.
    pub fn engine_records(&self) -> Vec<EngineDynamicRecord> {
        self.state.lock().engine_records.clone()
    }

    /// Every single-temperature record successfully transmitted.
    pub fn temperature_records(&self) -> Vec<TemperatureRecord> {
        self.state.lock().temperature_records.clone()
    }

    pub fn engine_record_count(&self) -> usize {
        self.state.lock().engine_records.len()
    }

    fn admit(state: &mut BusState) -> Result<(), TransmitError> {
        if state.fail_remaining > 0 {
            state.fail_remaining -= 1;
            return Err(TransmitError::Busy);
        }
        Ok(())
    }
}

impl InstrumentBus for RecordingBus {
    fn send_engine_dynamic(&mut self, record: &EngineDynamicRecord) -> Result<(), TransmitError> {
        let mut state = self.state.lock();
        Self::admit(&mut state)?;
        state.engine_records.push(record.clone());
        Ok(())
    }

    fn send_temperature(&mut self, record: &TemperatureRecord) -> Result<(), TransmitError> {
        let mut state = self.state.lock();
        Self::admit(&mut state)?;
        state.temperature_records.push(record.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
struct TelemetryState {
    published: Vec<(Signal, f64)>,
    metadata: Vec<(Signal, TelemetryMetadata)>,
    fail_remaining: u32,
}

/// A [`TelemetrySink`] that records every publish and metadata
/// registration. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct RecordingTelemetry {
    state: Arc<Mutex<TelemetryState>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next `sends` publishes with [`TransmitError::Busy`].
    pub fn fail_next(&self, sends: u32) {
        self.state.lock().fail_remaining = sends;
    }

    /// Every `(path, value)` pair published, oldest first.
    pub fn published(&self) -> Vec<(Signal, f64)> {
        self.state.lock().published.clone()
    }

    /// Values published under one path, oldest first.
    pub fn values_for(&self, path: &Signal) -> Vec<f64> {
        self.state
            .lock()
            .published
            .iter()
            .filter(|(p, _)| p == path)
            .map(|&(_, v)| v)
            .collect()
    }

    /// Metadata registrations in wiring order.
    pub fn metadata(&self) -> Vec<(Signal, TelemetryMetadata)> {
        self.state.lock().metadata.clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn publish(&mut self, path: &Signal, value: f64) -> Result<(), TransmitError> {
        let mut state = self.state.lock();
        if state.fail_remaining > 0 {
            state.fail_remaining -= 1;
            return Err(TransmitError::Busy);
        }
        state.published.push((path.clone(), value));
        Ok(())
    }

    fn register_metadata(&mut self, path: &Signal, metadata: TelemetryMetadata) {
        self.state.lock().metadata.push((path.clone(), metadata));
    }
}
