// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sink nodes: the side-effecting tails of the graph.
//!
//! Sinks are a closed set of tagged variants dispatched through
//! [`AcceptReading`]; no boxed closures, so ownership of the injected
//! collaborators stays visible in the types.

use crate::aggregator::CompositeFieldConsumer;
use crate::display::DisplayConsumer;
use crate::{SharedBus, SharedTelemetry};
use binnacle_core::{Reading, Signal, TemperatureRecord, TemperatureSource};
use tracing::debug;

/// The one capability every sink implements: react to a new reading.
pub trait AcceptReading {
    fn accept(&mut self, reading: &Reading);
}

/// Publishes `(path, value)` to the telemetry endpoint, fire-and-forget.
pub struct TelemetryConsumer {
    sink: SharedTelemetry,
    path: Signal,
}

impl TelemetryConsumer {
    /// `path` is fixed at wiring time; it may differ from the reading's own
    /// signal (the coolant stream is also published under the overall
    /// engine-temperature path).
    pub fn new(sink: SharedTelemetry, path: Signal) -> Self {
        Self { sink, path }
    }
}

impl AcceptReading for TelemetryConsumer {
    fn accept(&mut self, reading: &Reading) {
        if let Err(error) = self.sink.lock().publish(&self.path, reading.value) {
            debug!(path = %self.path, %error, "dropping telemetry publish");
        }
    }
}

/// Sends each reading to the bus as a standalone single-temperature record
/// (quantities that are not part of the composite engine record).
pub struct BusTemperatureConsumer {
    bus: SharedBus,
    instance: u8,
    source: TemperatureSource,
}

impl BusTemperatureConsumer {
    pub fn new(bus: SharedBus, instance: u8, source: TemperatureSource) -> Self {
        Self {
            bus,
            instance,
            source,
        }
    }
}

impl AcceptReading for BusTemperatureConsumer {
    fn accept(&mut self, reading: &Reading) {
        let record = TemperatureRecord::new(self.instance, self.source, reading.value);
        if let Err(error) = self.bus.lock().send_temperature(&record) {
            debug!(signal = %reading.signal, %error, "dropping temperature emission");
        }
    }
}

/// The closed set of sink node kinds.
pub enum SinkNode {
    Telemetry(TelemetryConsumer),
    Display(DisplayConsumer),
    CompositeField(CompositeFieldConsumer),
    BusTemperature(BusTemperatureConsumer),
}

impl AcceptReading for SinkNode {
    fn accept(&mut self, reading: &Reading) {
        match self {
            SinkNode::Telemetry(sink) => sink.accept(reading),
            SinkNode::Display(sink) => sink.accept(reading),
            SinkNode::CompositeField(sink) => sink.accept(reading),
            SinkNode::BusTemperature(sink) => sink.accept(reading),
        }
    }
}

impl From<TelemetryConsumer> for SinkNode {
    fn from(sink: TelemetryConsumer) -> Self {
        Self::Telemetry(sink)
    }
}

impl From<DisplayConsumer> for SinkNode {
    fn from(sink: DisplayConsumer) -> Self {
        Self::Display(sink)
    }
}

impl From<CompositeFieldConsumer> for SinkNode {
    fn from(sink: CompositeFieldConsumer) -> Self {
        Self::CompositeField(sink)
    }
}

impl From<BusTemperatureConsumer> for SinkNode {
    fn from(sink: BusTemperatureConsumer) -> Self {
        Self::BusTemperature(sink)
    }
}
