// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scheduler, sensor graph and composite aggregation for the binnacle
//! engine gateway.
//!
//! The pipeline is a static, push-based graph built once at startup:
//! producers are sampled by the [`Scheduler`] on their configured periods,
//! and every reading flows synchronously through the attached transforms
//! and sinks within the same tick. There is no cross-tick buffering, no
//! parallelism and no dynamic rewiring.
//!
//! # Node kinds
//!
//! - [`ProducerKind`] - temperature probe (plausibility-checked), pulse
//!   counter, generic gauge
//! - [`TransformKind`] - unit conversion, pulse-to-rate windowing
//! - [`SinkNode`] - telemetry publisher, display row, composite-record
//!   field, single-temperature bus sender
//!
//! # Failure containment
//!
//! Every error kind is handled at the node that detects it (see
//! `binnacle-core::error`); a failed sensor read, a rejected transmit or an
//! absent display never stops the tick loop.
//!
//! # Example
//!
//! ```
//! use binnacle_core::Signal;
//! use binnacle_pipeline::{PipelineBuilder, ProducerKind, TransformKind, UnitConversion};
//! use binnacle_test_utils::ScriptedProbe;
//!
//! let mut builder = PipelineBuilder::new();
//! let oil = builder.producer(
//!     ProducerKind::temperature(ScriptedProbe::steady(350.0), 200.0..=700.0),
//!     Signal::from("propulsion.main.oilTemperature"),
//!     1000,
//! );
//! let celsius = builder.transform(
//!     TransformKind::Units(UnitConversion::KelvinToCelsius),
//!     None,
//! );
//! builder.connect(oil, celsius);
//! let mut pipeline = builder.build().unwrap();
//! pipeline.tick(0);
//! ```

pub mod aggregator;
pub mod display;
pub mod graph;
pub mod producer;
pub mod scheduler;
pub mod sink;
pub mod throttle;
pub mod transform;

use binnacle_core::{InstrumentBus, StatusPanel, TelemetrySink};
use parking_lot::Mutex;
use std::sync::Arc;

/// Instrument-bus handle shared between the aggregator and any
/// single-record senders. Only ever locked from the scheduling thread.
pub type SharedBus = Arc<Mutex<dyn InstrumentBus>>;

/// Telemetry endpoint handle shared between telemetry consumers.
pub type SharedTelemetry = Arc<Mutex<dyn TelemetrySink>>;

/// Status-panel handle shared between display rows.
pub type SharedPanel = Arc<Mutex<dyn StatusPanel>>;

/// Wrap a bus driver for injection into the nodes that transmit on it.
pub fn shared_bus(bus: impl InstrumentBus + 'static) -> SharedBus {
    Arc::new(Mutex::new(bus))
}

/// Wrap a telemetry endpoint for injection into telemetry consumers.
pub fn shared_telemetry(sink: impl TelemetrySink + 'static) -> SharedTelemetry {
    Arc::new(Mutex::new(sink))
}

/// Wrap a panel driver for injection into display rows.
pub fn shared_panel(panel: impl StatusPanel + 'static) -> SharedPanel {
    Arc::new(Mutex::new(panel))
}

pub use self::aggregator::{CompositeFieldConsumer, EngineAggregator, SharedAggregator};
pub use self::display::{DisplayConsumer, DisplayFormat};
pub use self::graph::{
    BuildError, Output, Pipeline, PipelineBuilder, Port, ProducerId, SinkId, TransformId,
};
pub use self::producer::ProducerKind;
pub use self::scheduler::Scheduler;
pub use self::sink::{AcceptReading, BusTemperatureConsumer, SinkNode, TelemetryConsumer};
pub use self::throttle::Throttle;
pub use self::transform::{PulseRate, TransformKind, UnitConversion};
