// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Collaborator traits: the seams between the pipeline and the outside world.
//!
//! Everything vendor-specific (one-wire transactions, CAN framing, pixel
//! pushing, websocket deltas) lives behind these traits. The pipeline only
//! relies on the narrow contracts documented here, and the test suite drives
//! it entirely through fakes.

use crate::error::{DisplayUnavailable, SensorReadError, TransmitError};
use crate::reading::Signal;
use crate::record::{EngineDynamicRecord, TemperatureRecord};

/// A calibrated temperature probe.
pub trait TemperatureProbe: Send {
    /// Read the current temperature in Kelvin.
    ///
    /// Implementations report disconnected probes and bus trouble as
    /// [`SensorReadError`]; they do not clamp or substitute values.
    fn read_temperature(&mut self) -> Result<f64, SensorReadError>;
}

/// A free-running hardware pulse counter.
///
/// The count is monotonically increasing; wrap handling and the hardware
/// debounce interval (minimum accepted inter-pulse gap) are the driver's
/// concern. When counting happens in interrupt context the implementation
/// must publish the count through an atomic so the scheduling thread can
/// read it with a plain atomic load.
pub trait PulseCounter: Send {
    fn read_pulse_count(&mut self) -> u64;
}

/// A generic scalar status source with no unit conversion, e.g. link state.
pub trait GaugeSource: Send {
    fn read(&mut self) -> Result<f64, SensorReadError>;
}

/// The instrument field-bus. Accepts pre-built records and transmits them
/// fire-and-forget; the pipeline never awaits acknowledgement.
pub trait InstrumentBus: Send {
    fn send_engine_dynamic(&mut self, record: &EngineDynamicRecord) -> Result<(), TransmitError>;

    fn send_temperature(&mut self, record: &TemperatureRecord) -> Result<(), TransmitError>;
}

/// Display metadata registered alongside a telemetry path.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TelemetryMetadata {
    /// SI unit of the published values ("K", "Hz").
    pub units: String,
    pub display_name: String,
    pub short_name: String,
    /// Seconds after which a consumer should regard the value as stale.
    pub timeout_s: f64,
}

impl TelemetryMetadata {
    pub fn new(
        units: impl Into<String>,
        display_name: impl Into<String>,
        short_name: impl Into<String>,
        timeout_s: f64,
    ) -> Self {
        Self {
            units: units.into(),
            display_name: display_name.into(),
            short_name: short_name.into(),
            timeout_s,
        }
    }
}

/// The telemetry/query protocol endpoint. Paths are stable dotted
/// identifiers chosen at wiring time; there is no runtime path negotiation.
pub trait TelemetrySink: Send {
    /// Publish one value under a path, fire-and-forget.
    fn publish(&mut self, path: &Signal, value: f64) -> Result<(), TransmitError>;

    /// Register display metadata for a path. Called once per path during
    /// wiring, before any publish.
    fn register_metadata(&mut self, path: &Signal, metadata: TelemetryMetadata);
}

/// A character-cell status panel addressed by row.
pub trait StatusPanel: Send {
    /// Blank the row's character region.
    fn clear_row(&mut self, row: u8) -> Result<(), DisplayUnavailable>;

    /// Draw text starting at the left edge of the row.
    fn write(&mut self, row: u8, text: &str) -> Result<(), DisplayUnavailable>;

    /// Push pending drawing to the hardware.
    fn flush(&mut self) -> Result<(), DisplayUnavailable>;
}
