// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types and collaborator traits for the binnacle engine gateway.
//!
//! This crate defines the vocabulary shared by every other binnacle crate:
//!
//! - [`Reading`] and [`Signal`] - a timestamped scalar and its stable dotted
//!   identity (e.g. `propulsion.main.oilTemperature`)
//! - [`EngineDynamicRecord`] and [`TemperatureRecord`] - the structured
//!   outbound messages handed to the instrument-bus driver, with explicit
//!   not-available semantics for numeric fields and explicit no-fault
//!   defaults for status bitfields
//! - the error kinds of the pipeline ([`SensorReadError`], [`TransmitError`],
//!   [`DisplayUnavailable`], [`ClockAnomaly`])
//! - the [`Clock`] abstraction that supplies logical gateway time
//! - the driver-side traits ([`TemperatureProbe`], [`PulseCounter`],
//!   [`GaugeSource`], [`InstrumentBus`], [`TelemetrySink`], [`StatusPanel`])
//!   behind which all vendor hardware and transport code lives
//!
//! No scheduling or graph logic lives here; see `binnacle-pipeline`.

pub mod clock;
pub mod error;
pub mod io;
pub mod reading;
pub mod record;

pub use self::clock::{Clock, Millis, MonotonicClock};
pub use self::error::{ClockAnomaly, DisplayUnavailable, SensorReadError, TransmitError};
pub use self::io::{
    GaugeSource, InstrumentBus, PulseCounter, StatusPanel, TelemetryMetadata, TelemetrySink,
    TemperatureProbe,
};
pub use self::reading::{Reading, Signal};
pub use self::record::{
    EngineDynamicRecord, EngineField, EngineStatus1, EngineStatus2, TemperatureRecord,
    TemperatureSource,
};
