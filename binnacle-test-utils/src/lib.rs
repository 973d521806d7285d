// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test fakes and fixtures for the binnacle workspace.
//!
//! Everything the pipeline touches through a `binnacle-core` trait has a
//! scripted or recording double here, so the whole gateway can be exercised
//! deterministically without hardware, a bus or a network:
//!
//! - [`ManualClock`] - logical time driven by hand
//! - [`ScriptedProbe`] / [`ScriptedGauge`] - sensors that replay a script of
//!   readings and failures
//! - [`PulseWheel`] - an atomic pulse counter that tests spin directly,
//!   standing in for an interrupt-driven tacho input
//! - [`RecordingBus`] / [`RecordingTelemetry`] - outbound channels that
//!   capture everything sent and can be told to fail the next N sends
//! - [`FakePanel`] - a character-cell panel model that preserves stale
//!   characters unless a row is cleared, so redraw bugs are visible
//!
//! This crate is for development and testing only, never production wiring.

pub mod clock;
pub mod panel;
pub mod recorders;
pub mod sensors;

pub use self::clock::ManualClock;
pub use self::panel::FakePanel;
pub use self::recorders::{RecordingBus, RecordingTelemetry};
pub use self::sensors::{PulseWheel, ScriptedGauge, ScriptedProbe};
