// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Transform nodes: pure or windowed scalar-to-scalar conversions.

use crate::graph::Port;
use binnacle_core::{ClockAnomaly, Millis, Reading, Signal};

/// Unit conversions. Pure and stateless; safe to share an edge with the
/// untransformed stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitConversion {
    KelvinToCelsius,
    KelvinToFahrenheit,
    /// Rate in Hertz to revolutions per minute, for display.
    HertzToRpm,
}

impl UnitConversion {
    pub fn convert(self, value: f64) -> f64 {
        match self {
            UnitConversion::KelvinToCelsius => value - 273.15,
            UnitConversion::KelvinToFahrenheit => (value - 273.15) * 9.0 / 5.0 + 32.0,
            UnitConversion::HertzToRpm => value * 60.0,
        }
    }
}

/// Windowed pulse-count to rate conversion.
///
/// On each sample of the counting producer the window computes
/// `delta / (pulses_per_unit * elapsed_seconds)` against the previous
/// sample, then re-anchors. The first sample only primes the window. The
/// count delta wraps; counter wrap-around itself is the driver's concern.
///
/// A zero or negative elapsed window ([`ClockAnomaly`]) suppresses the
/// output for the tick and re-anchors on the offending sample, so one bad
/// clock step never turns into a divide-by-zero or a negative rate.
///
/// No smoothing happens here; callers wanting smoothing compose another
/// transform downstream.
#[derive(Debug, Clone)]
pub struct PulseRate {
    pulses_per_unit: f64,
    window: Option<(u64, Millis)>,
}

impl PulseRate {
    /// `pulses_per_unit` is the wiring-time calibration constant: how many
    /// pulses make one physical unit (e.g. 97 pulses per revolution for a
    /// Yanmar 3GM30F-style sender).
    pub fn new(pulses_per_unit: f64) -> Self {
        Self {
            pulses_per_unit,
            window: None,
        }
    }

    /// Feed one counter sample. Returns the rate in units per second, or
    /// `None` while priming.
    pub fn update(&mut self, count: u64, at: Millis) -> Result<Option<f64>, ClockAnomaly> {
        let Some((prev_count, prev_at)) = self.window else {
            self.window = Some((count, at));
            return Ok(None);
        };

        if at <= prev_at {
            self.window = Some((count, at));
            return Err(ClockAnomaly { prev: prev_at, now: at });
        }

        let delta = count.wrapping_sub(prev_count) as f64;
        let elapsed_s = (at - prev_at) as f64 / 1000.0;
        self.window = Some((count, at));
        Ok(Some(delta / (self.pulses_per_unit * elapsed_s)))
    }
}

/// The closed set of transform node kinds.
#[derive(Debug, Clone)]
pub enum TransformKind {
    Units(UnitConversion),
    PulseRate(PulseRate),
}

impl TransformKind {
    pub(crate) fn apply(&mut self, reading: &Reading) -> Result<Option<f64>, ClockAnomaly> {
        match self {
            TransformKind::Units(conversion) => Ok(Some(conversion.convert(reading.value))),
            TransformKind::PulseRate(window) => window.update(reading.value as u64, reading.at),
        }
    }
}

pub(crate) struct TransformNode {
    pub(crate) kind: TransformKind,
    /// Output identity; `None` passes the input signal through unchanged.
    pub(crate) signal: Option<Signal>,
    pub(crate) outputs: Vec<Port>,
}

impl TransformNode {
    pub(crate) fn new(kind: TransformKind, signal: Option<Signal>) -> Self {
        Self {
            kind,
            signal,
            outputs: Vec::new(),
        }
    }
}
