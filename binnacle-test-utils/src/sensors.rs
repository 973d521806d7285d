// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Scripted sensor doubles.

use binnacle_core::{GaugeSource, PulseCounter, SensorReadError, TemperatureProbe};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A script of read outcomes. The final step repeats forever, so a
/// one-step script is a steady sensor.
#[derive(Debug, Clone)]
struct Script {
    steps: VecDeque<Result<f64, SensorReadError>>,
}

impl Script {
    fn new(steps: impl IntoIterator<Item = Result<f64, SensorReadError>>) -> Self {
        let steps: VecDeque<_> = steps.into_iter().collect();
        assert!(!steps.is_empty(), "sensor script must have at least one step");
        Self { steps }
    }

    fn next(&mut self) -> Result<f64, SensorReadError> {
        if self.steps.len() > 1 {
            self.steps.pop_front().expect("script is never empty")
        } else {
            self.steps[0].clone()
        }
    }
}

/// A [`TemperatureProbe`] that replays a script of readings and failures.
#[derive(Debug, Clone)]
pub struct ScriptedProbe {
    script: Script,
}

impl ScriptedProbe {
    pub fn new(steps: impl IntoIterator<Item = Result<f64, SensorReadError>>) -> Self {
        Self {
            script: Script::new(steps),
        }
    }

    /// A probe that always reads `kelvin`.
    pub fn steady(kelvin: f64) -> Self {
        Self::new([Ok(kelvin)])
    }
}

impl TemperatureProbe for ScriptedProbe {
    fn read_temperature(&mut self) -> Result<f64, SensorReadError> {
        self.script.next()
    }
}

/// A [`GaugeSource`] that replays a script of readings and failures.
#[derive(Debug, Clone)]
pub struct ScriptedGauge {
    script: Script,
}

impl ScriptedGauge {
    pub fn new(steps: impl IntoIterator<Item = Result<f64, SensorReadError>>) -> Self {
        Self {
            script: Script::new(steps),
        }
    }

    pub fn steady(value: f64) -> Self {
        Self::new([Ok(value)])
    }
}

impl GaugeSource for ScriptedGauge {
    fn read(&mut self) -> Result<f64, SensorReadError> {
        self.script.next()
    }
}

/// An atomic pulse counter standing in for an interrupt-driven tacho input.
///
/// The test keeps one clone and spins it; the pipeline owns the other and
/// reads it with an atomic load, exactly like a real counter crossing from
/// interrupt context to the scheduling thread.
#[derive(Debug, Clone, Default)]
pub struct PulseWheel {
    count: Arc<AtomicU64>,
}

impl PulseWheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `pulses` detected edges.
    pub fn spin(&self, pulses: u64) {
        self.count.fetch_add(pulses, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

impl PulseCounter for PulseWheel {
    fn read_pulse_count(&mut self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
