// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Producer nodes: the periodic sources at the head of the graph.

use crate::graph::Port;
use binnacle_core::{
    GaugeSource, Millis, PulseCounter, Reading, SensorReadError, Signal, TemperatureProbe,
};
use std::ops::RangeInclusive;

/// The closed set of producer node kinds.
pub enum ProducerKind {
    /// A temperature probe with a physical-plausibility window. Readings
    /// outside the window are treated exactly like a failed read.
    Temperature {
        probe: Box<dyn TemperatureProbe>,
        plausible: RangeInclusive<f64>,
    },
    /// A free-running pulse counter; emits the raw monotonic count. A
    /// [`TransformKind::PulseRate`](crate::TransformKind) downstream turns
    /// counts into a physical rate.
    Pulse { counter: Box<dyn PulseCounter> },
    /// A generic scalar source (e.g. link state for the connectivity row).
    Gauge { source: Box<dyn GaugeSource> },
}

impl ProducerKind {
    pub fn temperature(
        probe: impl TemperatureProbe + 'static,
        plausible: RangeInclusive<f64>,
    ) -> Self {
        Self::Temperature {
            probe: Box::new(probe),
            plausible,
        }
    }

    pub fn pulse(counter: impl PulseCounter + 'static) -> Self {
        Self::Pulse {
            counter: Box::new(counter),
        }
    }

    pub fn gauge(source: impl GaugeSource + 'static) -> Self {
        Self::Gauge {
            source: Box::new(source),
        }
    }
}

pub(crate) struct ProducerNode {
    pub(crate) kind: ProducerKind,
    pub(crate) signal: Signal,
    /// Last successfully produced reading, kept for on-demand queries; a
    /// failed sample leaves it untouched.
    pub(crate) last: Option<Reading>,
    pub(crate) outputs: Vec<Port>,
}

impl ProducerNode {
    pub(crate) fn new(kind: ProducerKind, signal: Signal) -> Self {
        Self {
            kind,
            signal,
            last: None,
            outputs: Vec::new(),
        }
    }

    /// Sample the underlying source once.
    pub(crate) fn sample(&mut self, now: Millis) -> Result<Reading, SensorReadError> {
        let value = match &mut self.kind {
            ProducerKind::Temperature { probe, plausible } => {
                let value = probe.read_temperature()?;
                if !plausible.contains(&value) {
                    return Err(SensorReadError::OutOfRange {
                        value,
                        min: *plausible.start(),
                        max: *plausible.end(),
                    });
                }
                value
            }
            ProducerKind::Pulse { counter } => counter.read_pulse_count() as f64,
            ProducerKind::Gauge { source } => source.read()?,
        };
        Ok(Reading::new(self.signal.clone(), value, now))
    }
}
