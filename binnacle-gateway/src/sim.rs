// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bench-mode drivers.
//!
//! Stand-ins for the vendor hardware so the gateway binary runs on a desk:
//! random-walk temperature probes, a task-driven tacho counter, and log
//! backed outbound channels. Production builds swap these for the real
//! drivers through [`Drivers`](crate::Drivers); nothing in the pipeline
//! knows the difference.

use binnacle_core::{
    DisplayUnavailable, EngineDynamicRecord, GaugeSource, InstrumentBus, PulseCounter,
    SensorReadError, Signal, StatusPanel, TelemetryMetadata, TelemetrySink, TemperatureProbe,
    TemperatureRecord, TransmitError,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// A temperature probe performing a bounded random walk around a base
/// value, in Kelvin.
pub struct SimProbe {
    value: f64,
    rng: StdRng,
}

impl SimProbe {
    pub fn new(base_kelvin: f64) -> Self {
        Self {
            value: base_kelvin,
            rng: StdRng::seed_from_u64(base_kelvin.to_bits()),
        }
    }
}

impl TemperatureProbe for SimProbe {
    fn read_temperature(&mut self) -> Result<f64, SensorReadError> {
        self.value += self.rng.random_range(-0.2..=0.2);
        Ok(self.value)
    }
}

/// An atomic pulse counter incremented by [`drive_tacho`], read by the
/// pipeline with a plain atomic load, the same crossing a real
/// interrupt-driven counter makes.
#[derive(Debug, Clone, Default)]
pub struct SimTacho {
    count: Arc<AtomicU64>,
}

impl SimTacho {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PulseCounter for SimTacho {
    fn read_pulse_count(&mut self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// Spin the simulated shaft at `rpm` until cancelled, accumulating pulses
/// in bursts every 50 ms.
pub async fn drive_tacho(
    tacho: SimTacho,
    rpm: f64,
    pulses_per_revolution: f64,
    cancel: CancellationToken,
) {
    const BURST: Duration = Duration::from_millis(50);
    let pulses_per_burst = (rpm / 60.0) * pulses_per_revolution * BURST.as_secs_f64();
    let mut carry = 0.0;
    let mut interval = tokio::time::interval(BURST);

    info!(rpm, "simulated shaft spinning");
    loop {
        tokio::select! {
            _ = interval.tick() => {
                carry += pulses_per_burst;
                let whole = carry.floor();
                carry -= whole;
                tacho.count.fetch_add(whole as u64, Ordering::Relaxed);
            }
            _ = cancel.cancelled() => break,
        }
    }
}

/// A connectivity gauge that always reads link-up.
pub struct SimLink;

impl GaugeSource for SimLink {
    fn read(&mut self) -> Result<f64, SensorReadError> {
        Ok(1.0)
    }
}

/// Status panel that mirrors row writes into the log.
#[derive(Debug, Default)]
pub struct LogPanel;

impl StatusPanel for LogPanel {
    fn clear_row(&mut self, _row: u8) -> Result<(), DisplayUnavailable> {
        Ok(())
    }

    fn write(&mut self, row: u8, text: &str) -> Result<(), DisplayUnavailable> {
        info!(target: "binnacle_gateway::panel", row, text, "panel row");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayUnavailable> {
        Ok(())
    }
}

/// Instrument bus that logs record summaries instead of framing CAN.
#[derive(Debug, Default)]
pub struct LogBus;

impl InstrumentBus for LogBus {
    fn send_engine_dynamic(&mut self, record: &EngineDynamicRecord) -> Result<(), TransmitError> {
        info!(
            target: "binnacle_gateway::bus",
            instance = record.instance,
            oil = ?record.oil_temperature,
            coolant = ?record.coolant_temperature,
            status1 = %record.status1,
            "engine dynamic record"
        );
        Ok(())
    }

    fn send_temperature(&mut self, record: &TemperatureRecord) -> Result<(), TransmitError> {
        info!(
            target: "binnacle_gateway::bus",
            instance = record.instance,
            source = ?record.source,
            kelvin = record.temperature,
            "temperature record"
        );
        Ok(())
    }
}

/// Telemetry endpoint that logs publishes instead of speaking a protocol.
#[derive(Debug, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn publish(&mut self, path: &Signal, value: f64) -> Result<(), TransmitError> {
        debug!(target: "binnacle_gateway::telemetry", %path, value, "publish");
        Ok(())
    }

    fn register_metadata(&mut self, path: &Signal, metadata: TelemetryMetadata) {
        debug!(
            target: "binnacle_gateway::telemetry",
            %path,
            units = %metadata.units,
            "metadata registered"
        );
    }
}
