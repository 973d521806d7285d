// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Gateway configuration.
//!
//! Everything is supplied once at startup from a JSON file (or the built-in
//! defaults); there is no runtime reconfiguration protocol. Defaults match
//! the original installation: 1000 ms temperature polls, a 500 ms tacho
//! window, 97 pulses per revolution and the hostname `temperatures`.

use anyhow::Context;
use binnacle_core::Signal;
use binnacle_pipeline::UnitConversion;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Temperature unit used on the display; outbound channels always carry
/// Kelvin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn conversion(self) -> UnitConversion {
        match self {
            TemperatureUnit::Celsius => UnitConversion::KelvinToCelsius,
            TemperatureUnit::Fahrenheit => UnitConversion::KelvinToFahrenheit,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorConfig {
    /// Temperature probe poll period.
    pub temperature_poll_ms: u64,
    /// Readings outside this window count as failed reads.
    pub plausible_min_kelvin: f64,
    pub plausible_max_kelvin: f64,
    /// Tacho sampling window; also the rate-computation window.
    pub tacho_poll_ms: u64,
    /// Calibration: pulses per shaft revolution.
    pub pulses_per_revolution: f64,
    /// Connectivity gauge poll period.
    pub link_poll_ms: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            temperature_poll_ms: 1000,
            plausible_min_kelvin: 200.0,
            plausible_max_kelvin: 700.0,
            tacho_poll_ms: 500,
            pulses_per_revolution: 97.0,
            link_poll_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub unit: TemperatureUnit,
    /// Minimum interval between redraws of a data row.
    pub throttle_ms: u64,
    /// Minimum interval between redraws of the connectivity row, which
    /// needs refreshing far less often than the link is sampled.
    pub link_throttle_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit: TemperatureUnit::Celsius,
            throttle_ms: 500,
            link_throttle_ms: 1000,
        }
    }
}

/// Telemetry paths, chosen at wiring time and stable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathConfig {
    pub oil_temperature: Signal,
    pub coolant_temperature: Signal,
    /// Coolant is republished under this path as the overall engine
    /// temperature.
    pub engine_temperature: Signal,
    /// Non-standard path, kept for compatibility with the installation.
    pub exhaust_temperature: Signal,
    pub revolutions: Signal,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            oil_temperature: Signal::from("propulsion.main.oilTemperature"),
            coolant_temperature: Signal::from("propulsion.main.coolantTemperature"),
            engine_temperature: Signal::from("propulsion.main.temperature"),
            exhaust_temperature: Signal::from("propulsion.main.wetExhaustTemperature"),
            revolutions: Signal::from("propulsion.main.revolutions"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    pub hostname: String,
    /// A single-engine installation is always instance 0.
    pub engine_instance: u8,
    pub sensors: SensorConfig,
    pub display: DisplayConfig,
    pub paths: PathConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            hostname: "temperatures".to_string(),
            engine_instance: 0,
            sensors: SensorConfig::default(),
            display: DisplayConfig::default(),
            paths: PathConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a JSON file. Missing fields fall back to
    /// their defaults; unknown fields are rejected.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("opening config file {}", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}
