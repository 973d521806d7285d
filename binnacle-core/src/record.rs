// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Structured outbound records for the instrument field-bus.
//!
//! Records model the *content* of the outbound messages; wire framing is the
//! bus driver's concern. Two rules are load-bearing here:
//!
//! - Numeric fields are `Option<f64>`: `None` is the protocol's
//!   "not available" encoding. The driver maps `None` to the wire sentinel;
//!   a numeric zero is always a measured zero, never "unknown".
//! - The discrete status bitfields are *not* optional. Downstream displays
//!   treat an unavailable status field as if every alarm in it were active,
//!   so a record always carries an explicit status value, defaulting to
//!   all-clear.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! status_bitfield {
    ($(#[$doc:meta])* $name:ident { $($(#[$fdoc:meta])* $flag:ident = $bit:expr;)* }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u16);

        impl $name {
            $($(#[$fdoc])* pub const $flag: Self = Self(1 << $bit);)*

            /// The explicit all-clear value. Identical to `Default`, spelled
            /// out so wiring code can state its intent.
            pub const NO_FAULT: Self = Self(0);

            pub const fn bits(self) -> u16 {
                self.0
            }

            pub const fn contains(self, flag: Self) -> bool {
                self.0 & flag.0 == flag.0
            }

            #[must_use]
            pub const fn with(self, flag: Self) -> Self {
                Self(self.0 | flag.0)
            }

            pub const fn is_clear(self) -> bool {
                self.0 == 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:#06x}", self.0)
            }
        }
    };
}

status_bitfield! {
    /// First discrete status bitfield of the engine dynamic record.
    EngineStatus1 {
        CHECK_ENGINE = 0;
        OVER_TEMPERATURE = 1;
        LOW_OIL_PRESSURE = 2;
        LOW_OIL_LEVEL = 3;
        LOW_FUEL_PRESSURE = 4;
        LOW_SYSTEM_VOLTAGE = 5;
        LOW_COOLANT_LEVEL = 6;
        WATER_FLOW = 7;
        WATER_IN_FUEL = 8;
        CHARGE_INDICATOR = 9;
        PREHEAT_INDICATOR = 10;
        HIGH_BOOST_PRESSURE = 11;
        REV_LIMIT_EXCEEDED = 12;
        EGR_SYSTEM = 13;
        THROTTLE_POSITION_SENSOR = 14;
        EMERGENCY_STOP = 15;
    }
}

status_bitfield! {
    /// Second discrete status bitfield of the engine dynamic record.
    EngineStatus2 {
        WARNING_LEVEL_1 = 0;
        WARNING_LEVEL_2 = 1;
        POWER_REDUCTION = 2;
        MAINTENANCE_NEEDED = 3;
        ENGINE_COMM_ERROR = 4;
        SUB_OR_SECONDARY_THROTTLE = 5;
        NEUTRAL_START_PROTECT = 6;
        ENGINE_SHUTTING_DOWN = 7;
    }
}

/// Numeric fields of [`EngineDynamicRecord`] that the composite aggregator
/// can be wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineField {
    OilPressure,
    OilTemperature,
    CoolantTemperature,
    AlternatorVoltage,
    FuelRate,
    EngineHours,
    CoolantPressure,
    FuelPressure,
}

impl fmt::Display for EngineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineField::OilPressure => "oilPressure",
            EngineField::OilTemperature => "oilTemperature",
            EngineField::CoolantTemperature => "coolantTemperature",
            EngineField::AlternatorVoltage => "alternatorVoltage",
            EngineField::FuelRate => "fuelRate",
            EngineField::EngineHours => "engineHours",
            EngineField::CoolantPressure => "coolantPressure",
            EngineField::FuelPressure => "fuelPressure",
        };
        f.write_str(name)
    }
}

/// The composite "engine dynamic parameters" record.
///
/// Carries the full field set of the outbound message. This gateway only
/// feeds oil and coolant temperature; every other numeric field stays
/// not-available, and the status bitfields stay at their explicit no-fault
/// default unless wiring says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineDynamicRecord {
    /// Engine instance; a single-engine installation is always 0.
    pub instance: u8,
    pub oil_pressure: Option<f64>,
    /// Kelvin.
    pub oil_temperature: Option<f64>,
    /// Kelvin.
    pub coolant_temperature: Option<f64>,
    pub alternator_voltage: Option<f64>,
    pub fuel_rate: Option<f64>,
    pub engine_hours: Option<f64>,
    pub coolant_pressure: Option<f64>,
    pub fuel_pressure: Option<f64>,
    pub engine_load: Option<i8>,
    pub engine_torque: Option<i8>,
    pub status1: EngineStatus1,
    pub status2: EngineStatus2,
}

impl EngineDynamicRecord {
    /// A record for the given engine instance with every numeric field
    /// not-available and both status bitfields at no-fault.
    pub fn not_available(instance: u8) -> Self {
        Self {
            instance,
            oil_pressure: None,
            oil_temperature: None,
            coolant_temperature: None,
            alternator_voltage: None,
            fuel_rate: None,
            engine_hours: None,
            coolant_pressure: None,
            fuel_pressure: None,
            engine_load: None,
            engine_torque: None,
            status1: EngineStatus1::NO_FAULT,
            status2: EngineStatus2::NO_FAULT,
        }
    }

    pub fn set(&mut self, field: EngineField, value: f64) {
        *self.field_mut(field) = Some(value);
    }

    pub fn get(&self, field: EngineField) -> Option<f64> {
        *self.field_ref(field)
    }

    fn field_ref(&self, field: EngineField) -> &Option<f64> {
        match field {
            EngineField::OilPressure => &self.oil_pressure,
            EngineField::OilTemperature => &self.oil_temperature,
            EngineField::CoolantTemperature => &self.coolant_temperature,
            EngineField::AlternatorVoltage => &self.alternator_voltage,
            EngineField::FuelRate => &self.fuel_rate,
            EngineField::EngineHours => &self.engine_hours,
            EngineField::CoolantPressure => &self.coolant_pressure,
            EngineField::FuelPressure => &self.fuel_pressure,
        }
    }

    fn field_mut(&mut self, field: EngineField) -> &mut Option<f64> {
        match field {
            EngineField::OilPressure => &mut self.oil_pressure,
            EngineField::OilTemperature => &mut self.oil_temperature,
            EngineField::CoolantTemperature => &mut self.coolant_temperature,
            EngineField::AlternatorVoltage => &mut self.alternator_voltage,
            EngineField::FuelRate => &mut self.fuel_rate,
            EngineField::EngineHours => &mut self.engine_hours,
            EngineField::CoolantPressure => &mut self.coolant_pressure,
            EngineField::FuelPressure => &mut self.fuel_pressure,
        }
    }
}

impl Default for EngineDynamicRecord {
    fn default() -> Self {
        Self::not_available(0)
    }
}

/// Where a single-temperature record was measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureSource {
    SeaWater,
    EngineRoom,
    ExhaustGas,
    MainCabin,
}

/// A single-temperature outbound record, used for quantities that are not
/// part of the composite engine record (the wet-exhaust probe).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub instance: u8,
    pub source: TemperatureSource,
    /// Kelvin.
    pub temperature: f64,
}

impl TemperatureRecord {
    pub fn new(instance: u8, source: TemperatureSource, temperature: f64) -> Self {
        Self {
            instance,
            source,
            temperature,
        }
    }
}
