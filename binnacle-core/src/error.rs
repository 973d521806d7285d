// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error kinds of the sampling pipeline.
//!
//! All four kinds are handled locally at the component that detects them and
//! never escalate to terminate the scheduling loop: the gateway favors
//! availability of the remaining pipeline over strict delivery of any single
//! reading. Each kind maps to a fixed recovery:
//!
//! - [`SensorReadError`] - skip propagation this tick, keep the last value
//! - [`ClockAnomaly`] - suppress the rate output for this window
//! - [`TransmitError`] - drop the emission, no retry, no backlog
//! - [`DisplayUnavailable`] - skip the draw silently

use crate::clock::Millis;

/// A sensor could not deliver a usable reading this tick.
///
/// Transient by definition; the previous reading remains the last-known
/// value for any consumer that queries it on demand.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorReadError {
    /// The probe did not answer (unplugged, broken wire).
    #[error("sensor disconnected")]
    Disconnected,

    /// The sensor bus misbehaved (CRC failure, short, timeout).
    #[error("sensor bus error: {context}")]
    Bus {
        /// Description of the bus condition.
        context: String,
    },

    /// The raw value is outside the physically plausible range and is
    /// treated exactly like a failed read, never propagated.
    #[error("reading {value} outside plausible range {min}..={max}")]
    OutOfRange { value: f64, min: f64, max: f64 },
}

impl SensorReadError {
    /// Create a bus error with the given context.
    pub fn bus(context: impl Into<String>) -> Self {
        Self::Bus {
            context: context.into(),
        }
    }
}

/// The outbound channel refused an emission.
///
/// Fire-and-forget semantics: the caller drops the emission and transmits
/// fresh data on the next constituent update. Bus state, not message
/// content, is authoritative for "latest".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransmitError {
    /// The bus is busy; the frame was not queued.
    #[error("bus busy")]
    Busy,

    /// Lost arbitration against higher-priority traffic.
    #[error("bus arbitration lost")]
    ArbitrationLost,

    /// The driver rejected the record outright.
    #[error("transmit rejected: {context}")]
    Rejected {
        /// Description of the rejection.
        context: String,
    },
}

impl TransmitError {
    /// Create a rejection error with the given context.
    pub fn rejected(context: impl Into<String>) -> Self {
        Self::Rejected {
            context: context.into(),
        }
    }
}

/// The rendering hardware is absent or not responding.
///
/// Never fatal: display consumers degrade to a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("display unavailable")]
pub struct DisplayUnavailable;

/// Non-positive elapsed time observed inside a rate computation.
///
/// Dividing by a zero or negative window would emit garbage, so the
/// transform suppresses its output for the tick and resynchronizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("non-positive elapsed time in rate window ({prev}ms -> {now}ms)")]
pub struct ClockAnomaly {
    /// Timestamp of the previous sample.
    pub prev: Millis,
    /// Timestamp of the offending sample.
    pub now: Millis,
}
