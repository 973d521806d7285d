// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Readings and their identities.

use crate::clock::Millis;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Stable dotted identity of a reading stream, e.g.
/// `propulsion.main.oilTemperature`.
///
/// Signals are chosen once at wiring time and double as telemetry paths.
/// Cloning a `Signal` is cheap (shared allocation), so readings can fan out
/// through the graph without touching the allocator on the per-tick path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signal(Arc<str>);

impl Signal {
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(Arc::from(path.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the path is empty; rejected at graph build time.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Signal {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Signal {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Signal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Signal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Signal::from)
    }
}

/// A timestamped scalar produced by one sampling tick.
///
/// A reading is immutable once produced; the next sample from the same
/// producer supersedes it, never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Which physical quantity this value represents.
    pub signal: Signal,
    /// Calibrated value in the signal's SI unit (Kelvin, Hertz, ...).
    pub value: f64,
    /// Logical sample time.
    pub at: Millis,
}

impl Reading {
    pub fn new(signal: Signal, value: f64, at: Millis) -> Self {
        Self { signal, value, at }
    }

    /// The same reading carrying a different value, used by transforms that
    /// re-tag their output under a new signal.
    pub fn derive(&self, signal: Signal, value: f64) -> Self {
        Self {
            signal,
            value,
            at: self.at,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} @ {}ms", self.signal, self.value, self.at)
    }
}
