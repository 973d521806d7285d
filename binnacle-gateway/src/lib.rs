// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Marine engine telemetry gateway.
//!
//! Wires the standard engine-monitoring graph (oil, coolant and wet-exhaust
//! temperature probes, a tachometer pulse counter and a connectivity gauge)
//! into the `binnacle-pipeline` scheduler, and drives it from a
//! single-threaded tokio run loop. Vendor drivers plug in through the
//! `binnacle-core` traits; the `sim` module provides bench-mode stand-ins so
//! the binary runs on a desk without an engine attached.

pub mod config;
pub mod runtime;
pub mod sim;
pub mod wiring;

pub use self::config::{GatewayConfig, TemperatureUnit};
pub use self::runtime::run;
pub use self::wiring::{build_pipeline, Drivers};
