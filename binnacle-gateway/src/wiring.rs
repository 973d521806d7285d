// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Declarative wiring of the standard engine-monitoring graph.
//!
//! All dependency injection happens here: drivers come in through
//! [`Drivers`], every consumer gets the handle it needs at construction,
//! and nothing reaches for ambient state. The graph is frozen before the
//! first tick.
//!
//! Row assignment on the status panel:
//!
//! | row | content                  |
//! |-----|--------------------------|
//! | 0   | hostname header          |
//! | 1   | oil temperature          |
//! | 2   | coolant temperature      |
//! | 3   | wet-exhaust temperature  |
//! | 4   | shaft RPM                |
//! | 5   | connectivity status      |

use crate::config::GatewayConfig;
use binnacle_core::{
    DisplayUnavailable, EngineField, GaugeSource, PulseCounter, Signal, StatusPanel,
    TelemetryMetadata, TemperatureProbe, TemperatureSource,
};
use binnacle_pipeline::{
    BuildError, BusTemperatureConsumer, CompositeFieldConsumer, DisplayConsumer, DisplayFormat,
    EngineAggregator, Pipeline, PipelineBuilder, ProducerKind, PulseRate, SharedBus, SharedPanel,
    SharedTelemetry, TelemetryConsumer, TransformKind, UnitConversion,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

/// Bus instance used for the standalone exhaust temperature record.
const EXHAUST_TEMPERATURE_INSTANCE: u8 = 2;

/// Everything the gateway needs injected: sensor drivers and the three
/// shared collaborator handles.
pub struct Drivers {
    pub oil_probe: Box<dyn TemperatureProbe>,
    pub coolant_probe: Box<dyn TemperatureProbe>,
    pub exhaust_probe: Box<dyn TemperatureProbe>,
    pub tacho: Box<dyn PulseCounter>,
    pub link: Box<dyn GaugeSource>,
    pub bus: SharedBus,
    pub telemetry: SharedTelemetry,
    pub panel: SharedPanel,
}

/// Build the full pipeline from configuration and injected drivers.
///
/// Also performs the one-off wiring side effects: drawing the hostname
/// header row and registering telemetry metadata for every published path.
pub fn build_pipeline(config: &GatewayConfig, drivers: Drivers) -> Result<Pipeline, BuildError> {
    let Drivers {
        oil_probe,
        coolant_probe,
        exhaust_probe,
        tacho,
        link,
        bus,
        telemetry,
        panel,
    } = drivers;

    draw_header(&panel, &config.hostname);
    register_metadata(&telemetry, config);

    let plausible =
        config.sensors.plausible_min_kelvin..=config.sensors.plausible_max_kelvin;
    let unit = config.display.unit;
    let aggregator = Arc::new(Mutex::new(EngineAggregator::new(
        config.engine_instance,
        bus.clone(),
    )));

    let mut builder = PipelineBuilder::new();

    // Producers, in scheduling order.
    let oil = builder.producer(
        ProducerKind::Temperature {
            probe: oil_probe,
            plausible: plausible.clone(),
        },
        config.paths.oil_temperature.clone(),
        config.sensors.temperature_poll_ms,
    );
    let coolant = builder.producer(
        ProducerKind::Temperature {
            probe: coolant_probe,
            plausible: plausible.clone(),
        },
        config.paths.coolant_temperature.clone(),
        config.sensors.temperature_poll_ms,
    );
    let exhaust = builder.producer(
        ProducerKind::Temperature {
            probe: exhaust_probe,
            plausible,
        },
        config.paths.exhaust_temperature.clone(),
        config.sensors.temperature_poll_ms,
    );
    let tacho = builder.producer(
        ProducerKind::Pulse { counter: tacho },
        Signal::from("propulsion.main.tachoPulses"),
        config.sensors.tacho_poll_ms,
    );
    let link = builder.producer(
        ProducerKind::Gauge { source: link },
        Signal::from("network.link"),
        config.sensors.link_poll_ms,
    );

    // Oil: telemetry, composite field, display.
    let oil_telemetry = builder.sink(TelemetryConsumer::new(
        telemetry.clone(),
        config.paths.oil_temperature.clone(),
    ));
    let oil_field = builder.sink(CompositeFieldConsumer::new(
        aggregator.clone(),
        EngineField::OilTemperature,
    ));
    let oil_display_units = builder.transform(TransformKind::Units(unit.conversion()), None);
    let oil_row = builder.sink(
        DisplayConsumer::new(panel.clone(), 1, "Oil", DisplayFormat::fixed(1, unit.suffix()))
            .throttled(config.display.throttle_ms),
    );
    builder.connect(oil, oil_telemetry);
    builder.connect(oil, oil_field);
    builder.connect(oil, oil_display_units);
    builder.connect(oil_display_units, oil_row);

    // Coolant: telemetry (plus the engine-temperature alias), composite
    // field, display.
    let coolant_telemetry = builder.sink(TelemetryConsumer::new(
        telemetry.clone(),
        config.paths.coolant_temperature.clone(),
    ));
    let engine_alias = builder.sink(TelemetryConsumer::new(
        telemetry.clone(),
        config.paths.engine_temperature.clone(),
    ));
    let coolant_field = builder.sink(CompositeFieldConsumer::new(
        aggregator,
        EngineField::CoolantTemperature,
    ));
    let coolant_display_units = builder.transform(TransformKind::Units(unit.conversion()), None);
    let coolant_row = builder.sink(
        DisplayConsumer::new(
            panel.clone(),
            2,
            "Coolant",
            DisplayFormat::fixed(1, unit.suffix()),
        )
        .throttled(config.display.throttle_ms),
    );
    builder.connect(coolant, coolant_telemetry);
    builder.connect(coolant, engine_alias);
    builder.connect(coolant, coolant_field);
    builder.connect(coolant, coolant_display_units);
    builder.connect(coolant_display_units, coolant_row);

    // Exhaust: telemetry, standalone bus record, display.
    let exhaust_telemetry = builder.sink(TelemetryConsumer::new(
        telemetry.clone(),
        config.paths.exhaust_temperature.clone(),
    ));
    let exhaust_record = builder.sink(BusTemperatureConsumer::new(
        bus,
        EXHAUST_TEMPERATURE_INSTANCE,
        TemperatureSource::ExhaustGas,
    ));
    let exhaust_display_units = builder.transform(TransformKind::Units(unit.conversion()), None);
    let exhaust_row = builder.sink(
        DisplayConsumer::new(
            panel.clone(),
            3,
            "Exhaust",
            DisplayFormat::fixed(1, unit.suffix()),
        )
        .throttled(config.display.throttle_ms),
    );
    builder.connect(exhaust, exhaust_telemetry);
    builder.connect(exhaust, exhaust_record);
    builder.connect(exhaust, exhaust_display_units);
    builder.connect(exhaust_display_units, exhaust_row);

    // Tacho: pulse counts to revolutions (Hz) for telemetry, RPM for the
    // display.
    let revolutions = builder.transform(
        TransformKind::PulseRate(PulseRate::new(config.sensors.pulses_per_revolution)),
        Some(config.paths.revolutions.clone()),
    );
    let revolutions_telemetry = builder.sink(TelemetryConsumer::new(
        telemetry,
        config.paths.revolutions.clone(),
    ));
    let rpm = builder.transform(TransformKind::Units(UnitConversion::HertzToRpm), None);
    let rpm_row = builder.sink(
        DisplayConsumer::new(panel.clone(), 4, "RPM", DisplayFormat::fixed(0, ""))
            .throttled(config.display.throttle_ms),
    );
    builder.connect(tacho, revolutions);
    builder.connect(revolutions, revolutions_telemetry);
    builder.connect(revolutions, rpm);
    builder.connect(rpm, rpm_row);

    // Connectivity row, refreshed at most once per second.
    let link_row = builder.sink(
        DisplayConsumer::new(panel, 5, "Link", DisplayFormat::Link)
            .throttled(config.display.link_throttle_ms),
    );
    builder.connect(link, link_row);

    builder.build()
}

fn draw_header(panel: &SharedPanel, hostname: &str) {
    let mut panel = panel.lock();
    if header_row(&mut *panel, &format!("Host: {hostname}")).is_err() {
        debug!("display unavailable, skipping hostname header");
    }
}

fn header_row(panel: &mut dyn StatusPanel, text: &str) -> Result<(), DisplayUnavailable> {
    panel.clear_row(0)?;
    panel.write(0, text)?;
    panel.flush()
}

fn register_metadata(telemetry: &SharedTelemetry, config: &GatewayConfig) {
    let mut sink = telemetry.lock();
    sink.register_metadata(
        &config.paths.oil_temperature,
        TelemetryMetadata::new("K", "Engine Oil Temperature", "Oil Temperature", 10.0),
    );
    sink.register_metadata(
        &config.paths.coolant_temperature,
        TelemetryMetadata::new("K", "Engine Coolant Temperature", "Coolant Temperature", 10.0),
    );
    sink.register_metadata(
        &config.paths.engine_temperature,
        TelemetryMetadata::new("K", "Engine Temperature", "Temperature", 10.0),
    );
    sink.register_metadata(
        &config.paths.exhaust_temperature,
        TelemetryMetadata::new("K", "Wet Exhaust Temperature", "Exhaust Temperature", 10.0),
    );
    sink.register_metadata(
        &config.paths.revolutions,
        TelemetryMetadata::new("Hz", "Engine Revolutions", "Revolutions", 10.0),
    );
}
