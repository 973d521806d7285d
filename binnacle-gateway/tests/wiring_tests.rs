// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use binnacle_core::{Signal, TemperatureSource};
use binnacle_gateway::{build_pipeline, Drivers, GatewayConfig};
use binnacle_pipeline::{shared_bus, shared_panel, shared_telemetry, Pipeline};
use binnacle_test_utils::{
    FakePanel, PulseWheel, RecordingBus, RecordingTelemetry, ScriptedGauge, ScriptedProbe,
};

struct Rig {
    pipeline: Pipeline,
    bus: RecordingBus,
    telemetry: RecordingTelemetry,
    panel: FakePanel,
    wheel: PulseWheel,
}

fn rig(config: &GatewayConfig) -> Rig {
    let bus = RecordingBus::new();
    let telemetry = RecordingTelemetry::new();
    let panel = FakePanel::new();
    let wheel = PulseWheel::new();

    let drivers = Drivers {
        oil_probe: Box::new(ScriptedProbe::steady(350.0)),
        coolant_probe: Box::new(ScriptedProbe::steady(355.0)),
        exhaust_probe: Box::new(ScriptedProbe::steady(320.0)),
        tacho: Box::new(wheel.clone()),
        link: Box::new(ScriptedGauge::steady(1.0)),
        bus: shared_bus(bus.clone()),
        telemetry: shared_telemetry(telemetry.clone()),
        panel: shared_panel(panel.clone()),
    };

    let pipeline = build_pipeline(config, drivers).expect("standard wiring must build");
    Rig {
        pipeline,
        bus,
        telemetry,
        panel,
        wheel,
    }
}

#[test]
fn test_wiring_draws_hostname_header() {
    // Arrange & Act
    let r = rig(&GatewayConfig::default());

    // Assert: drawn during wiring, before any tick
    assert_eq!(r.panel.row_text(0), "Host: temperatures");
}

#[test]
fn test_wiring_registers_metadata_for_every_path() {
    // Arrange & Act
    let config = GatewayConfig::default();
    let r = rig(&config);

    // Assert
    let metadata = r.telemetry.metadata();
    let paths: Vec<_> = metadata.iter().map(|(path, _)| path.clone()).collect();
    assert_eq!(metadata.len(), 5);
    assert!(paths.contains(&config.paths.oil_temperature));
    assert!(paths.contains(&config.paths.coolant_temperature));
    assert!(paths.contains(&config.paths.engine_temperature));
    assert!(paths.contains(&config.paths.exhaust_temperature));
    assert!(paths.contains(&config.paths.revolutions));

    let revolutions = metadata
        .iter()
        .find(|(path, _)| *path == config.paths.revolutions)
        .map(|(_, m)| m.clone())
        .expect("revolutions metadata");
    assert_eq!(revolutions.units, "Hz");
}

#[test]
fn test_first_tick_fans_out_to_every_channel() {
    // Arrange
    let config = GatewayConfig::default();
    let mut r = rig(&config);

    // Act
    r.pipeline.tick(0);

    // Assert: composite record per temperature field update
    let records = r.bus.engine_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].oil_temperature, Some(350.0));
    assert_eq!(records[1].coolant_temperature, Some(355.0));

    // Exhaust goes out as its own record, never through the composite
    let temperatures = r.bus.temperature_records();
    assert_eq!(temperatures.len(), 1);
    assert_eq!(temperatures[0].instance, 2);
    assert_eq!(temperatures[0].source, TemperatureSource::ExhaustGas);
    assert_eq!(temperatures[0].temperature, 320.0);
    for record in &records {
        assert_eq!(record.fuel_rate, None);
    }

    // Telemetry in Kelvin, including the engine-temperature alias
    assert_eq!(
        r.telemetry.values_for(&config.paths.oil_temperature),
        vec![350.0]
    );
    assert_eq!(
        r.telemetry.values_for(&config.paths.engine_temperature),
        vec![355.0]
    );
    assert_eq!(
        r.telemetry.values_for(&config.paths.exhaust_temperature),
        vec![320.0]
    );

    // Display rows in Celsius, link row up
    assert_eq!(r.panel.row_text(1), "Oil: 76.9 C");
    assert_eq!(r.panel.row_text(2), "Coolant: 81.9 C");
    assert_eq!(r.panel.row_text(3), "Exhaust: 46.9 C");
    assert_eq!(r.panel.row_text(5), "Link: up");
}

#[test]
fn test_tacho_chain_publishes_hertz_and_displays_rpm() {
    // Arrange
    let config = GatewayConfig::default();
    let mut r = rig(&config);

    // Act: prime at t=0, one revolution's worth of pulses over one second
    r.pipeline.tick(0);
    r.wheel.spin(97);
    r.pipeline.tick(1000);

    // Assert
    assert_eq!(
        r.telemetry.values_for(&config.paths.revolutions),
        vec![1.0]
    );
    assert_eq!(r.panel.row_text(4), "RPM: 60");
}

#[test]
fn test_link_row_throttles_to_one_redraw_per_interval() {
    // Arrange: sample the link gauge every 100ms instead of every second
    let mut config = GatewayConfig::default();
    config.sensors.link_poll_ms = 100;
    let mut r = rig(&config);
    let flushes_after_wiring = r.panel.flush_count();

    // Act: fast link samples at t=0..400, before any other row redraws
    for step in 0..=4u64 {
        r.pipeline.tick(step * 100);
    }

    // Assert: temperatures drew once each (t=0), the tacho only primed,
    // and the link row drew only once despite five samples.
    let rows_drawn = 4; // oil, coolant, exhaust and link, all at t=0
    assert_eq!(r.panel.flush_count() - flushes_after_wiring, rows_drawn);
    assert_eq!(r.panel.row_text(5), "Link: up");
}

#[test]
fn test_fahrenheit_display_configuration() {
    // Arrange
    let mut config = GatewayConfig::default();
    config.display.unit = binnacle_gateway::TemperatureUnit::Fahrenheit;
    let mut r = rig(&config);

    // Act
    r.pipeline.tick(0);

    // Assert: 350 K = 170.33 F
    assert_eq!(r.panel.row_text(1), "Oil: 170.3 F");
}
