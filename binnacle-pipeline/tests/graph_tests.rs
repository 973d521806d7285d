// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use binnacle_core::{SensorReadError, Signal};
use binnacle_pipeline::{
    shared_telemetry, BuildError, PipelineBuilder, ProducerKind, TelemetryConsumer, TransformKind,
    UnitConversion,
};
use binnacle_test_utils::{RecordingTelemetry, ScriptedProbe};

fn path(name: &str) -> Signal {
    Signal::from(name)
}

#[test]
fn test_zero_period_is_rejected_at_build() {
    // Arrange
    let mut builder = PipelineBuilder::new();
    builder.producer(
        ProducerKind::temperature(ScriptedProbe::steady(350.0), 200.0..=700.0),
        path("propulsion.main.oilTemperature"),
        0,
    );

    // Act
    let error = builder.build().err().expect("zero period must not build");

    // Assert
    assert!(matches!(error, BuildError::ZeroPeriod { .. }));
}

#[test]
fn test_empty_signal_is_rejected_at_build() {
    // Arrange
    let mut builder = PipelineBuilder::new();
    builder.producer(
        ProducerKind::temperature(ScriptedProbe::steady(350.0), 200.0..=700.0),
        Signal::from(""),
        1000,
    );

    // Act & Assert
    assert!(matches!(
        builder.build().err(),
        Some(BuildError::EmptySignal { .. })
    ));
}

#[test]
fn test_transform_cycle_is_rejected_at_build() {
    // Arrange: two conversions feeding each other
    let mut builder = PipelineBuilder::new();
    let a = builder.transform(TransformKind::Units(UnitConversion::KelvinToCelsius), None);
    let b = builder.transform(TransformKind::Units(UnitConversion::KelvinToFahrenheit), None);
    builder.connect(a, b);
    builder.connect(b, a);

    // Act & Assert
    assert_eq!(builder.build().err(), Some(BuildError::TransformCycle));
}

#[test]
fn test_foreign_id_is_rejected_at_build() {
    // Arrange: a sink id minted by a different builder, out of range here
    let mut other = PipelineBuilder::new();
    other.sink(TelemetryConsumer::new(
        shared_telemetry(RecordingTelemetry::new()),
        path("propulsion.main.oilTemperature"),
    ));
    let foreign = other.sink(TelemetryConsumer::new(
        shared_telemetry(RecordingTelemetry::new()),
        path("propulsion.main.coolantTemperature"),
    ));

    let mut builder = PipelineBuilder::new();
    let oil = builder.producer(
        ProducerKind::temperature(ScriptedProbe::steady(350.0), 200.0..=700.0),
        path("propulsion.main.oilTemperature"),
        1000,
    );
    builder.connect(oil, foreign);

    // Act & Assert: this builder has no sinks at all, so the edge dangles
    assert!(matches!(
        builder.build().err(),
        Some(BuildError::DanglingEdge { .. })
    ));
}

#[test]
fn test_fanout_delivers_to_every_target_in_connect_order() {
    // Arrange: one producer fanned out to two telemetry paths
    let telemetry = RecordingTelemetry::new();
    let shared = shared_telemetry(telemetry.clone());

    let mut builder = PipelineBuilder::new();
    let coolant = builder.producer(
        ProducerKind::temperature(ScriptedProbe::steady(355.0), 200.0..=700.0),
        path("propulsion.main.coolantTemperature"),
        1000,
    );
    let direct = builder.sink(TelemetryConsumer::new(
        shared.clone(),
        path("propulsion.main.coolantTemperature"),
    ));
    let alias = builder.sink(TelemetryConsumer::new(
        shared,
        path("propulsion.main.temperature"),
    ));
    builder.connect(coolant, direct);
    builder.connect(coolant, alias);
    let mut pipeline = builder.build().unwrap();

    // Act
    pipeline.tick(0);

    // Assert
    let published = telemetry.published();
    assert_eq!(published.len(), 2);
    assert_eq!(published[0].0, path("propulsion.main.coolantTemperature"));
    assert_eq!(published[1].0, path("propulsion.main.temperature"));
    assert_eq!(published[0].1, 355.0);
    assert_eq!(published[1].1, 355.0);
}

#[test]
fn test_transform_retags_output_signal() {
    // Arrange: Kelvin producer, Celsius transform publishing under its own path
    let telemetry = RecordingTelemetry::new();

    let mut builder = PipelineBuilder::new();
    let oil = builder.producer(
        ProducerKind::temperature(ScriptedProbe::steady(350.0), 200.0..=700.0),
        path("propulsion.main.oilTemperature"),
        1000,
    );
    let celsius = builder.transform(
        TransformKind::Units(UnitConversion::KelvinToCelsius),
        Some(path("display.oilTemperature")),
    );
    let sink = builder.sink(TelemetryConsumer::new(
        shared_telemetry(telemetry.clone()),
        path("display.oilTemperature"),
    ));
    builder.connect(oil, celsius);
    builder.connect(celsius, sink);
    let mut pipeline = builder.build().unwrap();

    // Act
    pipeline.tick(0);

    // Assert
    let values = telemetry.values_for(&path("display.oilTemperature"));
    assert_eq!(values.len(), 1);
    assert!((values[0] - 76.85).abs() < 1e-9);
}

#[test]
fn test_failed_sample_keeps_last_reading() {
    // Arrange: good read, then a disconnect, then good again
    let probe = ScriptedProbe::new([
        Ok(350.0),
        Err(SensorReadError::Disconnected),
        Ok(351.0),
    ]);
    let mut builder = PipelineBuilder::new();
    let oil = builder.producer(
        ProducerKind::temperature(probe, 200.0..=700.0),
        path("propulsion.main.oilTemperature"),
        1000,
    );
    let mut pipeline = builder.build().unwrap();

    // Act & Assert
    pipeline.tick(0);
    assert_eq!(pipeline.last_reading(oil).map(|r| r.value), Some(350.0));

    pipeline.tick(1000);
    assert_eq!(pipeline.last_reading(oil).map(|r| r.value), Some(350.0));
    assert_eq!(pipeline.last_reading(oil).map(|r| r.at), Some(0));

    pipeline.tick(2000);
    assert_eq!(pipeline.last_reading(oil).map(|r| r.value), Some(351.0));
}

#[test]
fn test_out_of_range_reading_is_not_propagated() {
    // Arrange: an implausible spike between two sane values
    let telemetry = RecordingTelemetry::new();
    let probe = ScriptedProbe::new([Ok(350.0), Ok(1200.0), Ok(351.0)]);

    let mut builder = PipelineBuilder::new();
    let oil = builder.producer(
        ProducerKind::temperature(probe, 200.0..=700.0),
        path("propulsion.main.oilTemperature"),
        1000,
    );
    let sink = builder.sink(TelemetryConsumer::new(
        shared_telemetry(telemetry.clone()),
        path("propulsion.main.oilTemperature"),
    ));
    builder.connect(oil, sink);
    let mut pipeline = builder.build().unwrap();

    // Act
    pipeline.tick(0);
    pipeline.tick(1000);
    pipeline.tick(2000);

    // Assert: the spike never reached the sink
    assert_eq!(
        telemetry.values_for(&path("propulsion.main.oilTemperature")),
        vec![350.0, 351.0]
    );
}
