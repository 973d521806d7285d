// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use binnacle_core::{EngineField, EngineStatus1, EngineStatus2};
use binnacle_pipeline::{shared_bus, EngineAggregator};
use binnacle_test_utils::RecordingBus;

fn aggregator_with_bus() -> (EngineAggregator, RecordingBus) {
    let bus = RecordingBus::new();
    (EngineAggregator::new(0, shared_bus(bus.clone())), bus)
}

#[test]
fn test_first_update_emits_with_other_fields_not_available() {
    // Arrange
    let (mut aggregator, bus) = aggregator_with_bus();

    // Act: oil temperature arrives alone
    aggregator.on_update(EngineField::OilTemperature, 350.0);

    // Assert: one record, oil set, coolant (and everything else) NA
    let records = bus.engine_records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].oil_temperature, Some(350.0));
    assert_eq!(records[0].coolant_temperature, None);
    assert_eq!(records[0].oil_pressure, None);
    assert_eq!(records[0].status1, EngineStatus1::NO_FAULT);
    assert_eq!(records[0].status2, EngineStatus2::NO_FAULT);
}

#[test]
fn test_later_update_retains_earlier_fields() {
    // Arrange
    let (mut aggregator, bus) = aggregator_with_bus();
    aggregator.on_update(EngineField::OilTemperature, 350.0);

    // Act: coolant arrives on its own schedule
    aggregator.on_update(EngineField::CoolantTemperature, 355.0);

    // Assert: second record carries the retained oil value
    let records = bus.engine_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].oil_temperature, Some(350.0));
    assert_eq!(records[1].coolant_temperature, Some(355.0));
}

#[test]
fn test_emission_on_every_constituent_update() {
    // Arrange
    let (mut aggregator, bus) = aggregator_with_bus();

    // Act: updates at the union of the constituent schedules
    aggregator.on_update(EngineField::OilTemperature, 350.0);
    aggregator.on_update(EngineField::CoolantTemperature, 355.0);
    aggregator.on_update(EngineField::OilTemperature, 350.5);
    aggregator.on_update(EngineField::OilTemperature, 351.0);

    // Assert: one record per update, no batching down to the intersection
    assert_eq!(bus.engine_record_count(), 4);
    let records = bus.engine_records();
    assert_eq!(records[3].oil_temperature, Some(351.0));
    assert_eq!(records[3].coolant_temperature, Some(355.0));
}

#[test]
fn test_never_updated_numeric_fields_are_na_never_zero() {
    // Arrange
    let (mut aggregator, bus) = aggregator_with_bus();

    // Act: many updates to one field only
    for i in 0..5 {
        aggregator.on_update(EngineField::CoolantTemperature, 350.0 + f64::from(i));
    }

    // Assert: in every emitted record the untouched fields are exactly NA
    for record in bus.engine_records() {
        assert_eq!(record.oil_temperature, None);
        assert_eq!(record.alternator_voltage, None);
        assert_eq!(record.fuel_rate, None);
        assert_ne!(record.oil_temperature, Some(0.0));
    }
}

#[test]
fn test_status_fields_are_never_not_available() {
    // Arrange
    let (mut aggregator, bus) = aggregator_with_bus();

    // Act
    aggregator.on_update(EngineField::OilTemperature, 350.0);

    // Assert: the record type itself makes status NA unrepresentable; the
    // emitted value is the explicit no-fault encoding.
    let records = bus.engine_records();
    assert!(records[0].status1.is_clear());
    assert!(records[0].status2.is_clear());
}

#[test]
fn test_transmit_failure_drops_emission_without_retry() {
    // Arrange
    let (mut aggregator, bus) = aggregator_with_bus();
    aggregator.on_update(EngineField::OilTemperature, 350.0);
    bus.fail_next(1);

    // Act: this emission hits a busy bus
    aggregator.on_update(EngineField::CoolantTemperature, 355.0);

    // Assert: nothing new on the bus: no retry, no backlog
    assert_eq!(bus.engine_record_count(), 1);

    // Act: next constituent update transmits fresh state
    aggregator.on_update(EngineField::OilTemperature, 351.0);

    // Assert: the new record carries the coolant value stored during the
    // failed emission; only bus state was lost, not aggregator state.
    let records = bus.engine_records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].oil_temperature, Some(351.0));
    assert_eq!(records[1].coolant_temperature, Some(355.0));
}

#[test]
fn test_aggregator_state_reflects_latest_values() {
    // Arrange
    let (mut aggregator, _bus) = aggregator_with_bus();

    // Act
    aggregator.on_update(EngineField::OilTemperature, 350.0);
    aggregator.on_update(EngineField::OilTemperature, 352.0);

    // Assert
    assert_eq!(
        aggregator.record().get(EngineField::OilTemperature),
        Some(352.0)
    );
}
