// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use binnacle_pipeline::{PulseRate, UnitConversion};

#[test]
fn test_first_sample_primes_without_output() {
    // Arrange
    let mut rate = PulseRate::new(97.0);

    // Act
    let output = rate.update(0, 0).expect("priming is not an anomaly");

    // Assert
    assert_eq!(output, None);
}

#[test]
fn test_unit_rate_sanity() {
    // Arrange: exactly one scale factor's worth of pulses in one second
    let mut rate = PulseRate::new(97.0);
    rate.update(0, 0).unwrap();

    // Act
    let output = rate.update(97, 1000).unwrap();

    // Assert
    assert_eq!(output, Some(1.0));
}

#[test]
fn test_rate_scales_with_pulse_delta_and_window() {
    // Arrange: 2x the scale factor over half a second = 4 units/s
    let mut rate = PulseRate::new(97.0);
    rate.update(100, 0).unwrap();

    // Act
    let output = rate.update(100 + 194, 500).unwrap();

    // Assert
    assert_eq!(output, Some(4.0));
}

#[test]
fn test_idle_counter_reads_zero_rate() {
    // Arrange
    let mut rate = PulseRate::new(97.0);
    rate.update(500, 0).unwrap();

    // Act
    let output = rate.update(500, 1000).unwrap();

    // Assert
    assert_eq!(output, Some(0.0));
}

#[test]
fn test_zero_elapsed_suppresses_output() {
    // Arrange
    let mut rate = PulseRate::new(97.0);
    rate.update(0, 1000).unwrap();

    // Act: same timestamp again: no divide by zero, no output
    let result = rate.update(97, 1000);

    // Assert
    assert!(result.is_err());
}

#[test]
fn test_backwards_clock_suppresses_and_resynchronizes() {
    // Arrange
    let mut rate = PulseRate::new(97.0);
    rate.update(0, 2000).unwrap();

    // Act: clock stepped backwards
    let result = rate.update(10, 1500);
    assert!(result.is_err());

    // Assert: the window re-anchored on the offending sample, so the next
    // well-ordered sample produces a sane rate instead of a huge delta.
    let output = rate.update(10 + 97, 2500).unwrap();
    assert_eq!(output, Some(1.0));
}

#[test]
fn test_window_advances_with_each_sample() {
    // Arrange: steady 97 pulses per second across three windows
    let mut rate = PulseRate::new(97.0);
    rate.update(0, 0).unwrap();

    // Act & Assert
    assert_eq!(rate.update(97, 1000).unwrap(), Some(1.0));
    assert_eq!(rate.update(194, 2000).unwrap(), Some(1.0));
    assert_eq!(rate.update(291, 3000).unwrap(), Some(1.0));
}

#[test]
fn test_kelvin_conversions() {
    assert!((UnitConversion::KelvinToCelsius.convert(273.15)).abs() < 1e-9);
    assert!((UnitConversion::KelvinToCelsius.convert(350.0) - 76.85).abs() < 1e-9);
    assert!((UnitConversion::KelvinToFahrenheit.convert(273.15) - 32.0).abs() < 1e-9);
}

#[test]
fn test_hertz_to_rpm() {
    assert_eq!(UnitConversion::HertzToRpm.convert(1.0), 60.0);
    assert_eq!(UnitConversion::HertzToRpm.convert(12.5), 750.0);
}
