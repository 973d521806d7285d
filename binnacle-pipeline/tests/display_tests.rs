// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use binnacle_core::{Reading, Signal};
use binnacle_pipeline::{shared_panel, AcceptReading, DisplayConsumer, DisplayFormat};
use binnacle_test_utils::FakePanel;

fn reading(value: f64, at: u64) -> Reading {
    Reading::new(Signal::from("propulsion.main.oilTemperature"), value, at)
}

#[test]
fn test_renders_label_and_formatted_value() {
    // Arrange
    let panel = FakePanel::new();
    let mut row = DisplayConsumer::new(
        shared_panel(panel.clone()),
        1,
        "Oil",
        DisplayFormat::fixed(1, "C"),
    );

    // Act
    row.accept(&reading(76.9, 0));

    // Assert
    assert_eq!(panel.row_text(1), "Oil: 76.9 C");
    assert_eq!(row.last_rendered(), Some("Oil: 76.9 C"));
    assert_eq!(panel.flush_count(), 1);
}

#[test]
fn test_shorter_text_leaves_no_stale_characters() {
    // Arrange
    let panel = FakePanel::new();
    let mut row = DisplayConsumer::new(
        shared_panel(panel.clone()),
        2,
        "Coolant",
        DisplayFormat::fixed(1, ""),
    );

    // Act: a long value followed by a short one
    row.accept(&reading(-100.5, 0));
    row.accept(&reading(9.5, 1));

    // Assert: the row was cleared between draws
    assert_eq!(panel.row_text(2), "Coolant: 9.5");
}

#[test]
fn test_rerendering_same_value_is_idempotent() {
    // Arrange
    let panel = FakePanel::new();
    let mut row = DisplayConsumer::new(
        shared_panel(panel.clone()),
        1,
        "Oil",
        DisplayFormat::fixed(1, "C"),
    );

    // Act
    row.accept(&reading(76.9, 0));
    let first = panel.row_text(1);
    row.accept(&reading(76.9, 1));

    // Assert
    assert_eq!(panel.row_text(1), first);
}

#[test]
fn test_throttle_limits_redraw_rate() {
    // Arrange: readings every 100ms, redraws at most once per second
    let panel = FakePanel::new();
    let mut row = DisplayConsumer::new(
        shared_panel(panel.clone()),
        3,
        "RPM",
        DisplayFormat::fixed(0, ""),
    )
    .throttled(1000);

    // Act
    for step in 0..15u64 {
        row.accept(&reading(750.0 + step as f64, step * 100));
    }

    // Assert: draws at t=0 and t=1000 only within the 1.4s window
    assert_eq!(panel.flush_count(), 2);

    // The admitted draw at t=1000 showed the value current at that moment
    assert_eq!(panel.row_text(3), "RPM: 760");
}

#[test]
fn test_absent_panel_degrades_silently() {
    // Arrange
    let panel = FakePanel::new();
    let mut row = DisplayConsumer::new(
        shared_panel(panel.clone()),
        1,
        "Oil",
        DisplayFormat::fixed(1, "C"),
    );
    row.accept(&reading(76.9, 0));
    panel.set_absent(true);

    // Act: no panic, no error surface
    row.accept(&reading(80.0, 1));

    // Assert: the last successful render is still what the consumer knows
    assert_eq!(row.last_rendered(), Some("Oil: 76.9 C"));

    // Act: hardware comes back
    panel.set_absent(false);
    row.accept(&reading(81.0, 2));

    // Assert
    assert_eq!(panel.row_text(1), "Oil: 81.0 C");
}

#[test]
fn test_link_format_renders_up_down() {
    // Arrange
    let panel = FakePanel::new();
    let mut row = DisplayConsumer::new(shared_panel(panel.clone()), 5, "Link", DisplayFormat::Link);

    // Act & Assert
    row.accept(&reading(1.0, 0));
    assert_eq!(panel.row_text(5), "Link: up");
    row.accept(&reading(0.0, 1));
    assert_eq!(panel.row_text(5), "Link: down");
}
