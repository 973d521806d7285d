// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Display rows on the character-cell status panel.

use crate::sink::AcceptReading;
use crate::throttle::Throttle;
use crate::SharedPanel;
use binnacle_core::{DisplayUnavailable, Reading};
use tracing::trace;

/// How a row formats its value. A closed set; rows do not carry closures.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayFormat {
    /// Fixed-point number with a unit suffix, e.g. `76.9 C`.
    Fixed { decimals: usize, suffix: String },
    /// Renders a 0/1 gauge as `down`/`up`.
    Link,
}

impl DisplayFormat {
    pub fn fixed(decimals: usize, suffix: impl Into<String>) -> Self {
        Self::Fixed {
            decimals,
            suffix: suffix.into(),
        }
    }

    fn render(&self, value: f64) -> String {
        match self {
            DisplayFormat::Fixed { decimals, suffix } => {
                let decimals = *decimals;
                if suffix.is_empty() {
                    format!("{value:.decimals$}")
                } else {
                    format!("{value:.decimals$} {suffix}")
                }
            }
            DisplayFormat::Link => {
                if value > 0.5 { "up" } else { "down" }.to_string()
            }
        }
    }
}

/// Sink rendering `"<label>: <value>"` into one fixed panel row.
///
/// The row region is cleared before every draw so a shorter string never
/// leaves trailing characters from a longer predecessor. Rendering may be
/// throttled independently of the sampling rate. An absent panel degrades
/// to a no-op: the reading is dropped, the pipeline carries on.
pub struct DisplayConsumer {
    panel: SharedPanel,
    row: u8,
    label: String,
    format: DisplayFormat,
    throttle: Option<Throttle>,
    last_rendered: Option<String>,
}

impl DisplayConsumer {
    pub fn new(panel: SharedPanel, row: u8, label: impl Into<String>, format: DisplayFormat) -> Self {
        Self {
            panel,
            row,
            label: label.into(),
            format,
            throttle: None,
            last_rendered: None,
        }
    }

    /// Limit redraws to one per `min_interval_ms`, regardless of how often
    /// readings arrive.
    #[must_use]
    pub fn throttled(mut self, min_interval_ms: u64) -> Self {
        self.throttle = Some(Throttle::new(min_interval_ms));
        self
    }

    /// The text last drawn into the row, if any draw has succeeded.
    pub fn last_rendered(&self) -> Option<&str> {
        self.last_rendered.as_deref()
    }

    fn draw(&mut self, text: &str) -> Result<(), DisplayUnavailable> {
        let mut panel = self.panel.lock();
        panel.clear_row(self.row)?;
        panel.write(self.row, text)?;
        panel.flush()
    }
}

impl AcceptReading for DisplayConsumer {
    fn accept(&mut self, reading: &Reading) {
        if let Some(throttle) = &mut self.throttle {
            if !throttle.admit(reading.at) {
                return;
            }
        }

        let text = format!("{}: {}", self.label, self.format.render(reading.value));
        match self.draw(&text) {
            Ok(()) => self.last_rendered = Some(text),
            Err(DisplayUnavailable) => {
                trace!(row = self.row, "display unavailable, skipping draw");
            }
        }
    }
}
