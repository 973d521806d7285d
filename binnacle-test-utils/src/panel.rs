// Copyright 2025 Binnacle Contributors
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use binnacle_core::{DisplayUnavailable, StatusPanel};
use parking_lot::Mutex;
use std::sync::Arc;

/// Character cells per row, matching a 128px panel with a 6px font.
pub const PANEL_WIDTH: usize = 21;
/// Text rows on the panel.
pub const PANEL_ROWS: usize = 8;

#[derive(Debug)]
struct PanelState {
    rows: Vec<Vec<char>>,
    absent: bool,
    flushes: u32,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            rows: vec![vec![' '; PANEL_WIDTH]; PANEL_ROWS],
            absent: false,
            flushes: 0,
        }
    }
}

/// A character-cell model of the status panel.
///
/// `write` overlays characters without blanking the rest of the row, the
/// way a real framebuffer does, so a consumer that forgets to clear the
/// row first leaves stale trailing characters behind, and tests see them.
/// Clones share state.
#[derive(Debug, Clone, Default)]
pub struct FakePanel {
    state: Arc<Mutex<PanelState>>,
}

impl FakePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate unplugged display hardware: every panel call fails with
    /// [`DisplayUnavailable`] until re-attached.
    pub fn set_absent(&self, absent: bool) {
        self.state.lock().absent = absent;
    }

    /// Visible text of a row, trailing blanks stripped.
    pub fn row_text(&self, row: u8) -> String {
        let state = self.state.lock();
        state
            .rows
            .get(row as usize)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    pub fn flush_count(&self) -> u32 {
        self.state.lock().flushes
    }
}

impl StatusPanel for FakePanel {
    fn clear_row(&mut self, row: u8) -> Result<(), DisplayUnavailable> {
        let mut state = self.state.lock();
        if state.absent {
            return Err(DisplayUnavailable);
        }
        if let Some(cells) = state.rows.get_mut(row as usize) {
            cells.fill(' ');
        }
        Ok(())
    }

    fn write(&mut self, row: u8, text: &str) -> Result<(), DisplayUnavailable> {
        let mut state = self.state.lock();
        if state.absent {
            return Err(DisplayUnavailable);
        }
        if let Some(cells) = state.rows.get_mut(row as usize) {
            for (cell, ch) in cells.iter_mut().zip(text.chars()) {
                *cell = ch;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayUnavailable> {
        let mut state = self.state.lock();
        if state.absent {
            return Err(DisplayUnavailable);
        }
        state.flushes += 1;
        Ok(())
    }
}
