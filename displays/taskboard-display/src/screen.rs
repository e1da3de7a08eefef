//! Screen buffer
//!
//! Character buffer for text-mode displays. Lines are edited in memory and
//! pushed to a [`DisplayBackend`] only when something changed.

use core::ops::Range;

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows
pub const SCREEN_ROWS: usize = 4;

/// Number of character columns
pub const SCREEN_COLS: usize = 20;

/// Maximum bytes per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for character displays
#[derive(Clone)]
pub struct Screen {
    /// Current display content
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        self.clear_rows(0..SCREEN_ROWS);
    }

    /// Blank a range of rows
    pub fn clear_rows(&mut self, rows: Range<usize>) {
        for line in self.lines.iter_mut().take(rows.end).skip(rows.start) {
            if !line.is_empty() {
                line.clear();
                self.dirty = true;
            }
        }
    }

    /// Set the content of a row
    ///
    /// Text longer than a line is cut at the last whole character that
    /// fits. Rows past the bottom are ignored.
    pub fn set_line(&mut self, row: usize, text: &str) {
        let Some(line) = self.lines.get_mut(row) else {
            return;
        };

        let mut fitted = String::<LINE_LEN>::new();
        for c in text.chars() {
            if fitted.push(c).is_err() {
                break;
            }
        }

        if *line != fitted {
            *line = fitted;
            self.dirty = true;
        }
    }

    /// Get the content of a row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a redraw on the next render
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Draw the buffer if it changed since the last render
    ///
    /// The buffer stays dirty when the backend fails, so the next call
    /// retries the whole screen.
    pub fn render<B: DisplayBackend + ?Sized>(
        &mut self,
        backend: &mut B,
    ) -> Result<(), DisplayError> {
        if !self.dirty {
            return Ok(());
        }

        backend.clear()?;
        for (row, line) in (0u8..).zip(self.lines.iter()) {
            if !line.is_empty() {
                backend.draw_text(row, 0, line)?;
            }
        }
        backend.flush()?;

        self.dirty = false;
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}
