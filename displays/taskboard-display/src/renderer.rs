//! Clue renderer
//!
//! Lays task clues out on a [`Screen`]. Rows 0-2 belong to the clue; the
//! bottom row is a free-form status line the board can use for the task
//! name or elapsed time.
//!
//! ```text
//! +--------------------+
//! |Current: 12.5       |
//! |Target:  40.0       |
//! |                    |
//! |Panel        01:23  |
//! +--------------------+
//! ```

use core::fmt::Write;
use core::ops::Range;

use heapless::String;
use taskboard_core::{ClueScreen, SensorMeasurement};

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};

/// Rows owned by the clue
pub const CLUE_ROWS: Range<usize> = 0..3;

/// Row left to the board
pub const STATUS_ROW: usize = 3;

/// [`ClueScreen`] drawing onto a character display
pub struct ClueRenderer<B> {
    backend: B,
    screen: Screen,
}

impl<B: DisplayBackend> ClueRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            screen: Screen::new(),
        }
    }

    /// Check the backend and draw the initial (blank) screen
    pub fn init(&mut self) -> Result<(), DisplayError> {
        if !self.backend.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        let (cols, rows) = self.backend.dimensions();
        if usize::from(cols) < SCREEN_COLS || usize::from(rows) < SCREEN_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }

        self.screen.mark_dirty();
        self.flush()
    }

    /// Push pending changes to the display
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        self.screen.render(&mut self.backend)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Release the backend
    pub fn release(self) -> B {
        self.backend
    }
}

impl<B> ClueRenderer<B> {
    /// Set the status line
    pub fn set_status(&mut self, text: &str) {
        self.screen.set_line(STATUS_ROW, text);
    }

    /// Buffered screen content
    pub fn screen(&self) -> &Screen {
        &self.screen
    }
}

impl<B> ClueScreen for ClueRenderer<B> {
    fn show_measurement_clue(&mut self, current: &SensorMeasurement, target: &SensorMeasurement) {
        let mut line: String<32> = String::new();
        // Overflow only drops the tail, which set_line would cut anyway
        let _ = write!(line, "Current: {}", current);
        self.screen.set_line(CLUE_ROWS.start, &line);

        line.clear();
        let _ = write!(line, "Target:  {}", target);
        self.screen.set_line(CLUE_ROWS.start + 1, &line);

        self.screen.clear_rows(CLUE_ROWS.start + 2..CLUE_ROWS.end);
    }

    fn show_text_clue(&mut self, text: &str) {
        let mut rest = text;
        for row in CLUE_ROWS {
            let (head, tail) = wrap(rest);
            self.screen.set_line(row, head);
            rest = tail;
        }
    }

    fn clear_all_task_clue(&mut self) {
        self.screen.clear_rows(CLUE_ROWS);
    }
}

/// Split off one line, breaking at the last space when the text is too long
fn wrap(text: &str) -> (&str, &str) {
    if text.len() <= LINE_LEN {
        return (text, "");
    }

    let mut split = LINE_LEN;
    while !text.is_char_boundary(split) {
        split -= 1;
    }

    if text.as_bytes()[split] == b' ' {
        return (&text[..split], &text[split + 1..]);
    }

    match text[..split].rfind(' ') {
        Some(space) if space > 0 => (&text[..space], &text[space + 1..]),
        _ => text.split_at(split),
    }
}
