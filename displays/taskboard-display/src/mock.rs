//! Host-side display double

use std::string::String;
use std::vec::Vec;

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{SCREEN_COLS, SCREEN_ROWS};

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Clear,
    Text(u8, String),
    Flush,
}

/// Backend that records every call
#[derive(Default)]
pub struct RecordingBackend {
    pub calls: Vec<BackendCall>,
    /// Fail every call with `Communication`
    pub fail: bool,
    /// Report not ready
    pub offline: bool,
}

impl RecordingBackend {
    fn check(&self) -> Result<(), DisplayError> {
        if self.fail {
            Err(DisplayError::Communication)
        } else {
            Ok(())
        }
    }

    /// Text drawn since the last clear, by row
    pub fn visible(&self) -> [String; SCREEN_ROWS] {
        let mut rows: [String; SCREEN_ROWS] = Default::default();
        for call in &self.calls {
            match call {
                BackendCall::Clear => rows = Default::default(),
                BackendCall::Text(row, text) => rows[usize::from(*row)] = text.clone(),
                BackendCall::Flush => {}
            }
        }
        rows
    }
}

impl DisplayBackend for RecordingBackend {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.calls.push(BackendCall::Clear);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.check()?;
        if usize::from(row) >= SCREEN_ROWS || usize::from(col) >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.calls.push(BackendCall::Text(row, text.into()));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.check()?;
        self.calls.push(BackendCall::Flush);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }

    fn is_ready(&self) -> bool {
        !self.offline
    }
}
