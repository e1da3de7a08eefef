//! Display backend trait
//!
//! Defines the interface for different display types.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Row or column outside the display
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Character display
///
/// Implementations handle the specifics of the controller chip and bus.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// Unbuffered displays can return `Ok(())`.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}

impl<B: DisplayBackend + ?Sized> DisplayBackend for &mut B {
    fn clear(&mut self) -> Result<(), DisplayError> {
        (**self).clear()
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        (**self).draw_text(row, col, text)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }

    fn dimensions(&self) -> (u8, u8) {
        (**self).dimensions()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
