//! Display side of the task board
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (LCD, OLED, ...)
//! - `Screen` character buffer with dirty tracking
//! - `ClueRenderer`, the `ClueScreen` implementation that lays clues out
//!   on a `Screen` and pushes it to a backend
//!
//! Clue calls only touch the buffer. The board loop calls
//! [`ClueRenderer::flush`] when it wants the hardware updated, so bus
//! errors surface there instead of inside the task core.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod renderer;
pub mod screen;

#[cfg(test)]
mod mock;

pub use backend::{DisplayBackend, DisplayError};
pub use renderer::{ClueRenderer, CLUE_ROWS, STATUS_ROW};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
