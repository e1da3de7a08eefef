//! Collaborator traits
//!
//! These traits define the interface between the task core and the
//! hardware-specific sensor drivers and clue displays.

pub mod screen;
pub mod sensor;

pub use screen::ClueScreen;
pub use sensor::SensorReader;
