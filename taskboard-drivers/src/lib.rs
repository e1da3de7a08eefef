//! Sensor bus drivers for the task board
//!
//! Concrete implementations of the collaborator traits defined in
//! taskboard-core:
//!
//! - PbHub I2C port expander (digital, PWM and analog I/O)
//! - Digital, analog and multi-position sensors read through the hub
//! - Monotonic clock backed by embassy-time (`embassy` feature)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

#[cfg(feature = "embassy")]
pub mod clock;
pub mod pbhub;
pub mod sensor;

#[cfg(test)]
mod mock;

#[cfg(feature = "embassy")]
pub use clock::EmbassyClock;
pub use pbhub::{Channel, PbHub, PbHubError, Port, SharedPbHub};
pub use sensor::{AnalogSensor, DigitalSensor, PositionSensor};
