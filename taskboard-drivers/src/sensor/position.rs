//! Multi-position switch read through the ADC
//!
//! A resistor ladder puts each switch position at a distinct voltage. The
//! position is the number of thresholds the raw reading reaches.

use core::cell::Cell;

use embedded_hal::i2c::I2c;
use taskboard_core::{SensorMeasurement, SensorReader};

use super::acquire;
use crate::pbhub::{Channel, SharedPbHub};

/// Enum sensor decoding an analog level into a position index
pub struct PositionSensor<'a, I2C> {
    name: &'a str,
    hub: &'a SharedPbHub<I2C>,
    channel: Channel,
    /// Ascending raw levels separating positions
    thresholds: &'a [u16],
    latest: Cell<SensorMeasurement>,
}

impl<'a, I2C> PositionSensor<'a, I2C> {
    /// `thresholds` must be ascending; `n` thresholds give `n + 1` positions
    pub fn new(
        name: &'a str,
        hub: &'a SharedPbHub<I2C>,
        channel: Channel,
        thresholds: &'a [u16],
    ) -> Self {
        Self {
            name,
            hub,
            channel,
            thresholds,
            latest: Cell::new(SensorMeasurement::Unknown),
        }
    }

    /// Number of distinct positions
    pub fn positions(&self) -> u8 {
        u8::try_from(self.thresholds.len() + 1).unwrap_or(u8::MAX)
    }

    /// Position index for a raw ADC level
    pub fn decode(&self, raw: u16) -> u8 {
        let reached = self.thresholds.iter().take_while(|&&t| raw >= t).count();
        u8::try_from(reached).unwrap_or(u8::MAX)
    }
}

impl<I2C: I2c> SensorReader for PositionSensor<'_, I2C> {
    fn name(&self) -> &str {
        self.name
    }

    fn start_read(&self) {
        let measurement = acquire(
            self.hub,
            self.name,
            |hub| hub.read_analog(self.channel),
            |raw| SensorMeasurement::Enum(self.decode(raw)),
        );
        self.latest.set(measurement);
    }

    fn read(&self) -> SensorMeasurement {
        self.latest.get()
    }
}
