//! Analog input (potentiometers, faders)

use core::cell::Cell;

use embedded_hal::i2c::I2c;
use taskboard_core::{SensorMeasurement, SensorReader};

use super::acquire;
use crate::pbhub::{Channel, SharedPbHub};

/// Numeric sensor on a channel's ADC
///
/// Reports `raw * scale`.
pub struct AnalogSensor<'a, I2C> {
    name: &'a str,
    hub: &'a SharedPbHub<I2C>,
    channel: Channel,
    scale: f32,
    latest: Cell<SensorMeasurement>,
}

impl<'a, I2C> AnalogSensor<'a, I2C> {
    pub fn new(name: &'a str, hub: &'a SharedPbHub<I2C>, channel: Channel) -> Self {
        Self {
            name,
            hub,
            channel,
            scale: 1.0,
            latest: Cell::new(SensorMeasurement::Unknown),
        }
    }

    /// Multiply raw ADC counts by `scale`
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl<I2C: I2c> SensorReader for AnalogSensor<'_, I2C> {
    fn name(&self) -> &str {
        self.name
    }

    fn start_read(&self) {
        let measurement = acquire(
            self.hub,
            self.name,
            |hub| hub.read_analog(self.channel),
            |raw| SensorMeasurement::Numeric(f32::from(raw) * self.scale),
        );
        self.latest.set(measurement);
    }

    fn read(&self) -> SensorMeasurement {
        self.latest.get()
    }
}
