//! Digital input (buttons, switches, proximity triggers)

use core::cell::Cell;

use embedded_hal::i2c::I2c;
use taskboard_core::{SensorMeasurement, SensorReader};

use super::acquire;
use crate::pbhub::{Channel, Port, SharedPbHub};

/// Boolean sensor on one hub pin
pub struct DigitalSensor<'a, I2C> {
    name: &'a str,
    hub: &'a SharedPbHub<I2C>,
    channel: Channel,
    port: Port,
    /// Report `true` when the pin reads low
    active_low: bool,
    latest: Cell<SensorMeasurement>,
}

impl<'a, I2C> DigitalSensor<'a, I2C> {
    pub fn new(name: &'a str, hub: &'a SharedPbHub<I2C>, channel: Channel, port: Port) -> Self {
        Self {
            name,
            hub,
            channel,
            port,
            active_low: false,
            latest: Cell::new(SensorMeasurement::Unknown),
        }
    }

    /// Invert the pin level (pull-up wiring)
    pub fn active_low(mut self) -> Self {
        self.active_low = true;
        self
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn port(&self) -> Port {
        self.port
    }
}

impl<I2C: I2c> SensorReader for DigitalSensor<'_, I2C> {
    fn name(&self) -> &str {
        self.name
    }

    fn start_read(&self) {
        let measurement = acquire(
            self.hub,
            self.name,
            |hub| hub.read_digital(self.channel, self.port),
            |level| SensorMeasurement::Boolean(level != self.active_low),
        );
        self.latest.set(measurement);
    }

    fn read(&self) -> SensorMeasurement {
        self.latest.get()
    }
}
