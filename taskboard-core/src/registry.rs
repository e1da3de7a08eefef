//! Board-wide sensor registry
//!
//! Owns nothing: it lists the board's sensors by reference so task steps can
//! be wired up by name. The sensors outlive every task built from them.

use heapless::Vec;

use crate::traits::SensorReader;

/// Maximum sensors on one board
pub const MAX_SENSORS: usize = 32;

/// Errors registering a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// More than [`MAX_SENSORS`] sensors
    Full,
    /// Another sensor already uses this name
    DuplicateName,
}

/// Named sensors available to task steps
#[derive(Default)]
pub struct SensorRegistry<'a> {
    sensors: Vec<&'a dyn SensorReader, MAX_SENSORS>,
}

impl<'a> SensorRegistry<'a> {
    /// Create an empty registry
    pub const fn new() -> Self {
        Self { sensors: Vec::new() }
    }

    /// Add a sensor
    pub fn register(&mut self, sensor: &'a dyn SensorReader) -> Result<(), RegistryError> {
        if self.find(sensor.name()).is_some() {
            return Err(RegistryError::DuplicateName);
        }

        self.sensors.push(sensor).map_err(|_| RegistryError::Full)
    }

    /// Look up a sensor by name
    pub fn find(&self, name: &str) -> Option<&'a dyn SensorReader> {
        self.sensors.iter().copied().find(|s| s.name() == name)
    }

    /// Start an acquisition on every registered sensor
    pub fn start_all_reads(&self) {
        for sensor in &self.sensors {
            sensor.start_read();
        }
    }

    /// Registered sensors in registration order
    pub fn iter(&self) -> impl Iterator<Item = &'a dyn SensorReader> + '_ {
        self.sensors.iter().copied()
    }

    /// Number of registered sensors
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Whether no sensor is registered
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}
