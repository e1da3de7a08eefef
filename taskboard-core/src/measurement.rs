//! Sensor measurements
//!
//! A measurement is a tagged value. The tag must be checked before the
//! payload is interpreted; asking for the wrong variant is a
//! [`MeasurementError`], never a reinterpretation.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type tag of a measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeasurementType {
    /// On/off reading (buttons, switches, proximity triggers)
    Boolean,
    /// Scaled analog reading (potentiometers, faders)
    Numeric,
    /// Discrete position index (multi-position switches)
    Enum,
    /// No valid reading available
    Unknown,
}

/// Errors from interpreting a measurement payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementError {
    /// The measurement carries a different variant
    WrongType {
        expected: MeasurementType,
        actual: MeasurementType,
    },
}

/// A single sensor reading
///
/// Produced fresh by every read and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SensorMeasurement {
    Boolean(bool),
    Numeric(f32),
    Enum(u8),
    /// Stale, failed or not yet acquired
    #[default]
    Unknown,
}

impl SensorMeasurement {
    /// Type tag of this measurement
    pub const fn kind(&self) -> MeasurementType {
        match self {
            SensorMeasurement::Boolean(_) => MeasurementType::Boolean,
            SensorMeasurement::Numeric(_) => MeasurementType::Numeric,
            SensorMeasurement::Enum(_) => MeasurementType::Enum,
            SensorMeasurement::Unknown => MeasurementType::Unknown,
        }
    }

    /// Whether this measurement holds a usable value
    pub const fn is_known(&self) -> bool {
        !matches!(self, SensorMeasurement::Unknown)
    }

    /// Boolean payload
    pub fn as_boolean(&self) -> Result<bool, MeasurementError> {
        match *self {
            SensorMeasurement::Boolean(value) => Ok(value),
            other => Err(other.wrong_type(MeasurementType::Boolean)),
        }
    }

    /// Numeric payload
    pub fn as_numeric(&self) -> Result<f32, MeasurementError> {
        match *self {
            SensorMeasurement::Numeric(value) => Ok(value),
            other => Err(other.wrong_type(MeasurementType::Numeric)),
        }
    }

    /// Enum position payload
    pub fn as_enum(&self) -> Result<u8, MeasurementError> {
        match *self {
            SensorMeasurement::Enum(value) => Ok(value),
            other => Err(other.wrong_type(MeasurementType::Enum)),
        }
    }

    fn wrong_type(&self, expected: MeasurementType) -> MeasurementError {
        MeasurementError::WrongType {
            expected,
            actual: self.kind(),
        }
    }
}

impl fmt::Display for SensorMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorMeasurement::Boolean(true) => f.write_str("ON"),
            SensorMeasurement::Boolean(false) => f.write_str("OFF"),
            SensorMeasurement::Numeric(value) => write!(f, "{:.1}", value),
            SensorMeasurement::Enum(position) => write!(f, "#{}", position),
            SensorMeasurement::Unknown => f.write_str("--"),
        }
    }
}
