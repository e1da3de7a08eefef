//! Configuration type definitions

use heapless::{String, Vec};

use crate::measurement::SensorMeasurement;
use crate::task::{Composition, RandomTarget, StepKind, MAX_STEPS, MAX_TASK_NAME_LEN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum sensor name length in configuration
pub const MAX_SENSOR_NAME_LEN: usize = 16;

/// Sensor name as stored in configuration
pub type SensorName = String<MAX_SENSOR_NAME_LEN>;

/// Errors loading or building a task from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Binary blob could not be decoded
    Decode,
    /// Output buffer too small to encode into
    Encode,
    /// Step or clue trigger names a sensor missing from the registry
    UnknownSensor,
    /// Random target range is empty or malformed
    InvalidTarget,
    /// Random targets require `EqualToRandom` and vice versa
    KindMismatch,
    /// More than [`MAX_STEPS`] steps
    TooManySteps,
    /// Name longer than the configured capacity
    NameTooLong,
}

impl From<crate::task::TaskError> for ConfigError {
    fn from(err: crate::task::TaskError) -> Self {
        match err {
            crate::task::TaskError::TooManySteps => ConfigError::TooManySteps,
            crate::task::TaskError::InvalidTarget => ConfigError::InvalidTarget,
        }
    }
}

/// Where a step's expected value comes from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TargetConfig {
    /// Fixed value
    Fixed(SensorMeasurement),
    /// Drawn once when the task is built
    Random(RandomTarget),
}

/// One step of a task
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepConfig {
    /// Monitored sensor name
    pub sensor: SensorName,
    /// Comparison kind
    pub kind: StepKind,
    /// Expected value
    pub target: TargetConfig,
    /// Allowed deviation for numeric equality
    pub tolerance: f32,
    /// Boolean sensor gating the clue (None = always show)
    pub clue_trigger: Option<SensorName>,
    /// Grace window after the clue trigger is released
    pub clue_timeout_ms: u32,
}

impl StepConfig {
    /// Step comparing `sensor` against a fixed target
    pub fn fixed(sensor: &str, kind: StepKind, target: SensorMeasurement) -> Result<Self, ConfigError> {
        Ok(Self {
            sensor: name_from(sensor)?,
            kind,
            target: TargetConfig::Fixed(target),
            tolerance: 0.0,
            clue_trigger: None,
            clue_timeout_ms: 0,
        })
    }

    /// Step matching a random target drawn from `range`
    pub fn random(sensor: &str, range: RandomTarget) -> Result<Self, ConfigError> {
        Ok(Self {
            sensor: name_from(sensor)?,
            kind: StepKind::EqualToRandom,
            target: TargetConfig::Random(range),
            tolerance: 0.0,
            clue_trigger: None,
            clue_timeout_ms: 0,
        })
    }

    /// Set the numeric tolerance
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Gate the clue on `trigger`
    pub fn with_clue(mut self, trigger: &str, timeout_ms: u32) -> Result<Self, ConfigError> {
        self.clue_trigger = Some(name_from(trigger)?);
        self.clue_timeout_ms = timeout_ms;
        Ok(self)
    }
}

/// A complete task
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TaskConfig {
    /// Display name
    pub name: String<MAX_TASK_NAME_LEN>,
    /// How steps compose
    pub composition: Composition,
    /// Steps in order
    pub steps: Vec<StepConfig, MAX_STEPS>,
}

impl TaskConfig {
    /// Empty task with the given name and composition
    pub fn new(name: &str, composition: Composition) -> Result<Self, ConfigError> {
        let mut stored = String::new();
        stored.push_str(name).map_err(|_| ConfigError::NameTooLong)?;

        Ok(Self {
            name: stored,
            composition,
            steps: Vec::new(),
        })
    }

    /// Append a step
    pub fn push_step(&mut self, step: StepConfig) -> Result<(), ConfigError> {
        self.steps.push(step).map_err(|_| ConfigError::TooManySteps)
    }

    /// Decode a postcard blob
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        postcard::from_bytes(bytes).map_err(|_| ConfigError::Decode)
    }

    /// Encode into `buf`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_postcard<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encode)
    }
}

fn name_from(name: &str) -> Result<SensorName, ConfigError> {
    let mut stored = SensorName::new();
    stored.push_str(name).map_err(|_| ConfigError::NameTooLong)?;
    Ok(stored)
}
