//! Board-agnostic core logic for the task board firmware
//!
//! This crate decides *when* a step is done and *when* a clue should be
//! shown. It does not depend on any sensor bus or display hardware:
//!
//! - Sensor measurements and the sensor/screen collaborator traits
//! - Task steps and their comparison predicates
//! - Clue trigger state machine (gated, timeout-based hints)
//! - Parallel and sequential task composition
//! - Sensor registry and configuration-driven task building
//! - Tick controller tying a task to a clue screen

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod config;
pub mod controller;
pub mod measurement;
pub mod registry;
pub mod task;
pub mod time;
pub mod traits;

#[cfg(test)]
mod mock;

pub use controller::{TaskController, TickReport};
pub use measurement::{MeasurementError, MeasurementType, SensorMeasurement};
pub use registry::{RegistryError, SensorRegistry};
pub use task::{
    AnyTask, ClueAction, ClueState, Composition, MeasurementClue, ParallelTask, SequentialTask,
    Task, TaskError, TaskStep,
};
pub use time::{Clock, Instant, ManualClock};
pub use traits::{ClueScreen, SensorReader};
