//! Host-side test doubles

use core::cell::Cell;

use heapless::{String, Vec};

use crate::measurement::SensorMeasurement;
use crate::traits::{ClueScreen, SensorReader};

/// Sensor whose value is set directly by the test
pub struct MockSensor {
    name: &'static str,
    value: Cell<SensorMeasurement>,
    reads_started: Cell<u32>,
}

impl MockSensor {
    pub fn new(name: &'static str, value: SensorMeasurement) -> Self {
        Self {
            name,
            value: Cell::new(value),
            reads_started: Cell::new(0),
        }
    }

    pub fn boolean(name: &'static str, value: bool) -> Self {
        Self::new(name, SensorMeasurement::Boolean(value))
    }

    pub fn numeric(name: &'static str, value: f32) -> Self {
        Self::new(name, SensorMeasurement::Numeric(value))
    }

    pub fn set(&self, value: SensorMeasurement) {
        self.value.set(value);
    }

    pub fn set_bool(&self, value: bool) {
        self.set(SensorMeasurement::Boolean(value));
    }

    pub fn reads_started(&self) -> u32 {
        self.reads_started.get()
    }
}

impl SensorReader for MockSensor {
    fn name(&self) -> &str {
        self.name
    }

    fn start_read(&self) {
        self.reads_started.set(self.reads_started.get() + 1);
    }

    fn read(&self) -> SensorMeasurement {
        self.value.get()
    }
}

/// What a [`RecordingScreen`] was asked to do
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenCall {
    Measurement(SensorMeasurement, SensorMeasurement),
    Text(String<48>),
    Clear,
}

/// Screen that records every call
#[derive(Default)]
pub struct RecordingScreen {
    pub calls: Vec<ScreenCall, 64>,
}

impl RecordingScreen {
    pub fn last(&self) -> Option<&ScreenCall> {
        self.calls.last()
    }

    pub fn clears(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ScreenCall::Clear))
            .count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl ClueScreen for RecordingScreen {
    fn show_measurement_clue(&mut self, current: &SensorMeasurement, target: &SensorMeasurement) {
        let _ = self.calls.push(ScreenCall::Measurement(*current, *target));
    }

    fn show_text_clue(&mut self, text: &str) {
        let mut owned = String::new();
        let _ = owned.push_str(text);
        let _ = self.calls.push(ScreenCall::Text(owned));
    }

    fn clear_all_task_clue(&mut self) {
        let _ = self.calls.push(ScreenCall::Clear);
    }
}
