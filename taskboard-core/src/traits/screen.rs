//! Clue screen trait

use crate::measurement::SensorMeasurement;

/// Rendering surface for task clues
///
/// The task core only decides *when* a clue is visible; implementations
/// decide how it looks.
pub trait ClueScreen {
    /// Show a "current vs. target" clue for the hinted step
    fn show_measurement_clue(&mut self, current: &SensorMeasurement, target: &SensorMeasurement);

    /// Show a textual clue
    fn show_text_clue(&mut self, text: &str);

    /// Remove every task clue from the screen
    fn clear_all_task_clue(&mut self);
}

impl<S: ClueScreen + ?Sized> ClueScreen for &mut S {
    fn show_measurement_clue(&mut self, current: &SensorMeasurement, target: &SensorMeasurement) {
        (**self).show_measurement_clue(current, target)
    }

    fn show_text_clue(&mut self, text: &str) {
        (**self).show_text_clue(text)
    }

    fn clear_all_task_clue(&mut self) {
        (**self).clear_all_task_clue()
    }
}
