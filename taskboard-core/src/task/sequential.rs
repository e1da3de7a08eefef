//! Sequential composition
//!
//! Steps must be achieved in index order. Only the frontier step (the
//! lowest-indexed incomplete one) is read and evaluated; steps beyond it are
//! left alone until the frontier reaches them. At most one step completes
//! per tick, so completion times never decrease along the step list.

use super::clue::ClueAction;
use super::{ClueText, MeasurementClue, Task, TaskCore, TaskError, TaskStep};
use crate::time::Clock;
use crate::traits::ClueScreen;

/// Task whose steps must be achieved one after another
pub struct SequentialTask<'a> {
    core: TaskCore<'a>,
}

impl<'a> SequentialTask<'a> {
    /// Create a task; elapsed time starts now
    pub fn new<I>(name: &str, steps: I, clock: &'a dyn Clock) -> Result<Self, TaskError>
    where
        I: IntoIterator<Item = TaskStep<'a>>,
    {
        Ok(Self {
            core: TaskCore::new(name, steps, clock)?,
        })
    }

    /// Steps in index order
    pub fn steps(&self) -> &[TaskStep<'a>] {
        self.core.steps()
    }

    /// Index of the step currently being evaluated
    pub fn frontier(&self) -> Option<usize> {
        self.core.first_incomplete()
    }
}

impl Task for SequentialTask<'_> {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn step_count(&self) -> usize {
        self.core.len()
    }

    fn update(&mut self) -> bool {
        let Some(frontier) = self.frontier() else {
            return false;
        };

        let elapsed = self.core.elapsed_time();
        let changed = self.core.poll_step(frontier, elapsed);

        if changed && self.core.all_done() {
            info!("Task {} done in {} us", self.core.name(), elapsed);
        }

        changed
    }

    fn done(&self) -> bool {
        self.core.all_done()
    }

    fn step_done(&self, step: usize) -> bool {
        self.core.step_done(step)
    }

    fn step_done_time(&self, step: usize) -> Option<u64> {
        self.core.step_done_time(step)
    }

    fn elapsed_time(&self) -> u64 {
        self.core.elapsed_time()
    }

    fn hinted_step(&self) -> Option<usize> {
        self.frontier()
    }

    fn get_clue(&self) -> Option<MeasurementClue> {
        self.hinted_step().map(|step| self.core.clue_for(step))
    }

    fn get_clue_string(&self) -> ClueText {
        self.core.clue_string(self.hinted_step())
    }

    fn show_clue(&mut self, screen: &mut dyn ClueScreen) -> ClueAction {
        match self.hinted_step() {
            Some(step) => self.core.show_step_clue(step, screen),
            None => ClueAction::Skipped,
        }
    }

    fn restart(&mut self) {
        self.core.restart();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::SensorMeasurement;
    use crate::mock::MockSensor;
    use crate::time::ManualClock;

    fn button_step(sensor: &MockSensor) -> TaskStep<'_> {
        TaskStep::equal(sensor, SensorMeasurement::Boolean(true))
    }

    #[test]
    fn test_later_steps_wait_for_frontier() {
        let clock = ManualClock::new();
        let first = MockSensor::boolean("first", false);
        let second = MockSensor::boolean("second", true);
        let mut task =
            SequentialTask::new("combo", [button_step(&first), button_step(&second)], &clock)
                .unwrap();

        // Second sensor already satisfied but not evaluated yet
        clock.advance_ms(10);
        assert!(!task.update());
        assert!(!task.step_done(1));
        assert_eq!(task.frontier(), Some(0));
        assert_eq!(task.get_clue_string().as_str(), "Waiting sensor first");
    }

    #[test]
    fn test_sensors_beyond_frontier_not_read() {
        let clock = ManualClock::new();
        let sensors = [
            MockSensor::boolean("s0", false),
            MockSensor::boolean("s1", false),
            MockSensor::boolean("s2", false),
        ];
        let mut task = SequentialTask::new("t", sensors.iter().map(button_step), &clock).unwrap();

        for _ in 0..5 {
            task.update();
        }

        assert_eq!(sensors[0].reads_started(), 6);
        // Only the construction-time read
        assert_eq!(sensors[1].reads_started(), 1);
        assert_eq!(sensors[2].reads_started(), 1);
    }

    #[test]
    fn test_one_step_per_tick_in_order() {
        let clock = ManualClock::new();
        let sensors = [
            MockSensor::boolean("s0", true),
            MockSensor::boolean("s1", true),
            MockSensor::boolean("s2", true),
        ];
        let mut task = SequentialTask::new("t", sensors.iter().map(button_step), &clock).unwrap();

        for expected_done in 1..=3 {
            clock.advance_ms(20);
            assert!(task.update());
            assert_eq!(task.completed_steps(), expected_done);
        }

        assert!(task.done());
        assert_eq!(task.step_done_time(0), Some(20_000));
        assert_eq!(task.step_done_time(1), Some(40_000));
        assert_eq!(task.step_done_time(2), Some(60_000));
        assert_eq!(task.completion_time(), Some(60_000));
        assert!(!task.update());
    }

    #[test]
    fn test_clue_follows_frontier() {
        let clock = ManualClock::new();
        let button = MockSensor::boolean("button", false);
        let slider = MockSensor::numeric("slider", 0.0);
        let mut task = SequentialTask::new(
            "t",
            [
                button_step(&button),
                TaskStep::equal(&slider, SensorMeasurement::Numeric(75.0)).with_tolerance(5.0),
            ],
            &clock,
        )
        .unwrap();

        assert_eq!(
            task.get_clue(),
            Some(MeasurementClue {
                current: SensorMeasurement::Boolean(false),
                target: SensorMeasurement::Boolean(true),
            })
        );

        button.set_bool(true);
        task.update();

        assert_eq!(task.hinted_step(), Some(1));
        assert_eq!(task.get_clue_string().as_str(), "Waiting sensor slider");

        slider.set(SensorMeasurement::Numeric(72.0));
        task.update();
        assert!(task.done());
        assert_eq!(task.get_clue(), None);
    }

    #[test]
    fn test_restart_resets_frontier() {
        let clock = ManualClock::new();
        let sensors = [MockSensor::boolean("s0", true), MockSensor::boolean("s1", true)];
        let mut task = SequentialTask::new("t", sensors.iter().map(button_step), &clock).unwrap();

        task.update();
        task.update();
        assert!(task.done());

        task.restart();
        assert_eq!(task.frontier(), Some(0));
        assert_eq!(task.completed_steps(), 0);
        assert_eq!(task.step_done_time(1), None);
    }
}
