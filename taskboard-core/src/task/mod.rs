//! Task execution core
//!
//! A task owns an ordered list of steps and decides how their completion
//! composes into task completion:
//!
//! - [`ParallelTask`]: every step is independent and evaluated each tick
//! - [`SequentialTask`]: step *i+1* is only evaluated once step *i* is done
//!
//! Both keep their bookkeeping in a shared [`TaskCore`]. [`AnyTask`] is the
//! tagged variant used when the composition comes from configuration.

pub mod any;
pub mod clue;
pub mod parallel;
pub mod sequential;
pub mod step;

pub use any::AnyTask;
pub use clue::{ClueAction, ClueState, ClueTrigger};
pub use parallel::ParallelTask;
pub use sequential::SequentialTask;
pub use step::{RandomTarget, StepKind, TaskStep};

use heapless::{String, Vec};

use crate::measurement::SensorMeasurement;
use crate::time::{Clock, Instant};
use crate::traits::ClueScreen;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum steps per task
pub const MAX_STEPS: usize = 16;

/// Maximum stored task name length
pub const MAX_TASK_NAME_LEN: usize = 24;

/// Maximum clue text length
pub const CLUE_TEXT_LEN: usize = 48;

/// Clue text shown once every step is complete
pub const TASK_DONE_TEXT: &str = "Task Done";

/// Prefix of the clue text naming the awaited sensor
pub const WAITING_PREFIX: &str = "Waiting sensor ";

/// Human-readable task status
pub type ClueText = String<CLUE_TEXT_LEN>;

/// Errors building a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TaskError {
    /// More than [`MAX_STEPS`] steps
    TooManySteps,
    /// Random target range is empty or malformed
    InvalidTarget,
}

/// How step completion composes into task completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Composition {
    /// Steps complete independently, in any order
    #[default]
    Parallel,
    /// Steps complete strictly in index order
    Sequential,
}

/// Current vs. target measurement of the hinted step
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MeasurementClue {
    pub current: SensorMeasurement,
    pub target: SensorMeasurement,
}

/// Operations every composition variant provides
///
/// Driven by a caller-owned tick loop: [`update`](Task::update) once per
/// tick, then the queries.
pub trait Task {
    /// Task name
    fn name(&self) -> &str;

    /// Number of steps (fixed at construction)
    fn step_count(&self) -> usize;

    /// Poll the relevant steps and record completions
    ///
    /// Returns true if any step completed this tick.
    fn update(&mut self) -> bool;

    /// True once every step is complete
    fn done(&self) -> bool;

    /// Whether step `step` is complete
    ///
    /// # Panics
    /// If `step` is out of range.
    fn step_done(&self, step: usize) -> bool;

    /// Microseconds from task start to the completion of step `step`
    ///
    /// `None` while the step is incomplete.
    ///
    /// # Panics
    /// If `step` is out of range.
    fn step_done_time(&self, step: usize) -> Option<u64>;

    /// Microseconds since the task was started or last restarted
    fn elapsed_time(&self) -> u64;

    /// Step the clue refers to, `None` once the task is done
    fn hinted_step(&self) -> Option<usize>;

    /// Current and target measurement of the hinted step
    fn get_clue(&self) -> Option<MeasurementClue>;

    /// Status text for the screen
    fn get_clue_string(&self) -> ClueText;

    /// Evaluate the hinted step's clue trigger and render accordingly
    fn show_clue(&mut self, screen: &mut dyn ClueScreen) -> ClueAction;

    /// Reset every step to incomplete and restart the elapsed time
    fn restart(&mut self);

    /// Number of completed steps
    fn completed_steps(&self) -> usize {
        (0..self.step_count()).filter(|&i| self.step_done(i)).count()
    }

    /// Time at which the last step completed, once the task is done
    fn completion_time(&self) -> Option<u64> {
        if !self.done() {
            return None;
        }

        (0..self.step_count())
            .filter_map(|i| self.step_done_time(i))
            .max()
            .or(Some(0))
    }
}

/// Bookkeeping shared by every composition variant
///
/// A step's completion flag and completion time are one `Option<u64>`, so
/// a step can never be flagged done without a timestamp or vice versa.
pub struct TaskCore<'a> {
    name: String<MAX_TASK_NAME_LEN>,
    steps: Vec<TaskStep<'a>, MAX_STEPS>,
    /// Completion time per step (µs since start)
    finish_times: Vec<Option<u64>, MAX_STEPS>,
    started_at: Instant,
    clock: &'a dyn Clock,
}

impl<'a> TaskCore<'a> {
    /// Create the bookkeeping for `steps`, starting the elapsed time now
    pub fn new<I>(name: &str, steps: I, clock: &'a dyn Clock) -> Result<Self, TaskError>
    where
        I: IntoIterator<Item = TaskStep<'a>>,
    {
        let mut owned: Vec<TaskStep<'a>, MAX_STEPS> = Vec::new();
        for step in steps {
            owned.push(step).map_err(|_| TaskError::TooManySteps)?;
        }

        let mut finish_times = Vec::new();
        // Cannot fail: same capacity as `owned`
        let _ = finish_times.resize(owned.len(), None);

        let mut stored_name = String::new();
        push_truncated(&mut stored_name, name);

        Ok(Self {
            name: stored_name,
            steps: owned,
            finish_times,
            started_at: clock.now(),
            clock,
        })
    }

    /// Task name
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// All steps, in order
    pub fn steps(&self) -> &[TaskStep<'a>] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the task has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Current time on the task clock
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Microseconds since start or last restart
    pub fn elapsed_time(&self) -> u64 {
        self.clock.now().micros_since(self.started_at)
    }

    /// Whether step `step` is complete
    pub fn step_done(&self, step: usize) -> bool {
        self.finish_times[step].is_some()
    }

    /// Completion time of step `step`
    pub fn step_done_time(&self, step: usize) -> Option<u64> {
        self.finish_times[step]
    }

    /// Lowest-indexed incomplete step
    pub fn first_incomplete(&self) -> Option<usize> {
        self.finish_times.iter().position(Option::is_none)
    }

    /// Whether every step is complete
    pub fn all_done(&self) -> bool {
        self.finish_times.iter().all(Option::is_some)
    }

    /// Request a fresh reading for `step` and record its completion
    ///
    /// `elapsed` is sampled once per tick by the caller so that steps
    /// completing in the same tick share a timestamp. A step that is
    /// already complete keeps its first timestamp.
    pub fn poll_step(&mut self, step: usize, elapsed: u64) -> bool {
        if self.finish_times[step].is_some() {
            return false;
        }

        let task_step = &self.steps[step];
        task_step.sensor().start_read();

        if !task_step.success() {
            return false;
        }

        self.finish_times[step] = Some(elapsed);
        debug!(
            "Task {}: step {} ({}) done at {} us",
            self.name.as_str(),
            step,
            task_step.sensor().name(),
            elapsed
        );
        true
    }

    /// Current/target pair for `step`
    pub fn clue_for(&self, step: usize) -> MeasurementClue {
        let task_step = &self.steps[step];
        MeasurementClue {
            current: task_step.sensor().read(),
            target: task_step.expected_value(),
        }
    }

    /// Status text naming the sensor of `hinted`, or "Task Done"
    pub fn clue_string(&self, hinted: Option<usize>) -> ClueText {
        let mut text = ClueText::new();

        match hinted {
            Some(step) => {
                push_truncated(&mut text, WAITING_PREFIX);
                push_truncated(&mut text, self.steps[step].sensor().name());
            }
            None => push_truncated(&mut text, TASK_DONE_TEXT),
        }

        text
    }

    /// Evaluate the clue trigger of `step`
    pub fn show_step_clue(&mut self, step: usize, screen: &mut dyn ClueScreen) -> ClueAction {
        let now = self.clock.now();
        self.steps[step].show_clue(now, screen)
    }

    /// Mark every step incomplete and restart the elapsed time
    ///
    /// Steps are kept as they are; only their clue triggers are reset.
    pub fn restart(&mut self) {
        for finish in self.finish_times.iter_mut() {
            *finish = None;
        }
        for step in self.steps.iter_mut() {
            step.reset_clue();
        }
        self.started_at = self.clock.now();

        info!("Task {} restarted", self.name.as_str());
    }
}

/// Append as much of `text` as fits
pub(crate) fn push_truncated<const N: usize>(out: &mut String<N>, text: &str) {
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
}
