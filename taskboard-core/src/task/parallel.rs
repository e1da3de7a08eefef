//! Parallel composition
//!
//! Every step is independent: all incomplete steps are read and evaluated on
//! each tick and may complete in any order. The clue always refers to the
//! lowest-indexed incomplete step.

use super::clue::ClueAction;
use super::{ClueText, MeasurementClue, Task, TaskCore, TaskError, TaskStep};
use crate::time::Clock;
use crate::traits::ClueScreen;

/// Task whose steps can be achieved independently of each other
pub struct ParallelTask<'a> {
    core: TaskCore<'a>,
}

impl<'a> ParallelTask<'a> {
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
}

impl Task for ParallelTask<'_> {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn step_count(&self) -> usize {
        self.core.len()
    }

    fn update(&mut self) -> bool {
        let elapsed = self.core.elapsed_time();
        let mut changed = false;

        for step in 0..self.core.len() {
            changed |= self.core.poll_step(step, elapsed);
        }

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
        self.core.first_incomplete()
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
