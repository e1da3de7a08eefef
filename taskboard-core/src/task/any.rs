//! Tagged task variant

use super::clue::ClueAction;
use super::{
    ClueText, Composition, MeasurementClue, ParallelTask, SequentialTask, Task, TaskError,
    TaskStep,
};
use crate::time::Clock;
use crate::traits::ClueScreen;

/// A task of either composition, chosen at runtime
pub enum AnyTask<'a> {
    Parallel(ParallelTask<'a>),
    Sequential(SequentialTask<'a>),
}

impl<'a> AnyTask<'a> {
    /// Create a task with the given composition
    pub fn new<I>(
        composition: Composition,
        name: &str,
        steps: I,
        clock: &'a dyn Clock,
    ) -> Result<Self, TaskError>
    where
        I: IntoIterator<Item = TaskStep<'a>>,
    {
        Ok(match composition {
            Composition::Parallel => AnyTask::Parallel(ParallelTask::new(name, steps, clock)?),
            Composition::Sequential => {
                AnyTask::Sequential(SequentialTask::new(name, steps, clock)?)
            }
        })
    }

    /// Composition of this task
    pub fn composition(&self) -> Composition {
        match self {
            AnyTask::Parallel(_) => Composition::Parallel,
            AnyTask::Sequential(_) => Composition::Sequential,
        }
    }

    /// Steps in index order
    pub fn steps(&self) -> &[TaskStep<'a>] {
        match self {
            AnyTask::Parallel(task) => task.steps(),
            AnyTask::Sequential(task) => task.steps(),
        }
    }

    fn inner(&self) -> &dyn Task {
        match self {
            AnyTask::Parallel(task) => task,
            AnyTask::Sequential(task) => task,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Task {
        match self {
            AnyTask::Parallel(task) => task,
            AnyTask::Sequential(task) => task,
        }
    }
}

impl<'a> From<ParallelTask<'a>> for AnyTask<'a> {
    fn from(task: ParallelTask<'a>) -> Self {
        AnyTask::Parallel(task)
    }
}

impl<'a> From<SequentialTask<'a>> for AnyTask<'a> {
    fn from(task: SequentialTask<'a>) -> Self {
        AnyTask::Sequential(task)
    }
}

impl Task for AnyTask<'_> {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn step_count(&self) -> usize {
        self.inner().step_count()
    }

    fn update(&mut self) -> bool {
        self.inner_mut().update()
    }

    fn done(&self) -> bool {
        self.inner().done()
    }

    fn step_done(&self, step: usize) -> bool {
        self.inner().step_done(step)
    }

    fn step_done_time(&self, step: usize) -> Option<u64> {
        self.inner().step_done_time(step)
    }

    fn elapsed_time(&self) -> u64 {
        self.inner().elapsed_time()
    }

    fn hinted_step(&self) -> Option<usize> {
        self.inner().hinted_step()
    }

    fn get_clue(&self) -> Option<MeasurementClue> {
        self.inner().get_clue()
    }

    fn get_clue_string(&self) -> ClueText {
        self.inner().get_clue_string()
    }

    fn show_clue(&mut self, screen: &mut dyn ClueScreen) -> ClueAction {
        self.inner_mut().show_clue(screen)
    }

    fn restart(&mut self) {
        self.inner_mut().restart()
    }
}
