//! Task controller
//!
//! Runs one tick of the board's data flow: sensors -> step predicates ->
//! task aggregation -> clue selection -> screen. The caller owns the tick
//! loop and decides the tick rate.

use crate::task::{ClueAction, Task};
use crate::traits::ClueScreen;

/// Outcome of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// A step completed this tick
    pub changed: bool,
    /// Every step is complete
    pub done: bool,
    /// What happened to the clue
    pub clue: ClueAction,
}

/// Couples a task with the screen its clues are shown on
pub struct TaskController<T, S> {
    task: T,
    screen: S,
    /// "Task Done" already shown
    done_shown: bool,
}

impl<T: Task, S: ClueScreen> TaskController<T, S> {
    /// Create a controller
    pub fn new(task: T, screen: S) -> Self {
        Self {
            task,
            screen,
            done_shown: false,
        }
    }

    /// Run one tick
    ///
    /// Updates the task, then either evaluates the hinted step's clue or,
    /// on the tick the task completes, shows the done text once.
    pub fn tick(&mut self) -> TickReport {
        let changed = self.task.update();
        let done = self.task.done();

        let clue = if done {
            if self.done_shown {
                ClueAction::Skipped
            } else {
                self.done_shown = true;
                self.screen.show_text_clue(&self.task.get_clue_string());
                ClueAction::Show
            }
        } else {
            self.task.show_clue(&mut self.screen)
        };

        TickReport { changed, done, clue }
    }

    /// Restart the task and clear any clue on screen
    pub fn restart(&mut self) {
        self.task.restart();
        self.done_shown = false;
        self.screen.clear_all_task_clue();
    }

    /// The controlled task
    pub fn task(&self) -> &T {
        &self.task
    }

    /// The controlled task, mutably
    pub fn task_mut(&mut self) -> &mut T {
        &mut self.task
    }

    /// The clue screen
    pub fn screen(&self) -> &S {
        &self.screen
    }

    /// The clue screen, mutably
    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    /// Split into task and screen
    pub fn into_parts(self) -> (T, S) {
        (self.task, self.screen)
    }
}
