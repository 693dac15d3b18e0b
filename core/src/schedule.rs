use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Counts games started by a session. Work scheduled for one game carries its generation so it can be recognized as
/// stale once another game has started.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(u64);

impl Generation {
    pub const fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn advance(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Undo one more move of a running solve.
    SolveStep,
    /// Leave the win screen and move on to the next game.
    Advance,
}

/// A single-shot callback the host must run after `delay`, by handing it back to the session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTask {
    pub kind: TaskKind,
    pub generation: Generation,
    pub delay: Duration,
}

impl ScheduledTask {
    pub const fn new(kind: TaskKind, generation: Generation, delay: Duration) -> Self {
        Self {
            kind,
            generation,
            delay,
        }
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_goes_stale_when_generation_advances() {
        let mut generation = Generation::default();
        let task = ScheduledTask::new(TaskKind::SolveStep, generation, Duration::from_millis(750));

        assert!(task.is_current(generation));

        generation.advance();

        assert!(!task.is_current(generation));
        assert_eq!(generation.value(), 1);
    }
}
