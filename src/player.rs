use std::hash::Hash;
use std::ops::ControlFlow;
use std::time::Duration;

use crate::scanner::{StepOutcome, WindowScanner};

/// Fixed-delay auto-play driver.
///
/// Sleeps `delay` before each tick, steps the scanner once and hands it to the
/// tick callback. Playback ends when the scanner finishes, when `max_steps`
/// ticks have run, or when the callback returns [`ControlFlow::Break`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub delay: Duration,
    pub max_steps: Option<usize>,
}

impl Player {
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            max_steps: None,
        }
    }

    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Play `scanner` forward, returning how many steps were taken.
    pub fn play<T, F>(&self, scanner: &mut WindowScanner<T>, mut on_tick: F) -> usize
    where
        T: Eq + Hash + Clone,
        F: FnMut(&WindowScanner<T>) -> ControlFlow<()>,
    {
        let mut taken = 0;
        loop {
            if scanner.is_finished() || self.max_steps.is_some_and(|max| taken >= max) {
                break;
            }
            if !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            if scanner.step() == StepOutcome::NoOp {
                break;
            }
            taken += 1;
            if on_tick(scanner).is_break() {
                break;
            }
        }
        taken
    }
}
