use serde::Serialize;

use crate::scanner::{Snapshot, StepOutcome, WindowScanner};

/// Every state a scan passes through, from the initial cursors to the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trace {
    pub input: String,
    pub frames: Vec<Snapshot<char>>,
    pub best_length: usize,
    pub best_window: String,
}

/// Final result of a scan, without the per-step frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub input: String,
    pub best_length: usize,
    pub best_window: String,
    pub steps: usize,
}

pub fn summarize(text: &str) -> Summary {
    let mut scanner = WindowScanner::from_text(text);
    scanner.run_to_completion();
    Summary {
        input: text.to_string(),
        best_length: scanner.best_length(),
        best_window: scanner.best_window().iter().collect(),
        steps: scanner.step_count(),
    }
}

/// Drive a fresh scanner over `text` to completion, recording a frame before
/// the first step and after each successful one.
pub fn record(text: &str) -> Trace {
    let mut scanner = WindowScanner::from_text(text);
    let mut frames = vec![scanner.snapshot()];
    while scanner.step() == StepOutcome::Advanced {
        frames.push(scanner.snapshot());
    }

    Trace {
        input: text.to_string(),
        frames,
        best_length: scanner.best_length(),
        best_window: scanner.best_window().iter().collect(),
    }
}
