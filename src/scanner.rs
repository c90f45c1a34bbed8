use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

/// Result of a single [`WindowScanner::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One symbol was consumed and `right` moved forward.
    Advanced,
    /// The sequence is exhausted; nothing changed.
    NoOp,
}

/// A symbol that was already inside the window when the scan reached it again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateEvent<T> {
    pub symbol: T,
    /// Index where `symbol` was last seen before this step.
    pub previous_index: usize,
    pub triggered: bool,
}

/// Render-facing copy of the scanner state after a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot<T> {
    pub left: usize,
    pub right: usize,
    pub best_length: usize,
    pub step_count: usize,
    pub finished: bool,
    pub duplicate: Option<DuplicateEvent<T>>,
}

/// Two-pointer scan for the longest run of symbols with no repeats.
///
/// The window is the half-open range `[left, right)` and never holds two equal
/// symbols. Each [`step`](Self::step) consumes `sequence[right]`, moving `left`
/// past the previous occurrence of that symbol when it is still inside the window.
///
/// ```
/// use lsw::scanner::WindowScanner;
///
/// let mut scanner = WindowScanner::from_text("pwwkew");
/// assert_eq!(scanner.run_to_completion(), 3);
/// assert_eq!(scanner.best_window(), &['w', 'k', 'e']);
/// ```
#[derive(Debug, Clone)]
pub struct WindowScanner<T> {
    sequence: Vec<T>,
    left: usize,
    right: usize,
    best_length: usize,
    best_start: usize,
    last_seen: HashMap<T, usize>,
    step_count: usize,
    finished: bool,
    last_duplicate: Option<DuplicateEvent<T>>,
}

impl WindowScanner<char> {
    /// Scan the characters of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars().collect())
    }
}

impl<T: Eq + Hash + Clone> WindowScanner<T> {
    pub fn new(sequence: Vec<T>) -> Self {
        let finished = sequence.is_empty();
        Self {
            sequence,
            left: 0,
            right: 0,
            best_length: 0,
            best_start: 0,
            last_seen: HashMap::new(),
            step_count: 0,
            finished,
            last_duplicate: None,
        }
    }

    /// Consume one symbol. Returns [`StepOutcome::NoOp`] once the sequence is
    /// exhausted; after that only [`reset`](Self::reset) changes the state.
    pub fn step(&mut self) -> StepOutcome {
        if self.right >= self.sequence.len() {
            self.finished = true;
            return StepOutcome::NoOp;
        }

        let symbol = &self.sequence[self.right];
        self.last_duplicate = match self.last_seen.get(symbol) {
            Some(&seen) if seen >= self.left => {
                self.left = seen + 1;
                Some(DuplicateEvent {
                    symbol: symbol.clone(),
                    previous_index: seen,
                    triggered: true,
                })
            }
            _ => None,
        };
        self.last_seen.insert(symbol.clone(), self.right);

        let width = self.right - self.left + 1;
        if width > self.best_length {
            self.best_length = width;
            self.best_start = self.left;
        }

        self.step_count += 1;
        self.right += 1;
        if self.right >= self.sequence.len() {
            self.finished = true;
        }
        StepOutcome::Advanced
    }

    /// Step until the sequence is exhausted and return the best window length.
    pub fn run_to_completion(&mut self) -> usize {
        while self.step() == StepOutcome::Advanced {}
        self.best_length
    }

    /// Start over on `sequence`, discarding every cursor, counter and seen index.
    pub fn reset(&mut self, sequence: Vec<T>) {
        *self = Self::new(sequence);
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        Snapshot {
            left: self.left,
            right: self.right,
            best_length: self.best_length,
            step_count: self.step_count,
            finished: self.finished,
            duplicate: self.last_duplicate.clone(),
        }
    }

    pub fn sequence(&self) -> &[T] {
        &self.sequence
    }

    pub const fn left(&self) -> usize {
        self.left
    }

    pub const fn right(&self) -> usize {
        self.right
    }

    pub const fn best_length(&self) -> usize {
        self.best_length
    }

    pub const fn step_count(&self) -> usize {
        self.step_count
    }

    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    pub const fn last_duplicate(&self) -> Option<&DuplicateEvent<T>> {
        self.last_duplicate.as_ref()
    }

    /// Symbols currently inside `[left, right)`.
    pub fn window(&self) -> &[T] {
        &self.sequence[self.left..self.right]
    }

    /// The first window that reached [`best_length`](Self::best_length).
    pub fn best_window(&self) -> &[T] {
        &self.sequence[self.best_start..self.best_start + self.best_length]
    }

    /// Last index at which each symbol was seen, ordered by index.
    pub fn seen_indices(&self) -> Vec<(&T, usize)> {
        let mut seen: Vec<(&T, usize)> =
            self.last_seen.iter().map(|(s, &i)| (s, i)).collect();
        seen.sort_by_key(|&(_, i)| i);
        seen
    }
}
