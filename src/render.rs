use std::fmt::Display;
use std::hash::Hash;

use crate::scanner::WindowScanner;

/// The sequence with the current window wrapped in brackets, e.g. `ab[ca]bcbb`.
///
/// An empty window renders as `[]` at the `left` cursor.
pub fn window_line<T>(scanner: &WindowScanner<T>) -> String
where
    T: Eq + Hash + Clone + Display,
{
    let sequence = scanner.sequence();
    let mut out = String::with_capacity(sequence.len() + 2);
    for idx in 0..=sequence.len() {
        if idx == scanner.left() {
            out.push('[');
        }
        if idx == scanner.right() {
            out.push(']');
        }
        if let Some(symbol) = sequence.get(idx) {
            out.push_str(&symbol.to_string());
        }
    }
    out
}

/// One status line per frame: step number, window, cursors, best length and
/// any duplicate that moved `left`.
pub fn frame_line<T>(scanner: &WindowScanner<T>) -> String
where
    T: Eq + Hash + Clone + Display,
{
    let mut line = format!(
        "step {:>3}  {}  left={} right={} best={}",
        scanner.step_count(),
        window_line(scanner),
        scanner.left(),
        scanner.right(),
        scanner.best_length(),
    );
    if let Some(dup) = scanner.last_duplicate() {
        line.push_str(&format!(
            "  dup '{}' (seen at {})",
            dup.symbol, dup.previous_index
        ));
    }
    if scanner.is_finished() {
        line.push_str("  done");
    }
    line
}

/// The last-seen map as `a:3 b:1 ...`, ordered by index.
pub fn seen_map<T>(scanner: &WindowScanner<T>) -> String
where
    T: Eq + Hash + Clone + Display,
{
    scanner
        .seen_indices()
        .iter()
        .map(|(symbol, idx)| format!("{symbol}:{idx}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn scanner_after(text: &str, steps: usize) -> WindowScanner<char> {
        let mut scanner = WindowScanner::from_text(text);
        for _ in 0..steps {
            scanner.step();
        }
        scanner
    }

    #[test]
    fn window_line_initial_is_empty_brackets() {
        assert_eq!(window_line(&scanner_after("abc", 0)), "[]abc");
    }

    #[test]
    fn window_line_mid_scan() {
        assert_eq!(window_line(&scanner_after("abcabcbb", 4)), "a[bca]bcbb");
    }

    #[test]
    fn window_line_at_end() {
        assert_eq!(window_line(&scanner_after("abc", 3)), "[abc]");
    }

    #[test]
    fn window_line_empty_sequence() {
        assert_eq!(window_line(&scanner_after("", 0)), "[]");
    }

    #[test]
    fn frame_line_reports_duplicate_and_done() {
        let line = frame_line(&scanner_after("aa", 2));
        assert_eq!(
            line,
            "step   2  a[a]  left=1 right=2 best=1  dup 'a' (seen at 0)  done"
        );
    }

    #[test]
    fn frame_line_without_duplicate() {
        let line = frame_line(&scanner_after("ab", 1));
        assert_eq!(line, "step   1  [a]b  left=0 right=1 best=1");
    }

    #[test]
    fn seen_map_ordered_by_index() {
        assert_eq!(seen_map(&scanner_after("bab", 3)), "a:1 b:2");
    }

    #[test]
    fn seen_map_empty_before_first_step() {
        assert_eq!(seen_map(&scanner_after("ab", 0)), "");
    }
}
