/// True if no two elements of `window` are equal.
pub fn is_unique<T: Eq>(mut window: &[T]) -> bool {
    loop {
        window = match window {
            [] | [_] => break true,
            [head, tail @ ..] => {
                if tail.contains(head) {
                    break false;
                }
                tail
            }
        };
    }
}

/// Length of the longest run of `sequence` with no repeated element, by
/// checking every start position and extending until a repeat appears.
///
/// Quadratic; meant for cross-checking the scanner, not for large inputs.
pub fn longest_unique_len<T: Eq>(sequence: &[T]) -> usize {
    let mut best = 0;
    for start in 0..sequence.len() {
        let mut end = start + best + 1;
        while end <= sequence.len() && is_unique(&sequence[start..end]) {
            best = end - start;
            end += 1;
        }
    }
    best
}
