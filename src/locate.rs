//! Mapping of flat output slots back to the line that produced them.

/// Index of the first line whose cumulative segment count exceeds `slot`.
///
/// `line_lens` must be non-decreasing. Empty lines repeat the previous
/// count and are skipped. Returns `line_lens.len()` when `slot` is past the
/// last entry.
pub fn locate_line(line_lens: &[u32], slot: u32) -> usize {
    let mut lo = 0usize;
    let mut hi = line_lens.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if line_lens[mid] > slot {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Position of `slot` within line `line`.
pub fn local_index(line_lens: &[u32], line: usize, slot: u32) -> u32 {
    if line == 0 {
        slot
    } else {
        slot - line_lens[line - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_empty_lines() {
        let line_lens = [3, 3, 7, 10];
        for slot in 0..3 {
            assert_eq!(locate_line(&line_lens, slot), 0);
        }
        assert_eq!(locate_line(&line_lens, 3), 2);
        assert_eq!(locate_line(&line_lens, 6), 2);
        assert_eq!(locate_line(&line_lens, 7), 3);
        assert_eq!(locate_line(&line_lens, 9), 3);
        assert_eq!(locate_line(&line_lens, 10), 4);
    }

    #[test]
    fn local_index_restarts_per_line() {
        let line_lens = [3, 3, 7, 10];
        assert_eq!(local_index(&line_lens, 0, 2), 2);
        assert_eq!(local_index(&line_lens, 2, 3), 0);
        assert_eq!(local_index(&line_lens, 2, 6), 3);
        assert_eq!(local_index(&line_lens, 3, 7), 0);
    }

    #[test]
    fn leading_empty_lines() {
        let line_lens = [0, 0, 2];
        assert_eq!(locate_line(&line_lens, 0), 2);
        assert_eq!(locate_line(&line_lens, 1), 2);
        assert_eq!(local_index(&line_lens, 2, 1), 1);
    }

    #[test]
    fn matches_linear_scan() {
        let line_lens = [1, 4, 4, 4, 5, 9, 9, 12, 20];
        for slot in 0..20 {
            let expected = line_lens.iter().position(|&len| len > slot).unwrap();
            assert_eq!(locate_line(&line_lens, slot), expected, "slot {slot}");
        }
    }
}
