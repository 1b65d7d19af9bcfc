//! Playback position to active cue lookup

use super::parser::LyricLine;

/// Largest index whose timestamp is at or before `position_secs`.
///
/// Returns `None` when there are no lines, the position is NaN, or playback
/// hasn't reached the first cue yet. Past the last cue the last index stays
/// active. `lines` must be sorted by timestamp (the parser guarantees it).
pub fn active_index(lines: &[LyricLine], position_secs: f64) -> Option<usize> {
    if lines.is_empty() || position_secs.is_nan() {
        return None;
    }
    let reached = lines.partition_point(|l| l.timestamp_secs() <= position_secs);
    reached.checked_sub(1)
}

/// Window of `len` line indices centred on `active`, clamped to `total`.
pub fn visible_window(active: Option<usize>, total: usize, len: usize) -> std::ops::Range<usize> {
    if total <= len {
        return 0..total;
    }
    let centre = active.unwrap_or(0);
    let start = centre.saturating_sub(len / 2).min(total - len);
    start..start + len
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::ParsedLyrics;

    fn example() -> ParsedLyrics {
        ParsedLyrics::parse("[00:01.50]Hello\n[00:03.00]World\n")
    }

    #[test]
    fn test_example_positions() {
        let lyrics = example();
        assert_eq!(lyrics.active_index(2.0), Some(0));
        assert_eq!(lyrics.active_index(3.5), Some(1));
        assert_eq!(lyrics.active_index(0.5), None);
    }

    #[test]
    fn test_boundaries() {
        let lyrics = example();
        assert_eq!(lyrics.active_index(1.5), Some(0));
        assert_eq!(lyrics.active_index(1.49), None);
        assert_eq!(lyrics.active_index(3.0), Some(1));
        assert_eq!(lyrics.active_index(10_000.0), Some(1));
        assert_eq!(lyrics.active_index(f64::NAN), None);
    }

    #[test]
    fn test_empty_lines() {
        assert_eq!(active_index(&[], 5.0), None);
    }

    #[test]
    fn test_matches_linear_scan() {
        let lyrics = ParsedLyrics::parse(
            "[00:00.00]a\n[00:01.25]b\n[00:01.25]c\n[00:04.10]d\n[00:04.11]e\n[01:00.00]f",
        );
        // "first line past position, minus one; last if none past"
        let linear = |p: f64| -> Option<usize> {
            match lyrics.lines.iter().position(|l| l.timestamp_secs() > p) {
                Some(i) => i.checked_sub(1),
                None => Some(lyrics.lines.len() - 1),
            }
        };
        let mut p = -1.0;
        while p < 70.0 {
            assert_eq!(lyrics.active_index(p), linear(p), "position {p}");
            p += 0.05;
        }
    }

    #[test]
    fn test_visible_window() {
        assert_eq!(visible_window(None, 3, 5), 0..3);
        assert_eq!(visible_window(None, 10, 5), 0..5);
        assert_eq!(visible_window(Some(5), 10, 5), 3..8);
        assert_eq!(visible_window(Some(9), 10, 5), 5..10);
        assert_eq!(visible_window(Some(1), 10, 4), 0..4);
    }
}
