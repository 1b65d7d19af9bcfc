//! Subtitle cue parser
//!
//! One cue per line, marked by the first fixed-width timestamp on it:
//! [mm:ss.cc] Lyrics line here
//!
//! Example:
//! [00:12.34] Hello world
//! [00:15.00] Another line
//!
//! Tags before the stamp (`[ti:Song][00:01.00]x`) are skipped; text after
//! it is kept verbatim, later stamps included. Lines without a stamp are
//! dropped.

/// A single line of lyrics with timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    /// Timestamp in milliseconds from start
    pub time_ms: u64,
    /// The lyrics text, trimmed
    pub text: String,
}

impl LyricLine {
    pub fn new(time_ms: u64, text: impl Into<String>) -> Self {
        Self {
            time_ms,
            text: text.into(),
        }
    }

    pub fn timestamp_secs(&self) -> f64 {
        self.time_ms as f64 / 1000.0
    }
}

/// Parsed lyrics, sorted by timestamp
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedLyrics {
    pub lines: Vec<LyricLine>,
}

impl ParsedLyrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Parse subtitle text. Never fails; unmatched lines are dropped.
    pub fn parse(content: &str) -> Self {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines: Vec<LyricLine> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter_map(Self::parse_cue)
            .collect();

        // Stable, so cues sharing a timestamp keep file order.
        lines.sort_by_key(|l| l.time_ms);

        Self { lines }
    }

    /// Index of the cue to highlight at `position_secs`.
    pub fn active_index(&self, position_secs: f64) -> Option<usize> {
        super::timeline::active_index(&self.lines, position_secs)
    }

    /// Parse a cue like `[01:02.34]text`, starting at the first `[` that
    /// opens a valid stamp.
    fn parse_cue(line: &str) -> Option<LyricLine> {
        line.match_indices('[').find_map(|(i, _)| {
            let (stamp, text) = line[i + 1..].split_once(']')?;
            let time_ms = Self::parse_timestamp(stamp)?;
            Some(LyricLine::new(time_ms, text.trim()))
        })
    }

    /// Parse `mm:ss.cc` (each field exactly two digits) to milliseconds
    fn parse_timestamp(s: &str) -> Option<u64> {
        let (min, rest) = s.split_once(':')?;
        let (sec, centis) = rest.split_once('.')?;
        let min = two_digits(min)?;
        let sec = two_digits(sec)?;
        let centis = two_digits(centis)?;
        Some(min * 60_000 + sec * 1000 + centis * 10)
    }
}

fn two_digits(s: &str) -> Option<u64> {
    let b = s.as_bytes();
    if b.len() != 2 || !b.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(u64::from(b[0] - b'0') * 10 + u64::from(b[1] - b'0'))
}
