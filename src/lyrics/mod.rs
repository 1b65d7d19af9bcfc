//! Lyrics module for loading and timing synchronized lyrics
//!
//! This module provides:
//! - Cue parser for `[mm:ss.cc]text` subtitle files
//! - Position to active-line lookup
//! - Fetching lyric sources from disk or http(s)

pub mod fetch;
pub mod parser;
pub mod timeline;

pub use fetch::{load_lyrics, LyricFetcher, SourceFetcher};
pub use parser::{LyricLine, ParsedLyrics};

/// Format a cue timestamp back to `mm:ss.cc`
pub fn format_timestamp(time_ms: u64) -> String {
    let min = time_ms / 60_000;
    let sec = (time_ms % 60_000) / 1000;
    let centis = (time_ms % 1000) / 10;
    format!("{:02}:{:02}.{:02}", min, sec, centis)
}
