//! Recoverable playback errors.
//!
//! Neither kind is fatal: a lyric failure degrades to "no lyrics", an audio
//! failure aborts only the pending selection.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("failed to fetch lyrics from {source_uri}: {reason}")]
    LyricFetch { source_uri: String, reason: String },

    #[error("failed to load audio {uri}: {reason}")]
    AudioLoad { uri: String, reason: String },
}

impl PlaybackError {
    pub fn lyric_fetch(source_uri: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::LyricFetch {
            source_uri: source_uri.into(),
            reason: reason.to_string(),
        }
    }

    pub fn audio_load(uri: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AudioLoad {
            uri: uri.into(),
            reason: reason.to_string(),
        }
    }
}
