//! Track catalog - fixed, ordered list of playable tracks

use serde::{Deserialize, Serialize};
use std::path::Path;

/// One entry of the catalog. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    pub title: String,
    /// Audio URI or path handed to the backend.
    #[serde(rename = "audio")]
    pub audio_source: String,
    /// Subtitle file URI or path, if the track has lyrics.
    #[serde(rename = "lyrics", default, skip_serializing_if = "Option::is_none")]
    pub lyric_source: Option<String>,
}

impl TrackDescriptor {
    pub fn new(title: impl Into<String>, audio_source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            audio_source: audio_source.into(),
            lyric_source: None,
        }
    }

    pub fn with_lyrics(mut self, lyric_source: impl Into<String>) -> Self {
        self.lyric_source = Some(lyric_source.into());
        self
    }

    /// Copy of this descriptor with both sources resolved against `media_root`.
    pub fn resolved(&self, media_root: Option<&Path>) -> Self {
        Self {
            title: self.title.clone(),
            audio_source: resolve_source(&self.audio_source, media_root),
            lyric_source: self
                .lyric_source
                .as_deref()
                .map(|s| resolve_source(s, media_root)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: Vec<TrackDescriptor>,
}

impl Catalog {
    pub fn new(tracks: Vec<TrackDescriptor>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    pub fn get(&self, index: usize) -> Option<&TrackDescriptor> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Join a relative path onto `media_root`. URIs with a scheme and absolute
/// paths pass through untouched.
pub fn resolve_source(source: &str, media_root: Option<&Path>) -> String {
    if source.contains("://") {
        return source.to_string();
    }
    let path = Path::new(source);
    match media_root {
        Some(root) if path.is_relative() => {
            let rel = source.strip_prefix("./").unwrap_or(source);
            root.join(rel).display().to_string()
        }
        _ => source.to_string(),
    }
}
