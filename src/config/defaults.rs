use super::Config;
use crate::catalog::TrackDescriptor;

/// Config written on first run: stock settings plus a sample catalog whose
/// sources are relative to `paths.media_root`.
pub fn defaults() -> Config {
    Config {
        tracks: vec![
            TrackDescriptor::new("Lose Yourself", "songs/loseyourself.mp3")
                .with_lyrics("lrc/loseyourself.lrc"),
            TrackDescriptor::new("Mockingbird", "songs/mockingbird.mp3")
                .with_lyrics("lrc/mockingbird.lrc"),
        ],
        ..Config::default()
    }
}
