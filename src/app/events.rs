use crate::lyrics::ParsedLyrics;
use crate::player::Generation;

#[derive(Debug, Clone)]
pub enum Event {
    Input(InputEvent),
    Player(PlayerEvent),
    /// Fetch-and-parse finished (possibly empty after a failure).
    Lyrics {
        generation: Generation,
        lyrics: ParsedLyrics,
    },
    /// Frame tick for the lyric highlight of a playing session.
    Frame { generation: Generation },
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize,
}

/// Backend callback, tagged with the selection that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerEvent {
    pub generation: Generation,
    pub kind: PlayerEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEventKind {
    Ready,
    LoadError(String),
    Ended,
}
