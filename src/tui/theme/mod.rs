//! Monochrome look: grayscale colors, Nerd Font glyphs, rounded borders.
//! Glyphs need a Nerd Font (https://www.nerdfonts.com).

use ratatui::style::Color;
use ratatui::symbols::border;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub text: Color,
    pub dim: Color,
    /// Active lyric, titles, the selected row background.
    pub highlight: Color,
    /// Text drawn on top of `highlight`.
    pub on_highlight: Color,
    pub hint: Color,
    pub frame: Color,
    pub active: Color,
    pub error: Color,
}

#[derive(Debug, Clone)]
pub struct Glyphs {
    pub play: &'static str,
    pub stop: &'static str,
    pub ok: &'static str,
    pub fail: &'static str,
    pub help: &'static str,
    pub note: &'static str,
    pub tracks: &'static str,
    pub lyrics: &'static str,
    pub cursor: &'static str,
    volume: [&'static str; 3],
}

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

impl Glyphs {
    /// Muted, low (< 50) or high.
    pub fn volume(&self, level: u8) -> &'static str {
        match level {
            0 => self.volume[0],
            1..50 => self.volume[1],
            _ => self.volume[2],
        }
    }

    /// Loading spinner; advances every 4 ticks.
    pub fn spinner(tick: u64) -> &'static str {
        SPINNER[(tick / 4) as usize % SPINNER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    pub glyphs: Glyphs,
}

impl Theme {
    pub const fn mono() -> Self {
        Self {
            palette: Palette {
                text: Color::Rgb(255, 255, 255),
                dim: Color::Rgb(136, 136, 136),
                highlight: Color::Rgb(255, 255, 255),
                on_highlight: Color::Rgb(0, 0, 0),
                hint: Color::Rgb(200, 200, 200),
                frame: Color::Rgb(64, 64, 64),
                active: Color::Rgb(255, 255, 255),
                error: Color::Rgb(214, 92, 92),
            },
            glyphs: Glyphs {
                play: "\u{f04b}",
                stop: "\u{f04d}",
                ok: "\u{f00c}",
                fail: "\u{f00d}",
                help: "\u{f059}",
                note: "\u{f001}",
                tracks: "\u{f0cb}",
                lyrics: "\u{f15c}",
                cursor: "\u{f054} ",
                volume: ["\u{f026}", "\u{f027}", "\u{f028}"],
            },
        }
    }

    pub fn border_set(&self) -> border::Set<'static> {
        border::ROUNDED
    }
}

pub fn get_theme() -> Theme {
    Theme::mono()
}
