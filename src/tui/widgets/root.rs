//! Root layout widget - orchestrates main layout structure

use crate::app::state::AppState;
use crate::tui::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::{help, lyrics, now_playing, track_list};

/// Main layout structure:
/// ┌──────────────┬──────────────────────────────┐
/// │  Tracks      │           Lyrics             │
/// │              │                              │
/// │  Track A     │     previous line            │
/// │  Track B     │   ♪ current line             │
/// │              │     next line                │
/// ├──────────────┴──────────────────────────────┤
/// │ Player                                      │
/// └─────────────────────────────────────────────┘
pub fn render(frame: &mut Frame, state: &AppState, view: &View<'_>) {
    let root = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // Tracks + lyrics
            Constraint::Length(5), // Player bar
        ])
        .split(root);

    let top_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35), // Track list
            Constraint::Percentage(65), // Lyrics
        ])
        .split(rows[0]);

    track_list::render(frame, state, view, top_cols[0]);
    lyrics::render(frame, view, top_cols[1]);
    now_playing::render(frame, state, view, rows[1]);

    if state.show_help {
        help::render(frame, centered(rows[0], 60, 14));
    }
}

/// Rect of at most `width` x `height` centred in `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fits_inside() {
        let r = centered(Rect::new(0, 0, 100, 40), 60, 14);
        assert_eq!(r, Rect::new(20, 13, 60, 14));
        let r = centered(Rect::new(5, 5, 30, 10), 60, 14);
        assert_eq!(r, Rect::new(5, 5, 30, 10));
    }
}
