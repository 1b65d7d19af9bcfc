//! Lyrics pane - every cue, with the active one highlighted and kept centred

use crate::lyrics::timeline::visible_window;
use crate::tui::theme::get_theme;
use crate::tui::View;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, view: &View<'_>, area: Rect) {
    let theme = get_theme();
    let glyphs = &theme.glyphs;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.frame))
        .title(format!(" {} Lyrics ", glyphs.lyrics))
        .title_style(Style::default().fg(theme.palette.highlight));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner)[1];

    let Some(session) = view.session else {
        return;
    };

    if session.lyric_lines.is_empty() {
        // Tracks without a lyric source get a blank pane.
        let hint = if session.lyrics_pending {
            "Loading..."
        } else if session.track.lyric_source.is_some() {
            "No lyrics available"
        } else {
            return;
        };
        let centre = padded.y + padded.height / 2;
        let row = Rect::new(padded.x, centre, padded.width, 1.min(padded.height));
        let paragraph = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(theme.palette.dim),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, row);
        return;
    }

    let height = padded.height as usize;
    let total = session.lyric_lines.len();
    let active = session.active_lyric_index;
    let window = visible_window(active, total, height);
    let max_width = padded.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::with_capacity(height);

    // Near the start the window can't scroll, so pad instead to keep the
    // active cue on the middle row.
    if window.start == 0 {
        let lead = (height / 2).saturating_sub(active.unwrap_or(0));
        lines.extend(std::iter::repeat_n(Line::default(), lead));
    }

    for i in window {
        let text = session.lyric_lines[i].text.as_str();
        let is_current = active == Some(i);
        let style = if is_current {
            Style::default()
                .fg(theme.palette.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.palette.dim)
        };
        let prefix = if is_current { "♪ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(super::truncate_str(text, max_width), style),
        ]));
    }

    lines.truncate(height);
    frame.render_widget(Paragraph::new(lines), padded);
}
