//! Now Playing widget - compact player bar along the bottom

use crate::app::session::PlaybackState;
use crate::app::state::{AppState, ToastKind};
use crate::tui::theme::{get_theme, Glyphs};
use crate::tui::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, view: &View<'_>, area: Rect) {
    let theme = get_theme();
    let glyphs = &theme.glyphs;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.frame))
        .title(format!(" {} Player ", glyphs.note))
        .title_style(Style::default().fg(theme.palette.highlight));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),  // Left padding
            Constraint::Min(1),     // Content
            Constraint::Length(1),  // Right padding
        ])
        .split(inner)[1];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Time + controls + volume
            Constraint::Min(0),    // Toast / status
        ])
        .split(padded);

    let content_width = padded.width.saturating_sub(1) as usize;
    let playback = view.session.map_or(PlaybackState::Idle, |s| s.state);

    // Title
    let title = match view.session {
        Some(s) => s.track.title.as_str(),
        None => "Not playing",
    };
    let title_line = Line::from(Span::styled(
        super::truncate_str(title, content_width),
        Style::default()
            .fg(theme.palette.text)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(title_line), rows[0]);

    // Time + controls
    let pos = view.position_secs.max(0.0);
    let pos_min = (pos / 60.0).floor() as u32;
    let pos_sec = (pos % 60.0).floor() as u32;

    let (state_icon, state_label) = match playback {
        PlaybackState::Playing => (glyphs.play, "playing"),
        PlaybackState::Loading => (Glyphs::spinner(state.tick), "loading"),
        PlaybackState::Idle => (glyphs.stop, "stopped"),
    };

    let vol_icon = glyphs.volume(state.volume);

    let mut spans = vec![
        Span::styled(state_icon, Style::default().fg(theme.palette.active)),
        Span::raw(" "),
        Span::styled(
            format!("{:02}:{:02}", pos_min, pos_sec),
            Style::default().fg(theme.palette.dim),
        ),
        Span::raw(" "),
        Span::styled(state_label, Style::default().fg(theme.palette.dim)),
        Span::raw("  "),
        Span::styled(vol_icon, Style::default().fg(theme.palette.dim)),
        Span::raw(" "),
        Span::styled(
            format!("{}%", state.volume),
            Style::default().fg(theme.palette.dim),
        ),
    ];

    // Stop affordance only while something is playing
    if playback == PlaybackState::Playing {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[s] stop", Style::default().fg(theme.palette.hint)));
    }
    if let Some(s) = view.session {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            super::truncate_str(s.active_audio_source(), content_width / 3),
            Style::default().fg(theme.palette.frame),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);

    // Toast wins over the status line
    let bottom = if let Some(toast) = &state.toast
        && !toast.is_expired()
    {
        let (prefix, color) = match toast.kind {
            ToastKind::Success => (glyphs.ok, theme.palette.active),
            ToastKind::Error => (glyphs.fail, theme.palette.error),
        };
        Line::from(vec![
            Span::styled(format!("{} ", prefix), Style::default().fg(color)),
            Span::styled(
                super::truncate_str(&toast.message, content_width.saturating_sub(3)),
                Style::default().fg(color),
            ),
        ])
    } else {
        Line::from(Span::styled(
            super::truncate_str(&state.status, content_width),
            Style::default().fg(theme.palette.dim),
        ))
    };
    frame.render_widget(Paragraph::new(bottom), rows[2]);
}
