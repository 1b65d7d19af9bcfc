//! Help overlay showing keybindings

use crate::tui::theme::{get_theme, Theme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, area: Rect) {
    let theme = get_theme();
    let glyphs = &theme.glyphs;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.highlight))
        .title(format!(" {} Keybinds ", glyphs.help))
        .title_style(Style::default().fg(theme.palette.highlight));

    let content = vec![
        section_header("Navigation", &theme),
        keybind("j / Down", "Move down", &theme),
        keybind("k / Up", "Move up", &theme),
        keybind("g / G", "First / last track", &theme),
        Line::default(),
        section_header("Playback", &theme),
        keybind("Enter", "Play selected track", &theme),
        keybind("s / x", "Stop", &theme),
        keybind("+ / -", "Volume up / down", &theme),
        Line::default(),
        keybind("?", "Close help", &theme),
        keybind("q", "Quit", &theme),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(content).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(theme.palette.highlight)
            .add_modifier(Modifier::BOLD),
    ))
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {:<10}", key),
            Style::default().fg(theme.palette.text),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.dim)),
    ])
}
