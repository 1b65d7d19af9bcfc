//! Track list widget - the catalog with the playing entry marked

use crate::app::state::AppState;
use crate::tui::theme::get_theme;
use crate::tui::View;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, state: &AppState, view: &View<'_>, area: Rect) {
    let theme = get_theme();
    let glyphs = &theme.glyphs;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.frame))
        .title(format!(" {} Tracks ", glyphs.tracks))
        .title_style(Style::default().fg(theme.palette.highlight));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if view.catalog.is_empty() {
        let empty = Paragraph::new(Line::from("No tracks configured"))
            .style(Style::default().fg(theme.palette.dim));
        frame.render_widget(empty, inner);
        return;
    }

    let playing_row = view.session.and(state.playing);
    let max_width = inner.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = view
        .catalog
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_selected = i == state.tracks.selected;
            let is_current = playing_row == Some(i);

            let style = if is_selected {
                Style::default()
                    .fg(theme.palette.highlight)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.text)
            };

            let marker = if is_current { glyphs.note } else { " " };
            let lyric_hint = if track.lyric_source.is_some() {
                format!(" {}", glyphs.lyrics)
            } else {
                String::new()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(theme.palette.active)),
                Span::styled(super::truncate_str(&track.title, max_width), style),
                Span::styled(lyric_hint, Style::default().fg(theme.palette.dim)),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    list_state.select(Some(state.tracks.selected));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.palette.on_highlight)
                .bg(theme.palette.highlight)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(glyphs.cursor);

    frame.render_stateful_widget(list, inner, &mut list_state);

    // Scroll position indicator
    let visible_height = inner.height as usize;
    if view.catalog.len() > visible_height {
        let pos_text = format!("{}/{}", state.tracks.selected + 1, view.catalog.len());
        let pos_len = pos_text.len() as u16;
        let pos_x = inner.x + inner.width.saturating_sub(pos_len);
        if pos_x > inner.x {
            frame.render_widget(
                Paragraph::new(pos_text).style(Style::default().fg(theme.palette.dim)),
                Rect::new(pos_x, inner.y, pos_len, 1),
            );
        }
    }
}
