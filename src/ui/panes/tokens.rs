//! Token table pane rendering

use crate::trace::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the token table pane.
///
/// One row per scanned token; the row under the parser's read cursor is
/// marked and highlighted.
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Tokens ({}) ", snapshot.tokens.len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    if snapshot.tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));

    let all_items: Vec<ListItem> = snapshot
        .tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            let is_current = i == snapshot.cursor;
            let marker = if is_current { "→ " } else { "  " };

            let mut spans = vec![
                Span::styled(
                    marker,
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("[{}] ", i), Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(format!("{:?}", token.kind), Style::default().fg(DEFAULT_THEME.primary)),
            ];
            if !token.text.is_empty() {
                spans.push(Span::styled(
                    format!(" \"{}\"", token.text),
                    Style::default().fg(DEFAULT_THEME.number),
                ));
            }

            let mut item = ListItem::new(Line::from(spans));
            if is_current {
                item = item.style(Style::default().bg(DEFAULT_THEME.highlight_bg));
            }
            item
        })
        .collect();

    // Clamp scroll so the cursor row stays reachable.
    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
