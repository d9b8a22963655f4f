//! Node arena pane rendering

use crate::parser::ast::Node;
use crate::trace::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the node arena pane.
///
/// One row per allocated node, in allocation order, with child links shown
/// as arena indices. The root of the most recently completed subtree is
/// highlighted.
pub fn render_nodes_pane(
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
        .title(format!(
            " Nodes ({}/{}) ",
            snapshot.arena.len(),
            snapshot.arena.capacity()
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    if snapshot.arena.is_empty() {
        let paragraph = Paragraph::new("(no nodes yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));

    let all_items: Vec<ListItem> = snapshot
        .arena
        .nodes()
        .iter()
        .enumerate()
        .map(|(id, node)| {
            let mut spans = vec![Span::styled(
                format!("[{}] ", id),
                Style::default().fg(DEFAULT_THEME.comment),
            )];

            match node {
                Node::IntValue { value } => {
                    spans.push(Span::styled("IntValue ", Style::default().fg(DEFAULT_THEME.primary)));
                    spans.push(Span::styled(
                        value.to_string(),
                        Style::default().fg(DEFAULT_THEME.number),
                    ));
                }
                Node::BinaryOp { op, left, right } => {
                    spans.push(Span::styled("BinaryOp ", Style::default().fg(DEFAULT_THEME.primary)));
                    spans.push(Span::styled(
                        op.to_string(),
                        Style::default().fg(DEFAULT_THEME.operator),
                    ));
                    spans.push(Span::styled(
                        format!("  L=[{}] R=[{}]", left, right),
                        Style::default().fg(DEFAULT_THEME.success),
                    ));
                }
                Node::UnaryOp { op, operand } => {
                    spans.push(Span::styled("UnaryOp ", Style::default().fg(DEFAULT_THEME.primary)));
                    spans.push(Span::styled(
                        op.to_string(),
                        Style::default().fg(DEFAULT_THEME.operator),
                    ));
                    spans.push(Span::styled(
                        format!("  operand=[{}]", operand),
                        Style::default().fg(DEFAULT_THEME.success),
                    ));
                }
            }

            let mut item = ListItem::new(Line::from(spans));
            if snapshot.subtree == Some(id) {
                item = item.style(Style::default().bg(DEFAULT_THEME.highlight_bg));
            }
            item
        })
        .collect();

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
