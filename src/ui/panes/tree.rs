//! Tree pane: indented dump of the current subtree

use crate::parser::render::render;
use crate::trace::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Render the tree pane showing the most recently completed subtree.
pub fn render_tree_pane(
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
        .title(" Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let Some(root) = snapshot.subtree else {
        let paragraph = Paragraph::new("(no subtree yet)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let dump = render(&snapshot.arena, root);
    let total_lines = dump.lines().count();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if total_lines > visible_height {
        let max_scroll = total_lines - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let paragraph = Paragraph::new(dump)
        .block(block.padding(Padding::new(1, 0, 0, 0)))
        .style(Style::default().fg(DEFAULT_THEME.fg))
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
