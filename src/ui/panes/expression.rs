//! Expression pane: the input string with a position marker

use crate::trace::{Phase, Snapshot};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Render the expression pane.
///
/// The marker line under the input tracks the scanner's consumed-up-to
/// position during the scan phase and the column of the token under the
/// parser's cursor during the parse phase.
pub fn render_expression_pane(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    snapshot: &Snapshot,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Expression ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 0, 0, 0));

    let expr_spans: Vec<Span> = input
        .chars()
        .map(|ch| {
            let style = if ch.is_ascii_digit() {
                Style::default().fg(DEFAULT_THEME.number)
            } else if ch == '+' || ch == '-' {
                Style::default().fg(DEFAULT_THEME.operator)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            Span::styled(ch.to_string(), style)
        })
        .collect();

    // 0-based column the marker points at.
    let marker_column = match snapshot.phase {
        Phase::Scan => snapshot.scan_position,
        Phase::Parse => snapshot
            .tokens
            .get(snapshot.cursor)
            .map(|t| t.column.saturating_sub(1))
            .unwrap_or(0),
    };

    let marker_line = Line::from(vec![
        Span::raw(" ".repeat(marker_column)),
        Span::styled(
            "^",
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let phase_line = Line::from(Span::styled(
        format!("phase: {}", snapshot.phase),
        Style::default().fg(DEFAULT_THEME.comment),
    ));

    let paragraph = Paragraph::new(vec![Line::from(expr_spans), marker_line, phase_line]).block(block);
    frame.render_widget(paragraph, area);
}
