//! Allocation pane: request outcome, fill mode and fill progress

use crate::ui::board::{FillMode, Outcome, StatusBoard};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the allocation pane, borders included
pub const ALLOCATION_HEIGHT: u16 = 5;

pub fn render_allocation_pane(frame: &mut Frame, area: Rect, board: &StatusBoard) {
    let outcome_style = match board.outcome() {
        Outcome::Pending => Style::default().fg(DEFAULT_THEME.fg),
        Outcome::Succeeded => Style::default().fg(DEFAULT_THEME.success),
        Outcome::Failed => Style::default()
            .fg(DEFAULT_THEME.error)
            .add_modifier(Modifier::BOLD),
    };
    let fill_style = match board.fill() {
        FillMode::Zeroing { overrun, .. } if overrun > 0 => {
            Style::default().fg(DEFAULT_THEME.warning)
        }
        FillMode::Zeroing { .. } => Style::default().fg(DEFAULT_THEME.primary),
        FillMode::NotZeroed | FillMode::Idle => Style::default().fg(DEFAULT_THEME.comment),
    };

    let lines = vec![
        Line::styled(board.request_line().unwrap_or_default(), outcome_style),
        Line::styled(board.fill_line().unwrap_or_default(), fill_style),
        Line::styled(
            board.progress_line().unwrap_or_default(),
            Style::default().fg(DEFAULT_THEME.secondary),
        ),
    ];

    let block = Block::default()
        .title(" Allocation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
