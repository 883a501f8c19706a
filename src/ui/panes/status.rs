//! State bar with the spinner and the requested allocation

use crate::state::AllocationState;
use crate::ui::board::StatusBoard;
use crate::ui::panes::format_units;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the one-line state bar at the bottom
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    state: &AllocationState,
    board: &StatusBoard,
    unit_suffix: &str,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let bar_style = Style::default().bg(DEFAULT_THEME.bar_bg);
    let sep_style = bar_style.fg(DEFAULT_THEME.comment);
    let on_off = |enabled: bool| if enabled { "on" } else { "off" };

    let left_spans = vec![
        Span::styled(
            format!(" {} ", board.spinner.glyph()),
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", format_units(state.size_units, unit_suffix)),
            bar_style.fg(DEFAULT_THEME.fg).add_modifier(Modifier::BOLD),
        ),
        Span::styled("│", sep_style),
        Span::styled(
            format!(" zeroing {} ", on_off(state.zero_on_allocate)),
            bar_style.fg(DEFAULT_THEME.fg),
        ),
        Span::styled("│", sep_style),
        Span::styled(
            format!(" overallocate {} ", on_off(state.overallocate)),
            bar_style.fg(if state.overallocate {
                DEFAULT_THEME.warning
            } else {
                DEFAULT_THEME.fg
            }),
        ),
        Span::styled("│", sep_style),
        Span::styled(
            format!(" {} ", state.allocator_kind()),
            bar_style.fg(DEFAULT_THEME.fg),
        ),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(left_spans))
            .style(bar_style)
            .alignment(Alignment::Left),
        layout[0],
    );

    let right_spans = vec![
        Span::styled(" q ", Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black)),
        Span::styled(" quit ", bar_style.fg(DEFAULT_THEME.fg)),
    ];

    frame.render_widget(
        Paragraph::new(Line::from(right_spans))
            .style(bar_style)
            .alignment(Alignment::Right),
        layout[1],
    );
}
