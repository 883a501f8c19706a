//! Controls pane listing the key bindings

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Key label and description, in display order
pub const KEY_BINDINGS: [(&str, &str); 9] = [
    ("q", "quit"),
    ("↑", "allocate one more unit"),
    ("↓", "allocate one unit less"),
    ("→", "allocate 1024 more units"),
    ("←", "allocate 1024 units less"),
    ("z", "enable zeroing memory"),
    ("a", "disable zeroing"),
    ("x", "overallocate by 1 byte"),
    ("c", "allocate once with alloc_zeroed"),
];

/// Height of the controls pane, borders included
pub const CONTROLS_HEIGHT: u16 = KEY_BINDINGS.len() as u16 + 2;

pub fn render_controls_pane(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default().fg(DEFAULT_THEME.fg);

    let lines: Vec<Line> = KEY_BINDINGS
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!(" {} ", key), key_style),
                Span::styled(format!(" {}", desc), desc_style),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Controls ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
