use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::state::Prompt;
use crate::ui::layout::centered_box;
use crate::ui::theme::*;

pub fn render_prompt(frame: &mut Frame<'_>, prompt: &Prompt) {
    let area = centered_box(72, 7, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", prompt.heading))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(C_PRIMARY))
        .style(Style::default().bg(C_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let status = match &prompt.error {
        Some(error) => Span::styled(error.clone(), Style::default().fg(C_ERROR)),
        None => Span::styled(prompt.hint.clone(), Style::default().fg(C_MUTED)),
    };
    let lines = vec![
        Line::from(Span::styled(
            prompt.input.clone(),
            Style::default().fg(C_TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(status),
        Line::from(Span::styled(
            "Enter accept  Esc cancel  Ctrl+U clear",
            Style::default().fg(C_PANEL),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);

    let cursor_x = (inner.x + prompt.input.chars().count() as u16)
        .min(inner.x + inner.width.saturating_sub(1));
    frame.set_cursor_position((cursor_x, inner.y));
}
