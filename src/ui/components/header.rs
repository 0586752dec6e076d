use ratatui::{
    layout::Rect,
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::state::App;
use crate::ui::theme::*;

pub fn render_header(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mode = if app.widget { "widget" } else { "browse" };
    let line = Line::from(vec![
        Span::styled(
            " Programs ",
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", app.addon.id), Style::default().fg(C_TEXT)),
        Span::styled(format!(" [{mode}]"), Style::default().fg(C_MUTED)),
        Span::styled(
            format!("  {} programs", app.program_count()),
            Style::default().fg(C_MUTED),
        ),
    ]);

    let title = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(C_PANEL)),
    );
    frame.render_widget(title, area);
}
