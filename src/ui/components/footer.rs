use ratatui::{
    layout::Rect,
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::state::App;
use crate::ui::theme::*;

fn key(label: &'static str, color: Color) -> Span<'static> {
    Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn hint(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(C_MUTED))
}

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let mut first_line = vec![
        hint("Move "),
        key("↑/↓ j/k", C_TEXT),
        hint("  Launch "),
        key("Enter", C_PRIMARY),
    ];
    if !app.widget {
        first_line.extend([
            hint("  Add "),
            key("A", C_SUCCESS),
            hint("  Edit "),
            key("E", C_PRIMARY),
            hint("  Remove "),
            key("R", C_WARNING),
        ]);
    }
    first_line.extend([
        hint("  Search "),
        key("/", C_PRIMARY),
        hint("  Refresh "),
        key("F5", C_TEXT),
        hint("  Quit "),
        key("Q", C_TEXT),
    ]);

    let mut second_line = vec![
        Span::styled(app.status.clone(), Style::default().fg(C_TEXT)),
        Span::styled("   |   ", Style::default().fg(C_PANEL)),
        Span::styled(
            format!(
                "visible:{} programs:{} [{}]",
                app.filtered_indices.len(),
                app.program_count(),
                app.platform.label()
            ),
            Style::default().fg(C_MUTED),
        ),
    ];

    for toast in &app.toasts {
        let color = severity_color(toast.severity);
        second_line.push(Span::styled("  ", Style::default()));
        second_line.push(Span::styled(
            format!("{}: {}", toast.heading, toast.message),
            Style::default().fg(color),
        ));
    }

    let footer = Paragraph::new(vec![Line::from(first_line), Line::from(second_line)]).block(
        Block::default()
            .title(" Command Bar ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(C_PANEL)),
    );
    frame.render_widget(footer, area);
}
