use ratatui::{
    layout::Rect,
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::state::App;
use crate::ui::theme::*;

fn field(label: &str, value: impl Into<String>, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(C_MUTED)),
        Span::styled(value.into(), Style::default().fg(color)),
    ])
}

fn or_none(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

pub fn render_detail_panel(frame: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(C_PANEL))
        .style(Style::default().bg(C_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match app.current_item() {
        Some(entry) if entry.is_folder => vec![
            Line::from(Span::styled(
                entry.item.label.clone(),
                Style::default().fg(C_SUCCESS).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to add a program to the catalog.",
                Style::default().fg(C_MUTED),
            )),
        ],
        Some(entry) => {
            let mut lines = vec![Line::from(Span::styled(
                entry.item.label.clone(),
                Style::default().fg(C_TEXT).add_modifier(Modifier::BOLD),
            ))];

            if let Some(info) = &entry.item.info {
                lines.push(field("Year", or_none(&info.year), C_TEXT));
                lines.push(field("Last played", info.lastplayed.clone(), C_PRIMARY));
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    or_none(&info.plot),
                    Style::default().fg(C_TEXT),
                )));
                lines.push(Line::from(""));
            }

            for key in ["thumb", "fanart", "clearlogo"] {
                if let Some(path) = entry.item.art.get(key) {
                    lines.push(field(key, or_none(path), C_MUTED));
                }
            }

            lines.push(Line::from(""));
            lines.push(field("Opens", entry.url.clone(), C_PRIMARY));

            if !entry.item.context_menu.is_empty() {
                let actions = entry
                    .item
                    .context_menu
                    .iter()
                    .map(|action| action.label.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(field("Actions", actions, C_WARNING));
            }
            lines
        }
        None => vec![Line::from(Span::styled(
            "No programs match the current search.",
            Style::default().fg(C_MUTED),
        ))],
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
