use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::App;
use crate::ui::theme::*;
use crate::utils::{fit_column, truncate_with_ellipsis};

const TITLE_WIDTH: usize = 28;
const YEAR_WIDTH: usize = 6;
const PLAYED_WIDTH: usize = 21;

pub fn render_program_list(frame: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default()
        .title(" Programs ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(C_PANEL))
        .style(Style::default().bg(C_BG));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(4)])
        .split(inner);

    let header = format!(
        "{}{}{}Description",
        fit_column("Title", TITLE_WIDTH + 1),
        fit_column("Year", YEAR_WIDTH),
        fit_column("Last played", PLAYED_WIDTH),
    );
    frame.render_widget(
        Paragraph::new(header).style(Style::default().fg(C_MUTED).add_modifier(Modifier::BOLD)),
        chunks[0],
    );

    let fixed = TITLE_WIDTH + 1 + YEAR_WIDTH + PLAYED_WIDTH + 3;
    let plot_width = (chunks[1].width as usize).saturating_sub(fixed).max(12);

    let items: Vec<ListItem> = app
        .filtered_indices
        .iter()
        .filter_map(|idx| app.items.get(*idx))
        .map(|entry| {
            if entry.is_folder {
                return ListItem::new(Line::from(Span::styled(
                    format!("+ {}", entry.item.label),
                    Style::default().fg(C_SUCCESS).add_modifier(Modifier::BOLD),
                )));
            }

            let (year, played, plot) = entry
                .item
                .info
                .as_ref()
                .map(|info| (info.year.as_str(), info.lastplayed.as_str(), info.plot.as_str()))
                .unwrap_or_default();

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("  {}", fit_column(&entry.item.label, TITLE_WIDTH - 1)),
                    Style::default().fg(C_TEXT),
                ),
                Span::styled(fit_column(year, YEAR_WIDTH), Style::default().fg(C_MUTED)),
                Span::styled(fit_column(played, PLAYED_WIDTH), Style::default().fg(C_PRIMARY)),
                Span::styled(
                    truncate_with_ellipsis(plot, plot_width),
                    Style::default().fg(C_TEXT),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(highlight())
        .highlight_symbol(">> ")
        .repeat_highlight_symbol(true);

    frame.render_stateful_widget(list, chunks[1], &mut app.list_state);
}
