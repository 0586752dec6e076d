use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::state::{App, ConfirmAction};
use crate::ui::components::{
    detail_panel::render_detail_panel, footer::render_footer, header::render_header,
    program_list::render_program_list, prompt::render_prompt,
};
use crate::ui::layout::centered_rect;
use crate::ui::theme::*;

pub fn ui(frame: &mut Frame<'_>, app: &mut App) {
    frame.render_widget(
        Block::default().style(Style::default().bg(C_BG)),
        frame.area(),
    );

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_header(frame, vertical[0], app);

    let search_title = if app.search_mode {
        " Search mode (/): typing... Enter apply, Esc close "
    } else {
        " Search (/ to start, Esc clear) "
    };

    let search_text = if app.search_input.is_empty() {
        "Type to filter by title or description".to_string()
    } else {
        app.search_input.clone()
    };
    let (border, text) = if app.search_mode {
        (C_PRIMARY, C_TEXT)
    } else {
        (C_PANEL, C_MUTED)
    };
    let search = Paragraph::new(search_text)
        .style(Style::default().fg(text))
        .block(
            Block::default()
                .title(search_title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        );

    frame.render_widget(search, vertical[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(vertical[2]);

    render_program_list(frame, body[0], app);
    render_detail_panel(frame, body[1], app);

    render_footer(frame, vertical[3], app);

    if let Some(ConfirmAction::Remove { title, .. }) = &app.confirm_action {
        render_confirm(frame, title, app.confirm_selected);
    }

    if let Some(prompt) = &app.prompt {
        render_prompt(frame, prompt);
    } else if app.search_mode {
        let cursor_x = vertical[1].x + 1 + app.search_input.chars().count() as u16;
        let cursor_y = vertical[1].y + 1;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

fn render_confirm(frame: &mut Frame<'_>, title: &str, yes_selected: bool) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let block = Paragraph::new(format!("Remove {title} from the catalog?"))
        .style(Style::default().fg(C_TEXT))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Confirm Remove ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(C_PANEL)),
        );
    frame.render_widget(block, area);

    let btn_area = Rect::new(
        area.x + 2,
        area.y + area.height.saturating_sub(3),
        area.width.saturating_sub(4),
        1,
    );

    let btns = Paragraph::new(
        Line::from(vec![
            button("[ Yes ]", C_SUCCESS, yes_selected),
            Span::raw(" "),
            button("[ No ]", C_WARNING, !yes_selected),
        ])
        .alignment(Alignment::Center),
    );
    frame.render_widget(btns, btn_area);
}

fn button(label: &'static str, color: Color, focused: bool) -> Span<'static> {
    let style = Style::default().add_modifier(Modifier::BOLD);
    if focused {
        Span::styled(label, style.fg(C_BG).bg(color))
    } else {
        Span::styled(label, style.fg(color))
    }
}
