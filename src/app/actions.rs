use std::io::Stdout;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use super::state::{App, Prompt};
use crate::config::AddonInfo;
use crate::host::{matches_mask, BrowseKind, Host, Notification};
use crate::plugin::listing::ListingDirective;
use crate::system::signal::{RefreshSignal, SignalFile};
use crate::ui::draw::ui;

pub type Term = Terminal<CrosstermBackend<Stdout>>;

pub struct TerminalHost<'a> {
    pub terminal: &'a mut Term,
    pub app: &'a mut App,
    pub signal: &'a SignalFile,
}

impl TerminalHost<'_> {
    fn prompt(
        &mut self,
        heading: &str,
        hint: &str,
        default: &str,
        accept: impl Fn(&str) -> Result<(), String>,
    ) -> Option<String> {
        self.app.prompt = Some(Prompt {
            heading: heading.to_string(),
            hint: hint.to_string(),
            input: default.to_string(),
            error: None,
        });

        let answer = loop {
            let app = &mut *self.app;
            if let Err(err) = self.terminal.draw(|frame| ui(frame, app)) {
                warn!(error = %err, "failed to draw dialog");
                break None;
            }

            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(err) => {
                    warn!(error = %err, "failed to read dialog input");
                    break None;
                }
            };

            let Some(prompt) = self.app.prompt.as_mut() else {
                break None;
            };
            match key.code {
                KeyCode::Esc => break None,
                KeyCode::Enter => match accept(&prompt.input) {
                    Ok(()) => break Some(prompt.input.clone()),
                    Err(message) => prompt.error = Some(message),
                },
                KeyCode::Backspace => {
                    prompt.input.pop();
                    prompt.error = None;
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    prompt.input.clear();
                    prompt.error = None;
                }
                KeyCode::Char(c) => {
                    prompt.input.push(c);
                    prompt.error = None;
                }
                _ => {}
            }
        };

        self.app.prompt = None;
        answer
    }
}

fn check_browsed(path: &str, mask: &str) -> Result<(), String> {
    if path.is_empty() {
        return Ok(());
    }
    if !matches_mask(path, mask) {
        return Err(format!("Expected a {} file", mask.replace('|', " or ")));
    }
    if !path.contains("://") && !Path::new(path).exists() {
        return Err("No such file".to_string());
    }
    Ok(())
}

impl Host for TerminalHost<'_> {
    fn addon(&self) -> &AddonInfo {
        &self.app.addon
    }

    fn is_widget(&self) -> bool {
        self.app.widget
    }

    fn input(&mut self, heading: &str, default: &str) -> String {
        self.prompt(heading, "Free text", default, |_| Ok(()))
            .unwrap_or_default()
    }

    fn browse(&mut self, kind: BrowseKind, heading: &str, mask: &str, default: &str) -> String {
        let hint = match kind {
            BrowseKind::Image => format!("Path to an image ({mask})"),
            BrowseKind::File => "Path to the program or file to open".to_string(),
        };
        self.prompt(heading, &hint, default, |path| check_browsed(path, mask))
            .unwrap_or_else(|| default.to_string())
    }

    fn notify(&mut self, notification: Notification) {
        self.app.push_toast(notification);
    }

    fn end_directory(&mut self, listing: ListingDirective) {
        self.app.set_listing(listing);
    }

    fn refresh_container(&mut self) {
        self.app.needs_refresh = true;
    }

    fn refresh_widgets(&mut self) {
        self.signal.refresh_container();
    }
}
