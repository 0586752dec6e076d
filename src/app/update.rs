use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use tracing::{debug, error};

use super::actions::{Term, TerminalHost};
use super::state::{App, ConfirmAction};
use crate::plugin::url::plugin_url;
use crate::plugin::Dispatcher;
use crate::system::signal::{RefreshFlag, SignalFile, SignalWatcher};
use crate::ui::draw::ui;

pub struct Shell<'a> {
    pub dispatcher: Dispatcher<'a>,
    pub signal: SignalFile,
    pub watcher: SignalWatcher,
    pub refresh: &'a RefreshFlag,
    pub toast: Duration,
}

impl Shell<'_> {
    pub fn invoke(&self, app: &mut App, terminal: &mut Term, url: &str) {
        debug!(url, "invoking plugin");
        let result = {
            let mut host = TerminalHost {
                terminal: &mut *terminal,
                app: &mut *app,
                signal: &self.signal,
            };
            self.dispatcher.dispatch(&mut host, url)
        };

        if let Err(err) = result {
            error!(url, error = %err, "plugin invocation failed");
            app.error_toast(err.to_string(), self.toast);
            app.set_status(format!("Failed: {err}"));
        }
    }

    fn list(&mut self, app: &mut App, terminal: &mut Term) {
        app.needs_refresh = false;
        let url = app.addon.base_url();
        self.invoke(app, terminal, &url);
    }

    fn refresh_due(&mut self, app: &App) -> bool {
        // Evaluate all three so every pending signal is consumed.
        let flagged = self.refresh.take();
        let signalled = self.watcher.changed();
        app.needs_refresh || flagged || signalled
    }
}

fn context_url(app: &App, label: &str) -> Option<(String, String)> {
    let item = app.current_item()?;
    let action = item.item.context_action(label)?;
    Some((item.item.label.clone(), action.url.clone()))
}

pub fn run(app: &mut App, terminal: &mut Term, shell: &mut Shell<'_>) -> Result<()> {
    loop {
        if shell.refresh_due(app) {
            shell.list(app, terminal);
        }

        app.prune_toasts(Instant::now());
        terminal.draw(|frame| ui(frame, app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if app.search_mode {
                match key.code {
                    KeyCode::Esc => {
                        app.search_mode = false;
                    }
                    KeyCode::Enter => {
                        app.search_mode = false;
                        app.set_status(format!("Search applied: '{}'", app.search_input));
                    }
                    KeyCode::Backspace => {
                        app.search_input.pop();
                        app.refresh_filter();
                    }
                    KeyCode::Char(c) => {
                        if !key.modifiers.contains(KeyModifiers::CONTROL) {
                            app.search_input.push(c);
                            app.refresh_filter();
                        }
                    }
                    _ => {}
                }
                continue;
            }

            if let Some(ConfirmAction::Remove { title, url }) = app.confirm_action.clone() {
                match key.code {
                    KeyCode::Enter => {
                        app.confirm_action = None;
                        if app.confirm_selected {
                            shell.invoke(app, terminal, &url);
                        } else {
                            app.set_status(format!("Kept {title}."));
                        }
                    }
                    KeyCode::Left | KeyCode::Char('h') => {
                        app.confirm_selected = true;
                    }
                    KeyCode::Right | KeyCode::Char('l') => {
                        app.confirm_selected = false;
                    }
                    KeyCode::Char('y') => {
                        app.confirm_action = None;
                        shell.invoke(app, terminal, &url);
                    }
                    KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => {
                        app.confirm_action = None;
                        app.set_status("Remove cancelled.");
                    }
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                KeyCode::Char('/') => {
                    app.search_mode = true;
                }
                KeyCode::Esc => {
                    if !app.search_input.is_empty() {
                        app.search_input.clear();
                        app.refresh_filter();
                        app.set_status("Search cleared.");
                    }
                }
                KeyCode::F(5) => {
                    app.needs_refresh = true;
                    app.set_status("Refreshed.");
                }
                KeyCode::Enter => {
                    let Some((url, label, is_folder)) = app
                        .current_item()
                        .map(|item| (item.url.clone(), item.item.label.clone(), item.is_folder))
                    else {
                        app.set_status("Nothing focused.");
                        continue;
                    };
                    if !is_folder {
                        app.set_status(format!("Launched {label}."));
                    }
                    shell.invoke(app, terminal, &url);
                }
                KeyCode::Char('a') | KeyCode::Char('A') => {
                    if app.widget {
                        app.set_status("Adding is not available in widget view.");
                        continue;
                    }
                    let url = plugin_url(&app.addon.id, &[("action", "add")]);
                    shell.invoke(app, terminal, &url);
                }
                KeyCode::Char('e') | KeyCode::Char('E') => match context_url(app, "Edit") {
                    Some((_, url)) => shell.invoke(app, terminal, &url),
                    None => app.set_status("No program focused to edit."),
                },
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Delete => {
                    match context_url(app, "Remove") {
                        Some((title, url)) => {
                            app.confirm_action = Some(ConfirmAction::Remove { title, url });
                            app.confirm_selected = false;
                            app.set_status("Press Enter to confirm, Esc to cancel.");
                        }
                        None => app.set_status("No program focused to remove."),
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}
