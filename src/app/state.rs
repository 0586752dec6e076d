use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::config::AddonInfo;
use crate::host::{Notification, Severity};
use crate::plugin::listing::{DirectoryItem, ListingDirective};
use crate::system::os::Platform;

#[derive(Clone)]
pub enum ConfirmAction {
    Remove { title: String, url: String },
}

#[derive(Clone)]
pub struct Toast {
    pub heading: String,
    pub message: String,
    pub severity: Severity,
    pub expires_at: Instant,
}

#[derive(Clone, Default)]
pub struct Prompt {
    pub heading: String,
    pub hint: String,
    pub input: String,
    pub error: Option<String>,
}

pub struct App {
    pub addon: AddonInfo,
    pub widget: bool,
    pub platform: Platform,
    pub items: Vec<DirectoryItem>,
    pub filtered_indices: Vec<usize>,
    pub list_state: ListState,
    pub search_mode: bool,
    pub search_input: String,
    pub status: String,
    pub confirm_action: Option<ConfirmAction>,
    pub confirm_selected: bool,
    pub prompt: Option<Prompt>,
    pub toasts: Vec<Toast>,
    pub needs_refresh: bool,
}

impl App {
    pub fn new(addon: AddonInfo, widget: bool) -> Self {
        Self {
            addon,
            widget,
            platform: Platform::detect(),
            items: Vec::new(),
            filtered_indices: Vec::new(),
            list_state: ListState::default(),
            search_mode: false,
            search_input: String::new(),
            status: "Ready. Enter to launch, A add, E edit, R remove, / search.".to_string(),
            confirm_action: None,
            confirm_selected: false,
            prompt: None,
            toasts: Vec::new(),
            needs_refresh: true,
        }
    }

    pub fn set_listing(&mut self, listing: ListingDirective) {
        let focused = self.current_item().map(|item| item.url.clone());
        self.items = listing.items;
        self.refresh_filter();

        if let Some(url) = focused {
            if let Some(pos) = self
                .filtered_indices
                .iter()
                .position(|&idx| self.items[idx].url == url)
            {
                self.list_state.select(Some(pos));
            }
        }
    }

    pub fn refresh_filter(&mut self) {
        self.filtered_indices = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.matches_search(item))
            .map(|(index, _)| index)
            .collect();

        let new_idx = match self.list_state.selected() {
            Some(idx) if idx < self.filtered_indices.len() => Some(idx),
            _ if self.filtered_indices.is_empty() => None,
            _ => Some(0),
        };
        self.list_state.select(new_idx);
    }

    pub fn push_toast(&mut self, notification: Notification) {
        self.prune_toasts(Instant::now());
        self.toasts.push(Toast {
            heading: notification.heading,
            message: notification.message,
            severity: notification.severity,
            expires_at: Instant::now() + notification.duration,
        });
        if self.toasts.len() > 3 {
            self.toasts.remove(0);
        }
    }

    pub fn prune_toasts(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    pub fn error_toast(&mut self, message: impl Into<String>, duration: Duration) {
        self.push_toast(Notification::error(message, duration));
    }

    pub fn current_item(&self) -> Option<&DirectoryItem> {
        let idx = self.list_state.selected()?;
        let item_idx = *self.filtered_indices.get(idx)?;
        self.items.get(item_idx)
    }

    pub fn program_count(&self) -> usize {
        self.items.iter().filter(|item| !item.is_folder).count()
    }

    pub fn move_down(&mut self) {
        if self.filtered_indices.is_empty() {
            self.list_state.select(None);
            return;
        }

        let next = match self.list_state.selected() {
            Some(i) if i + 1 < self.filtered_indices.len() => i + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
    }

    pub fn move_up(&mut self) {
        if self.filtered_indices.is_empty() {
            self.list_state.select(None);
            return;
        }

        let prev = match self.list_state.selected() {
            Some(0) | None => self.filtered_indices.len() - 1,
            Some(i) => i.saturating_sub(1),
        };
        self.list_state.select(Some(prev));
    }

    pub fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status = message.into();
    }

    pub fn matches_search(&self, item: &DirectoryItem) -> bool {
        if item.is_folder || self.search_input.trim().is_empty() {
            return true;
        }
        let needle = self.search_input.to_ascii_lowercase();
        item.item.label.to_ascii_lowercase().contains(&needle)
            || item
                .item
                .info
                .as_ref()
                .map(|info| info.plot.to_ascii_lowercase().contains(&needle))
                .unwrap_or(false)
    }
}
