pub mod stdio;
#[cfg(test)]
pub mod testing;

use std::time::Duration;

use crate::config::AddonInfo;
use crate::plugin::listing::ListingDirective;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub heading: String,
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl Notification {
    pub fn success(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            heading: "Success".to_string(),
            message: message.into(),
            severity: Severity::Info,
            duration,
        }
    }

    pub fn error(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            heading: "Error".to_string(),
            message: message.into(),
            severity: Severity::Error,
            duration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseKind {
    File,
    Image,
}

pub trait Host {
    fn addon(&self) -> &AddonInfo;

    fn is_widget(&self) -> bool;

    /// Single-line text prompt. A cancelled prompt yields an empty string.
    fn input(&mut self, heading: &str, default: &str) -> String;

    /// File picker. `mask` is a `|`-separated extension list, empty for any
    /// file. A cancelled picker yields `default`.
    fn browse(&mut self, kind: BrowseKind, heading: &str, mask: &str, default: &str) -> String;

    fn notify(&mut self, notification: Notification);

    fn end_directory(&mut self, listing: ListingDirective);

    fn refresh_container(&mut self);

    fn refresh_widgets(&mut self);
}

pub fn matches_mask(path: &str, mask: &str) -> bool {
    if mask.trim().is_empty() {
        return true;
    }
    let lower = path.to_ascii_lowercase();
    mask.split('|')
        .map(|ext| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .any(|ext| lower.ends_with(&ext))
}
