use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

use super::{BrowseKind, Host, Notification};
use crate::config::AddonInfo;
use crate::plugin::listing::ListingDirective;
use crate::system::opener::{LaunchError, Opener};

#[derive(Debug)]
pub struct RecordingHost {
    pub addon: AddonInfo,
    pub widget: bool,
    pub answers: VecDeque<String>,
    pub prompts: Vec<Prompt>,
    pub notifications: Vec<Notification>,
    pub listings: Vec<ListingDirective>,
    pub container_refreshes: usize,
    pub widget_refreshes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub heading: String,
    pub default: String,
    pub browse: Option<(BrowseKind, String)>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            addon: AddonInfo {
                id: "plugin.program.test".to_string(),
                path: PathBuf::from("/opt/addon"),
                profile: PathBuf::from("/tmp/profile"),
            },
            widget: false,
            answers: VecDeque::new(),
            prompts: Vec::new(),
            notifications: Vec::new(),
            listings: Vec::new(),
            container_refreshes: 0,
            widget_refreshes: 0,
        }
    }

    pub fn with_answers<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut host = Self::new();
        host.answers = answers.into_iter().map(Into::into).collect();
        host
    }

    pub fn last_listing(&self) -> &ListingDirective {
        self.listings.last().expect("no listing was produced")
    }
}

impl Host for RecordingHost {
    fn addon(&self) -> &AddonInfo {
        &self.addon
    }

    fn is_widget(&self) -> bool {
        self.widget
    }

    fn input(&mut self, heading: &str, default: &str) -> String {
        self.prompts.push(Prompt {
            heading: heading.to_string(),
            default: default.to_string(),
            browse: None,
        });
        self.answers.pop_front().unwrap_or_default()
    }

    fn browse(&mut self, kind: BrowseKind, heading: &str, mask: &str, default: &str) -> String {
        self.prompts.push(Prompt {
            heading: heading.to_string(),
            default: default.to_string(),
            browse: Some((kind, mask.to_string())),
        });
        self.answers
            .pop_front()
            .unwrap_or_else(|| default.to_string())
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn end_directory(&mut self, listing: ListingDirective) {
        self.listings.push(listing);
    }

    fn refresh_container(&mut self) {
        self.container_refreshes += 1;
    }

    fn refresh_widgets(&mut self) {
        self.widget_refreshes += 1;
    }
}

#[derive(Debug, Default)]
pub struct FakeOpener {
    opened: RefCell<Vec<String>>,
    pub fail: bool,
}

impl FakeOpener {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl Opener for FakeOpener {
    fn open(&self, path: &str) -> Result<(), LaunchError> {
        self.opened.borrow_mut().push(path.to_string());
        if self.fail {
            return Err(LaunchError::HelperMissing("xdg-open"));
        }
        Ok(())
    }
}
