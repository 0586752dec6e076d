use std::io::{BufRead, Write};

use tracing::{error, info, warn};

use super::{matches_mask, BrowseKind, Host, Notification, Severity};
use crate::config::AddonInfo;
use crate::plugin::listing::ListingDirective;
use crate::system::signal::{RefreshSignal, SignalFile};

pub struct StdioHost<R, O, E> {
    addon: AddonInfo,
    widget: bool,
    input: R,
    out: O,
    prompts: E,
    signal: SignalFile,
}

impl<R: BufRead, O: Write, E: Write> StdioHost<R, O, E> {
    pub fn new(addon: AddonInfo, widget: bool, input: R, out: O, prompts: E) -> Self {
        let signal = SignalFile::new(&addon.profile);
        Self {
            addon,
            widget,
            input,
            out,
            prompts,
            signal,
        }
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        let _ = write!(self.prompts, "{question}: ");
        let _ = self.prompts.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(err) => {
                warn!(error = %err, "failed to read answer");
                None
            }
        }
    }
}

fn question(heading: &str, default: &str) -> String {
    if default.is_empty() {
        heading.to_string()
    } else {
        format!("{heading} [{default}]")
    }
}

impl<R: BufRead, O: Write, E: Write> Host for StdioHost<R, O, E> {
    fn addon(&self) -> &AddonInfo {
        &self.addon
    }

    fn is_widget(&self) -> bool {
        self.widget
    }

    fn input(&mut self, heading: &str, default: &str) -> String {
        match self.ask(&question(heading, default)) {
            Some(answer) if answer.is_empty() => default.to_string(),
            Some(answer) => answer,
            None => String::new(),
        }
    }

    fn browse(&mut self, kind: BrowseKind, heading: &str, mask: &str, default: &str) -> String {
        let heading = match kind {
            BrowseKind::Image if !mask.is_empty() => format!("{heading} ({mask})"),
            _ => heading.to_string(),
        };
        loop {
            let Some(answer) = self.ask(&question(&heading, default)) else {
                return default.to_string();
            };
            if answer.is_empty() {
                return default.to_string();
            }
            if matches_mask(&answer, mask) {
                return answer;
            }
            let _ = writeln!(self.prompts, "expected one of: {mask}");
        }
    }

    fn notify(&mut self, notification: Notification) {
        match notification.severity {
            Severity::Info => info!(message = %notification.message, "notification"),
            Severity::Error => warn!(message = %notification.message, "notification"),
        }
        let _ = writeln!(
            self.prompts,
            "[{}] {}",
            notification.heading, notification.message
        );
    }

    fn end_directory(&mut self, listing: ListingDirective) {
        let written = serde_json::to_writer_pretty(&mut self.out, &listing)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.out));
        if let Err(err) = written {
            error!(error = %err, "failed to write listing");
        }
    }

    fn refresh_container(&mut self) {
        self.signal.refresh_container();
    }

    fn refresh_widgets(&mut self) {
        self.signal.refresh_container();
    }
}
