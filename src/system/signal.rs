use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tracing::{trace, warn};

pub const SIGNAL_FILE: &str = "refresh.signal";

pub trait RefreshSignal: Send + Sync {
    fn refresh_container(&self);
}

/// Cross-process refresh marker in the profile directory. Every touch writes
/// a new stamp; watchers compare stamps instead of mtimes, which are too
/// coarse on some filesystems.
#[derive(Debug, Clone)]
pub struct SignalFile {
    path: PathBuf,
}

impl SignalFile {
    pub fn new(profile_dir: impl AsRef<Path>) -> Self {
        Self {
            path: profile_dir.as_ref().join(SIGNAL_FILE),
        }
    }

    pub fn touch(&self) -> io::Result<()> {
        let stamp = format!("{}:{}", std::process::id(), Utc::now().timestamp_micros());
        fs::write(&self.path, stamp)?;
        trace!(path = %self.path.display(), "refresh signalled");
        Ok(())
    }

    pub fn stamp(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    pub fn watch(self) -> SignalWatcher {
        let last = self.stamp();
        SignalWatcher { file: self, last }
    }
}

impl RefreshSignal for SignalFile {
    fn refresh_container(&self) {
        if let Err(err) = self.touch() {
            warn!(path = %self.path.display(), error = %err, "failed to write refresh signal");
        }
    }
}

#[derive(Debug)]
pub struct SignalWatcher {
    file: SignalFile,
    last: Option<String>,
}

impl SignalWatcher {
    pub fn changed(&mut self) -> bool {
        let current = self.file.stamp();
        if current != self.last {
            self.last = current;
            return true;
        }
        false
    }
}

#[derive(Debug, Default)]
pub struct RefreshFlag(AtomicBool);

impl RefreshFlag {
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::AcqRel)
    }
}

impl RefreshSignal for RefreshFlag {
    fn refresh_container(&self) {
        self.0.store(true, Ordering::Release);
    }
}
