use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, warn};

use super::CatalogError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);
const RETRY_DELAY: Duration = Duration::from_millis(25);
const STALE_AFTER: Duration = Duration::from_secs(30);

/// Advisory single-writer lock: an exclusively created file next to the
/// catalog, removed again when the guard drops.
#[derive(Debug)]
pub struct CatalogLock {
    path: PathBuf,
}

impl CatalogLock {
    pub fn acquire(path: PathBuf) -> Result<Self, CatalogError> {
        let deadline = Instant::now() + ACQUIRE_TIMEOUT;

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    let _ = writeln!(file, "{}", std::process::id());
                    debug!(path = %path.display(), "catalog lock acquired");
                    return Ok(Self { path });
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                    if is_stale(&path) {
                        warn!(path = %path.display(), "removing stale catalog lock");
                        match fs::remove_file(&path) {
                            Ok(()) => continue,
                            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
                            Err(err) => warn!(
                                path = %path.display(),
                                error = %err,
                                "stale lock could not be removed"
                            ),
                        }
                    }
                    if Instant::now() >= deadline {
                        return Err(CatalogError::Locked(path));
                    }
                    thread::sleep(RETRY_DELAY);
                }
                Err(source) => return Err(CatalogError::Io { path, source }),
            }
        }
    }
}

impl Drop for CatalogLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn is_stale(path: &Path) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .map(|age| age > STALE_AFTER)
        .unwrap_or(false)
}
