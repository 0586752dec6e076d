use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ADDON_ID: &str = "plugin.program.simplelauncher";
pub const PROFILE_ENV: &str = "SIMPLE_LAUNCHER_PROFILE";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "simple-launcher.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonInfo {
    pub id: String,
    pub path: PathBuf,
    pub profile: PathBuf,
}

impl AddonInfo {
    pub fn resolve(id: Option<String>, profile: Option<PathBuf>) -> Self {
        let path = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            id: id.unwrap_or_else(|| DEFAULT_ADDON_ID.to_string()),
            path,
            profile: profile.unwrap_or_else(default_profile_dir),
        }
    }

    pub fn base_url(&self) -> String {
        format!("plugin://{}/", self.id)
    }
}

pub fn default_profile_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(PROFILE_ENV).filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|dir| dir.join("simple-launcher"))
        .unwrap_or_else(|| PathBuf::from(".simple-launcher"))
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub refresh_interval_secs: u64,
    pub notification_ms: u64,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 10,
            notification_ms: 5000,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn load(profile: &Path) -> Result<Self, SettingsError> {
        let path = profile.join(SETTINGS_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(SettingsError::Io { path, source }),
        };
        serde_json::from_str(&content).map_err(|source| SettingsError::Corrupt { path, source })
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}
