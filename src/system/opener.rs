use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::info;
use which::which;

use super::os::{OpenHelper, OpenMethod, Platform};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no way to open files on {0}")]
    Unsupported(&'static str),

    #[error("{0} was not found on PATH")]
    HelperMissing(&'static str),

    #[error("failed to open {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait Opener {
    fn open(&self, path: &str) -> Result<(), LaunchError>;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemOpener {
    platform: Platform,
}

impl SystemOpener {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn detect() -> Self {
        Self::new(Platform::detect())
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    fn check_helper(helper: OpenHelper) -> Result<OpenHelper, LaunchError> {
        if which(helper.program).is_err() {
            return Err(LaunchError::HelperMissing(helper.program));
        }
        Ok(helper)
    }
}

fn helper_command(helper: OpenHelper, path: &str) -> Command {
    let mut command = Command::new(helper.program);
    command
        .args(helper.args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    command
}

impl Opener for SystemOpener {
    fn open(&self, path: &str) -> Result<(), LaunchError> {
        let method = self
            .platform
            .open_method()
            .ok_or(LaunchError::Unsupported(self.platform.label()))?;

        let spawn_error = |source| LaunchError::Spawn {
            path: path.to_string(),
            source,
        };

        match method {
            OpenMethod::ShellExecute => {
                open::that_detached(path).map_err(spawn_error)?;
                info!(path, "handed to shell");
            }
            OpenMethod::Helper(helper) => {
                let helper = Self::check_helper(helper)?;
                let child = helper_command(helper, path).spawn().map_err(spawn_error)?;
                info!(path, helper = helper.program, pid = child.id(), "handed to default handler");
            }
        }
        Ok(())
    }
}
