use std::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    Wsl,
    Mac,
    Windows,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenHelper {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMethod {
    ShellExecute,
    Helper(OpenHelper),
}

impl Platform {
    pub fn detect() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Mac
        } else if cfg!(target_os = "linux") && is_wsl() {
            Self::Wsl
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Unknown
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::Wsl => "WSL",
            Platform::Mac => "macOS",
            Platform::Windows => "Windows",
            Platform::Unknown => "Unknown",
        }
    }

    pub fn open_method(&self) -> Option<OpenMethod> {
        match self {
            Platform::Windows => Some(OpenMethod::ShellExecute),
            Platform::Linux | Platform::Wsl => Some(OpenMethod::Helper(OpenHelper {
                program: "xdg-open",
                args: &[],
            })),
            Platform::Mac => Some(OpenMethod::Helper(OpenHelper {
                program: "open",
                args: &[],
            })),
            Platform::Unknown => None,
        }
    }
}

pub fn is_wsl() -> bool {
    if std::env::var("WSL_DISTRO_NAME").is_ok() || std::env::var("WSL_INTEROP").is_ok() {
        return true;
    }

    fs::read_to_string("/proc/version")
        .map(|version| version.to_ascii_lowercase().contains("microsoft"))
        .unwrap_or(false)
}
