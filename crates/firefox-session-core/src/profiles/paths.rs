//! Well-known profiles root per operating system

use std::path::{Path, PathBuf};

/// Operating system families with distinct Firefox profile layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    /// Linux and other Unix-likes
    Linux,
}

impl Platform {
    /// Platform this binary was compiled for
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Profiles root relative to a user's home directory
    pub fn profiles_root(self, home: &Path) -> PathBuf {
        match self {
            Platform::Windows => home.join("AppData/Roaming/Mozilla/Firefox/Profiles"),
            Platform::MacOs => home.join("Library/Application Support/Firefox/Profiles"),
            Platform::Linux => home.join(".mozilla/firefox"),
        }
    }
}

/// Profiles root for the current user on this platform.
///
/// Returns `None` when the home directory cannot be determined.
pub fn default_profiles_root() -> Option<PathBuf> {
    dirs::home_dir().map(|home| Platform::current().profiles_root(&home))
}
