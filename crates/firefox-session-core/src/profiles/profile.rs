//! Profile identity derived from a `<hash>.<name>` directory name

use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::recovery;
use crate::session::RecoveryDocument;

/// A Firefox user-data directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Random prefix before the first `.` (e.g. `abc123`)
    pub hash: String,
    /// Everything after the first `.` (e.g. `default-release`)
    pub name: String,
    /// Location of the profile directory
    pub path: PathBuf,
}

impl Profile {
    /// Build a profile from a directory name and its location.
    ///
    /// Returns `None` when the name has no `.` or nothing after the first
    /// one. Only the first `.` splits, so `abc.dev.edition` has the name
    /// `dev.edition`.
    pub fn from_dir_name(dir_name: &str, path: impl Into<PathBuf>) -> Option<Self> {
        let (hash, name) = dir_name.split_once('.')?;
        if name.is_empty() {
            return None;
        }
        Some(Self {
            hash: hash.to_string(),
            name: name.to_string(),
            path: path.into(),
        })
    }

    /// Location of this profile's session recovery container
    pub fn recovery_file_path(&self) -> PathBuf {
        recovery::locate(self)
    }

    /// Load this profile's current session, or `None` when it has none
    pub fn recovery_document(&self) -> Result<Option<RecoveryDocument>> {
        recovery::load(self)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile {}", self.name)
    }
}
