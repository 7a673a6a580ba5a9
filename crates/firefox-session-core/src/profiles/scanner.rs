//! Profile discovery under a profiles root such as `~/.mozilla/firefox`

use std::fs::ReadDir;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::profile::Profile;
use crate::error::{Error, Result};

/// Marker file every real profile directory contains
const PROFILE_MARKER: &str = "times.json";

/// Profiles under a root directory.
///
/// Holds only the root. Each call to [`Profiles::iter`] re-reads the
/// directory, so profiles created or removed in between are picked up.
#[derive(Debug, Clone)]
pub struct Profiles {
    root: PathBuf,
}

/// List the profiles directly under `root`
pub fn list_profiles(root: impl Into<PathBuf>) -> Profiles {
    Profiles { root: root.into() }
}

impl Profiles {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a fresh scan of the root directory.
    ///
    /// A missing root yields no profiles. Any other failure to open the root
    /// is returned as [`Error::Io`].
    pub fn iter(&self) -> Result<ProfileIter> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => Some(entries),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Profiles directory {:?} does not exist", self.root);
                None
            }
            Err(source) => {
                return Err(Error::Io {
                    path: self.root.clone(),
                    source,
                })
            }
        };
        Ok(ProfileIter { entries })
    }
}

/// Single pass over one directory listing, yielding qualifying profiles
#[derive(Debug)]
pub struct ProfileIter {
    entries: Option<ReadDir>,
}

impl Iterator for ProfileIter {
    type Item = Profile;

    fn next(&mut self) -> Option<Profile> {
        let entries = self.entries.as_mut()?;
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read profiles directory entry: {}", e);
                    continue;
                }
            };
            if let Some(profile) = profile_from_dir(&entry.path()) {
                return Some(profile);
            }
        }
        None
    }
}

/// Decide whether `path` is a profile directory
fn profile_from_dir(path: &Path) -> Option<Profile> {
    let dir_name = path.file_name()?.to_str()?;

    // Skip hidden entries like `.parentlock` or `.hidden.profile`
    if dir_name.starts_with('.') || !path.is_dir() {
        return None;
    }

    let Some(profile) = Profile::from_dir_name(dir_name, path) else {
        tracing::debug!("Skipping {:?}: not a <hash>.<name> directory", path);
        return None;
    };

    if !path.join(PROFILE_MARKER).is_file() {
        tracing::debug!("Skipping {:?}: no {}", path, PROFILE_MARKER);
        return None;
    }

    Some(profile)
}
