//! Recovery file resolution and loading for a single profile

use std::io::ErrorKind;
use std::path::PathBuf;

use crate::container;
use crate::error::{Error, Result};
use crate::profiles::Profile;
use crate::session::{self, RecoveryDocument};

const BACKUPS_DIR: &str = "sessionstore-backups";
const RECOVERY_FILE: &str = "recovery.jsonlz4";

/// Path of the session recovery container inside `profile`
pub fn locate(profile: &Profile) -> PathBuf {
    profile.path.join(BACKUPS_DIR).join(RECOVERY_FILE)
}

/// Read, decompress and parse `profile`'s recovery container.
///
/// Returns `Ok(None)` when the profile has no recovery file, which is the
/// normal state of a profile Firefox has not run with recently.
pub fn load(profile: &Profile) -> Result<Option<RecoveryDocument>> {
    let path = locate(profile);
    let bytes = match container::read_file(&path) {
        Ok(bytes) => bytes,
        Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} has no recovery file at {:?}", profile, path);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };
    session::extract(&bytes).map(Some)
}
