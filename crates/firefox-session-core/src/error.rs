//! Error taxonomy for container decoding and session extraction

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading one profile's session data.
///
/// Every variant is scoped to a single file. Callers iterating several
/// profiles decide whether to skip the failing one or stop.
#[derive(Debug, Error)]
pub enum Error {
    /// The file does not start with the `mozLz40\0` magic
    #[error("not a recognized recovery container: {reason}")]
    ContainerFormat { reason: String },

    /// The block payload is truncated, corrupt or disagrees with its size prefix
    #[error("failed to decompress recovery container: {reason}")]
    Decompression { reason: String },

    /// The decompressed document is not the session JSON we expect
    #[error("malformed session document: {reason}")]
    MalformedSession { reason: String },

    /// Reading the file failed for a reason other than it being absent
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn container_format(reason: impl Into<String>) -> Self {
        Self::ContainerFormat {
            reason: reason.into(),
        }
    }

    pub(crate) fn decompression(reason: impl Into<String>) -> Self {
        Self::Decompression {
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedSession {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
