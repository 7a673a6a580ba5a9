//! Session document parsing and window/tab projection

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::types::{Position, Size, Tab, Window};
use crate::error::{Error, Result};

/// One profile's decompressed session, projected into windows and tabs.
///
/// The window list is built once, when the document is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryDocument {
    windows: Vec<Window>,
}

impl RecoveryDocument {
    /// Parse decompressed container bytes into a document.
    ///
    /// Fails with [`Error::MalformedSession`] on invalid UTF-8, invalid JSON,
    /// a missing `windows` array, missing required tab fields or a tab whose
    /// `index` does not point into its `entries`.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::malformed(format!("session is not valid UTF-8: {}", e)))?;
        let raw: RawSession =
            serde_json::from_str(text).map_err(|e| Error::malformed(e.to_string()))?;

        let windows = raw
            .windows
            .into_iter()
            .enumerate()
            .map(|(window_idx, window)| window.into_window(window_idx))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { windows })
    }

    /// Windows in the order the session recorded them
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Consume the document, keeping only its windows
    pub fn into_windows(self) -> Vec<Window> {
        self.windows
    }
}

/// Parse decompressed container bytes into a [`RecoveryDocument`]
pub fn extract(bytes: &[u8]) -> Result<RecoveryDocument> {
    RecoveryDocument::from_slice(bytes)
}

#[derive(Debug, Deserialize)]
struct RawSession {
    windows: Vec<RawWindow>,
}

#[derive(Debug, Deserialize)]
struct RawWindow {
    tabs: Vec<RawTab>,
    #[serde(default, rename = "workspaceID", deserialize_with = "lenient")]
    workspace_id: Option<String>,
    #[serde(default, rename = "zIndex", deserialize_with = "lenient")]
    z_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    width: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    height: Option<i64>,
    #[serde(default, rename = "screenX", deserialize_with = "lenient")]
    screen_x: Option<i64>,
    #[serde(default, rename = "screenY", deserialize_with = "lenient")]
    screen_y: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    sizemode: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTab {
    /// 1-based position of the displayed entry in `entries`
    index: i64,
    entries: Vec<RawEntry>,
    #[serde(rename = "lastAccessed")]
    last_accessed: i64,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    url: String,
    #[serde(default)]
    title: Option<String>,
}

/// Deserialize an optional attribute, mapping `null` or a value of the wrong
/// JSON type to `None` instead of failing the whole window.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::debug!("Ignoring window attribute with unexpected type: {}", e);
            Ok(None)
        }
    }
}

impl RawWindow {
    fn into_window(self, window_idx: usize) -> Result<Window> {
        let tabs = self
            .tabs
            .into_iter()
            .enumerate()
            .map(|(tab_idx, tab)| tab.into_tab(window_idx, tab_idx))
            .collect::<Result<Vec<_>>>()?;

        Ok(Window {
            tabs,
            workspace: self.workspace_id,
            zindex: self.z_index,
            size: Size {
                width: self.width,
                height: self.height,
            },
            position: Position {
                x: self.screen_x,
                y: self.screen_y,
            },
            mode: self.sizemode,
        })
    }
}

impl RawTab {
    fn into_tab(self, window_idx: usize, tab_idx: usize) -> Result<Tab> {
        let RawTab {
            index,
            entries,
            last_accessed,
        } = self;

        let last_accessed = millis_to_datetime(last_accessed).ok_or_else(|| {
            Error::malformed(format!(
                "window {} tab {}: lastAccessed {} is not a representable time",
                window_idx, tab_idx, last_accessed
            ))
        })?;

        let len = entries.len();
        let entry = current_entry_position(index, len)
            .and_then(|pos| entries.into_iter().nth(pos))
            .ok_or_else(|| {
                Error::malformed(format!(
                    "window {} tab {}: index {} is out of range for {} history entries",
                    window_idx, tab_idx, index, len
                ))
            })?;

        Ok(Tab {
            last_accessed,
            url: entry.url,
            title: entry.title.unwrap_or_default(),
        })
    }
}

/// Map a tab's 1-based `index` onto its 0-based `entries` storage
fn current_entry_position(index: i64, len: usize) -> Option<usize> {
    let pos = usize::try_from(index).ok()?.checked_sub(1)?;
    (pos < len).then_some(pos)
}

/// Convert epoch milliseconds to a UTC timestamp without dropping the
/// sub-second part
fn millis_to_datetime(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}
