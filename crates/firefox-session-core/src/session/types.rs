//! Window and tab entities projected from a session document

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An open tab, resolved to the history entry it currently displays
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    /// When the tab was last selected, with millisecond precision
    pub last_accessed: DateTime<Utc>,
    /// URL of the current history entry
    pub url: String,
    /// Title of the current history entry (empty when Firefox recorded none)
    pub title: String,
}

/// Window dimensions in CSS pixels; each side is independently optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Size {
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Window origin on screen; each coordinate is independently optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub x: Option<i64>,
    pub y: Option<i64>,
}

/// An open browser window.
///
/// Every attribute other than `tabs` is `None` when the session file did not
/// record it. `None` means unknown, never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window {
    /// Tabs in strip order
    pub tabs: Vec<Tab>,
    /// Workspace/virtual desktop identifier (`workspaceID`)
    pub workspace: Option<String>,
    /// Stacking order among the session's windows (`zIndex`)
    pub zindex: Option<i64>,
    pub size: Size,
    pub position: Position,
    /// Size mode such as `normal`, `maximized`, `minimized` (`sizemode`)
    pub mode: Option<String>,
}
