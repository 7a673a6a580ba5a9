//! firefox-session: dump the open windows and tabs of every Firefox profile
//!
//! The decoding itself lives in `firefox-session-core`; this crate holds the
//! command line, settings file handling and the JSON report.

pub mod config;
pub mod report;
