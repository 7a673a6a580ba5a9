//! Core library for firefox-session
//!
//! Reads the `recovery.jsonlz4` session container Firefox keeps in every
//! profile and projects it into windows and tabs.
//!
//! ```text
//! profiles::list_profiles ─► recovery::locate ─► container::read_file ─► session::extract
//!        Profile                 PathBuf             Vec<u8>              RecoveryDocument
//! ```

pub mod container;
pub mod error;
pub mod profiles;
pub mod recovery;
pub mod session;

pub use error::{Error, Result};
pub use profiles::{default_profiles_root, list_profiles, Profile, Profiles};
pub use session::{RecoveryDocument, Tab, Window};
