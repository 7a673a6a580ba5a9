//! Session model extraction from decompressed `recovery.jsonlz4` contents

mod document;
mod types;


pub use document::{extract, RecoveryDocument};
pub use types::{Position, Size, Tab, Window};
