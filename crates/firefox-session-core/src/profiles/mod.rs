pub mod paths;
pub mod profile;
pub mod scanner;

pub use paths::{default_profiles_root, Platform};
pub use profile::Profile;
pub use scanner::{list_profiles, ProfileIter, Profiles};
