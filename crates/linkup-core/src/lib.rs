pub mod config;
pub mod error;
pub mod note;
pub mod profile;

pub use config::{Credentials, PacingPolicy, Settings};
pub use error::{Error, Result};
pub use note::ConnectionNote;
pub use profile::{Profile, ProfileReader};
