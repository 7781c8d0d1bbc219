use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A target profile loaded from the input file. Unknown fields are kept so
/// the note prompt can be enriched later without a schema change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub current_position: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Profile {
    /// The navigable URL for this profile, with a scheme added when the
    /// input stored a bare host+path.
    pub fn target_url(&self) -> String {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            format!("https://{}", self.url)
        } else {
            self.url.clone()
        }
    }
}

pub struct ProfileReader;

impl ProfileReader {
    /// Read and parse an ordered profile list from the given path
    pub fn from_file(path: &Path) -> Result<Vec<Profile>> {
        tracing::debug!("Reading profiles from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let profiles: Vec<Profile> = serde_json::from_reader(reader)?;

        Self::validate(&profiles)?;

        tracing::info!("Loaded {} profiles", profiles.len());
        Ok(profiles)
    }

    /// Parse a profile list from a JSON string
    pub fn from_str(content: &str) -> Result<Vec<Profile>> {
        let profiles: Vec<Profile> = serde_json::from_str(content)?;
        Self::validate(&profiles)?;
        Ok(profiles)
    }

    /// Validate that every entry carries the fields the workflow needs.
    /// Duplicates are allowed; each entry is processed independently.
    pub fn validate(profiles: &[Profile]) -> Result<()> {
        for (idx, profile) in profiles.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(Error::InvalidProfile(format!("entry {} has an empty name", idx)));
            }
            if profile.url.trim().is_empty() {
                return Err(Error::InvalidProfile(format!(
                    "entry {} ({}) has an empty url",
                    idx, profile.name
                )));
            }
        }
        Ok(())
    }
}
