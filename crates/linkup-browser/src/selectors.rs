use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Candidate CSS selectors for every workflow step, most specific first.
/// LinkedIn ships no stable selectors, so each step carries an ordered
/// fallback list; when the UI drifts, this is a config change, not a code
/// change. A partial config file overrides only the groups it names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSet {
    pub connect: Vec<String>,
    pub add_note: Vec<String>,
    pub note_textarea: Vec<String>,
    pub send: Vec<String>,
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            connect: vec![
                "button[aria-label*='Connect']".to_string(),
                "button[aria-label*='connect']".to_string(),
            ],
            add_note: vec![
                "button[aria-label*='Add a note']".to_string(),
                "button[aria-label*='note']".to_string(),
                "button.artdeco-button--secondary".to_string(),
            ],
            note_textarea: vec![
                "textarea#custom-message".to_string(),
                "textarea.send-invite__custom-message".to_string(),
                "textarea[name='message']".to_string(),
                "textarea.connect-button-send-invite__custom-message".to_string(),
                "textarea[aria-label*='message']".to_string(),
                "textarea.artdeco-text-input--input".to_string(),
            ],
            send: vec![
                "button[aria-label*='Send now']".to_string(),
                "button[aria-label*='send']".to_string(),
                "button[type='submit']".to_string(),
                "button.artdeco-button--primary".to_string(),
                ".artdeco-modal__confirm-dialog-btn".to_string(),
            ],
        }
    }
}

impl SelectorSet {
    /// Load selector overrides from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let set: SelectorSet = serde_json::from_reader(reader)
            .map_err(|e| Error::SelectorConfig(format!("{}: {}", path.display(), e)))?;
        set.validate()?;
        Ok(set)
    }

    fn validate(&self) -> Result<()> {
        for (group, list) in [
            ("connect", &self.connect),
            ("add_note", &self.add_note),
            ("note_textarea", &self.note_textarea),
            ("send", &self.send),
        ] {
            if list.is_empty() {
                return Err(Error::SelectorConfig(format!(
                    "selector group '{}' is empty",
                    group
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_ordering_most_specific_first() {
        let set = SelectorSet::default();
        assert_eq!(set.connect[0], "button[aria-label*='Connect']");
        assert_eq!(set.note_textarea[0], "textarea#custom-message");
        assert_eq!(set.send[0], "button[aria-label*='Send now']");
        assert_eq!(set.add_note.len(), 3);
    }

    #[test]
    fn test_partial_file_overrides_one_group() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"send": ["button.new-send"]}}"#).unwrap();

        let set = SelectorSet::from_file(file.path()).unwrap();
        assert_eq!(set.send, vec!["button.new-send".to_string()]);
        // Untouched groups keep their defaults
        assert_eq!(set.connect, SelectorSet::default().connect);
    }

    #[test]
    fn test_empty_group_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"connect": []}}"#).unwrap();

        let result = SelectorSet::from_file(file.path());
        assert!(matches!(result, Err(Error::SelectorConfig(_))));
    }
}
