use crate::{Error, Result};
use async_trait::async_trait;
use linkup_core::note::NOTE_CHAR_LIMIT;
use linkup_core::{ConnectionNote, Profile};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Produces the note injected into the invite form. Implementations must
/// never fail: when the backend is unavailable they return a usable
/// fallback note instead.
#[async_trait]
pub trait NoteGenerator: Send + Sync {
    async fn generate(&self, profile: &Profile) -> ConnectionNote;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Ollama-backed generator. One request per note, no retries; every failure
/// mode degrades to [`ConnectionNote::fallback`].
pub struct OllamaGenerator {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    /// Check whether the backend is reachable at all.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/version", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Send one prompt to the backend and return the raw completion.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        tracing::debug!("Requesting completion from {} (model {})", url, self.model);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.response.trim().to_string())
    }

    /// The prompt sent for a profile. Bounded: only name and role are
    /// embedded, nothing free-form.
    pub fn build_prompt(profile: &Profile) -> String {
        let position = profile
            .current_position
            .as_deref()
            .unwrap_or("professional in their field");

        format!(
            "Generate a brief, professional LinkedIn connection note for {}, \
             who is a {}. Keep it under {} characters. Do not include any emojis \
             or special characters and just give the output message that can be \
             directly pasted there.",
            profile.name, position, NOTE_CHAR_LIMIT
        )
    }
}

#[async_trait]
impl NoteGenerator for OllamaGenerator {
    async fn generate(&self, profile: &Profile) -> ConnectionNote {
        let prompt = Self::build_prompt(profile);

        match self.complete(&prompt).await {
            Ok(raw) => {
                let note = ConnectionNote::new(&raw);
                if note.was_truncated() {
                    tracing::warn!(
                        "Generated note for {} exceeded {} characters, truncating",
                        profile.name,
                        NOTE_CHAR_LIMIT
                    );
                }
                note
            }
            Err(e) => {
                tracing::warn!("Note generation failed for {}: {}", profile.name, e);
                ConnectionNote::fallback()
            }
        }
    }
}
