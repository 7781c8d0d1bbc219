use crate::{Error, Result};
use rand::Rng;
use std::env;
use std::fmt;
use std::time::Duration;

pub const EMAIL_VAR: &str = "LINKEDIN_EMAIL";
pub const PASSWORD_VAR: &str = "LINKEDIN_PASSWORD";
pub const OLLAMA_URL_VAR: &str = "OLLAMA_URL";
pub const MODEL_VAR: &str = "LINKUP_MODEL";

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama2";

/// LinkedIn login credentials. The password never appears in logs.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Inter-profile pacing: a uniformly random pause between profiles to keep
/// the run from looking like a machine. Defaults to 20-40 seconds.
#[derive(Debug, Clone, Copy)]
pub struct PacingPolicy {
    min: Duration,
    max: Duration,
}

impl PacingPolicy {
    pub fn new(min: Duration, max: Duration) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidConfig(format!(
                "pacing minimum ({:?}) exceeds maximum ({:?})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// Sample one pause from the configured range.
    pub fn sample(&self) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            min: Duration::from_secs(20),
            max: Duration::from_secs(40),
        }
    }
}

/// Everything the run needs, assembled once at startup. Workflow code never
/// reads the environment itself.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub ollama_url: String,
    pub model: String,
    pub pacing: PacingPolicy,
}

impl Settings {
    /// Build settings from the process environment. Missing credentials are
    /// a startup-fatal error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup (tests inject one).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = lookup(EMAIL_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingCredential(EMAIL_VAR))?;
        let password = lookup(PASSWORD_VAR)
            .filter(|v| !v.is_empty())
            .ok_or(Error::MissingCredential(PASSWORD_VAR))?;

        Ok(Self {
            credentials: Credentials { email, password },
            ollama_url: lookup(OLLAMA_URL_VAR).unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string()),
            model: lookup(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            pacing: PacingPolicy::default(),
        })
    }
}
