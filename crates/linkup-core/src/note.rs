/// LinkedIn rejects connection notes longer than this.
pub const NOTE_CHAR_LIMIT: usize = 200;

/// Sent whenever the generation backend is unreachable or misbehaving.
pub const FALLBACK_NOTE: &str = "Hi, I'd love to connect and expand our professional network.";

/// Strip every code point outside the Basic Multilingual Plane (emoji and
/// other supplementary characters, which the invite form rejects) and
/// collapse whitespace runs to single spaces. Idempotent.
pub fn sanitize(raw: &str) -> String {
    let bmp_only: String = raw.chars().filter(|c| (*c as u32) <= 0xFFFF).collect();
    bmp_only.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A connection note ready for injection into the invite form: sanitized,
/// and hard-truncated to [`NOTE_CHAR_LIMIT`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionNote {
    text: String,
    truncated: bool,
}

impl ConnectionNote {
    pub fn new(raw: &str) -> Self {
        let cleaned = sanitize(raw);
        if cleaned.chars().count() > NOTE_CHAR_LIMIT {
            Self {
                text: cleaned.chars().take(NOTE_CHAR_LIMIT).collect(),
                truncated: true,
            }
        } else {
            Self {
                text: cleaned,
                truncated: false,
            }
        }
    }

    /// The fixed note used when generation fails.
    pub fn fallback() -> Self {
        Self::new(FALLBACK_NOTE)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when the sanitized input exceeded the character limit.
    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
