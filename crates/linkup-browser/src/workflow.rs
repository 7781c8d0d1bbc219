use crate::actions::{ActionExecutor, ELEMENT_WAIT};
use crate::driver::UiDriver;
use crate::selectors::SelectorSet;
use linkup_core::Profile;
use linkup_notegen::NoteGenerator;
use std::time::Duration;
use tokio::time::sleep;

/// Page load settle after navigating to a profile.
const PAGE_SETTLE: Duration = Duration::from_secs(5);
/// Invite dialog settle after clicking Connect.
const DIALOG_SETTLE: Duration = Duration::from_secs(3);
/// Note dialog settle after clicking Add a note, and after injecting text.
const NOTE_SETTLE: Duration = Duration::from_secs(2);

/// Drives one profile through the connect flow. The DOM offers no stable
/// contract, so every locate step works through ordered selector fallbacks
/// and text filters; the goal is finding *a* working path, not asserting
/// one specific path.
///
/// Failure escalation is deliberately local: a dead end inside the invite
/// dialog abandons the current Connect candidate and tries the next one,
/// while an empty Connect search or a failed Send click abandons the whole
/// profile. Nothing escapes `connect` except its boolean.
pub struct ConnectionWorkflow<'a, D: UiDriver> {
    driver: &'a D,
    generator: &'a dyn NoteGenerator,
    selectors: &'a SelectorSet,
}

impl<'a, D: UiDriver> ConnectionWorkflow<'a, D> {
    pub fn new(
        driver: &'a D,
        generator: &'a dyn NoteGenerator,
        selectors: &'a SelectorSet,
    ) -> Self {
        Self {
            driver,
            generator,
            selectors,
        }
    }

    /// Attempt to connect with one profile, sending a personalized note.
    /// Never panics or propagates errors; the caller gets a bare outcome.
    pub async fn connect(&self, target_url: &str, profile: &Profile) -> bool {
        match self.try_connect(target_url, profile).await {
            Ok(sent) => sent,
            Err(e) => {
                tracing::warn!("Error connecting with {}: {}", profile.name, e);
                false
            }
        }
    }

    async fn try_connect(&self, target_url: &str, profile: &Profile) -> crate::Result<bool> {
        let executor = ActionExecutor::new(self.driver);

        tracing::info!("Navigating to profile: {}", target_url);
        self.driver.navigate(target_url).await?;
        sleep(PAGE_SETTLE).await;

        tracing::info!("Looking for Connect button...");
        let connect_candidates = executor.collect_candidates(&self.selectors.connect).await;
        if connect_candidates.is_empty() {
            tracing::info!("No Connect button found for {}", profile.name);
            return Ok(false);
        }
        tracing::info!("Found {} potential connect buttons", connect_candidates.len());

        for connect_button in &connect_candidates {
            if !executor
                .attempt_click(connect_button, "Connect")
                .await
                .succeeded()
            {
                continue;
            }
            sleep(DIALOG_SETTLE).await;

            if !self.open_note_dialog(&executor).await {
                tracing::info!("Could not open the note dialog, trying next Connect button");
                continue;
            }
            sleep(NOTE_SETTLE).await;

            tracing::info!("Generating connection note...");
            let note = self.generator.generate(profile).await;
            tracing::info!("Generated note ({} chars): {}", note.len(), note.text());

            if !self.fill_note_field(&executor, note.text()).await? {
                tracing::info!("Could not find note textarea, trying next Connect button");
                continue;
            }
            sleep(NOTE_SETTLE).await;

            tracing::info!("Attempting to click send button...");
            if executor
                .click_first_match(
                    &self.selectors.send,
                    |text| text.contains("send") || text.contains("done"),
                    "Send",
                )
                .await
            {
                sleep(NOTE_SETTLE).await;
                return Ok(true);
            }

            tracing::warn!("Failed to click send button");
            return Ok(false);
        }

        tracing::info!("Could not click any Connect button for {}", profile.name);
        Ok(false)
    }

    /// Find and click the "Add a note" affordance among the current dialog's
    /// candidates. False means this Connect candidate is a dead end.
    async fn open_note_dialog(&self, executor: &ActionExecutor<'a, D>) -> bool {
        tracing::info!("Looking for 'Add a note' button...");
        let candidates = executor
            .wait_for_any(&self.selectors.add_note, ELEMENT_WAIT)
            .await;

        for candidate in &candidates {
            let text = self
                .driver
                .visible_text(candidate)
                .await
                .unwrap_or_default()
                .to_lowercase();
            if !text.contains("note") && !text.contains("message") {
                continue;
            }
            if executor.attempt_click(candidate, "Add note").await.succeeded() {
                return true;
            }
        }
        false
    }

    /// Locate the note textarea through the ordered selector list and inject
    /// the note by script assignment. First working selector wins.
    async fn fill_note_field(
        &self,
        executor: &ActionExecutor<'a, D>,
        note: &str,
    ) -> crate::Result<bool> {
        for selector in &self.selectors.note_textarea {
            let Some(field) = executor.wait_for_interactable(selector, ELEMENT_WAIT).await
            else {
                tracing::debug!("No usable textarea under '{}'", selector);
                continue;
            };

            tracing::info!("Found textarea using selector: {}", selector);
            self.driver.scroll_into_view(&field).await?;
            self.driver.set_value(&field, note).await?;
            return Ok(true);
        }
        Ok(false)
    }
}
