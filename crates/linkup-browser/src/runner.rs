use crate::driver::UiDriver;
use crate::selectors::SelectorSet;
use crate::session::SessionManager;
use crate::workflow::ConnectionWorkflow;
use crate::{Error, Result};
use linkup_core::{Credentials, PacingPolicy, Profile};
use linkup_notegen::NoteGenerator;
use tokio::time::sleep;

/// One profile's result. Accumulated in input order, one entry per profile.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub name: String,
    pub url: String,
    pub success: bool,
}

/// Drives a whole run: one login, then every profile in order with a
/// randomized pause between them. Owns the driver and closes it on every
/// exit path.
pub struct BatchRunner<D: UiDriver, G: NoteGenerator> {
    driver: D,
    credentials: Credentials,
    generator: G,
    selectors: SelectorSet,
    pacing: PacingPolicy,
}

impl<D: UiDriver, G: NoteGenerator> BatchRunner<D, G> {
    pub fn new(
        driver: D,
        credentials: Credentials,
        generator: G,
        selectors: SelectorSet,
        pacing: PacingPolicy,
    ) -> Self {
        Self {
            driver,
            credentials,
            generator,
            selectors,
            pacing,
        }
    }

    /// Process every profile. A login failure aborts with [`Error::Login`]
    /// before any profile is touched; individual profile failures are
    /// recorded and the run continues.
    pub async fn run(self, profiles: &[Profile]) -> Result<Vec<RunOutcome>> {
        self.run_with_progress(profiles, |_| {}).await
    }

    /// Like [`Self::run`], with a callback invoked after each profile (the
    /// CLI feeds its progress bar with it).
    pub async fn run_with_progress<F>(
        self,
        profiles: &[Profile],
        on_outcome: F,
    ) -> Result<Vec<RunOutcome>>
    where
        F: FnMut(&RunOutcome),
    {
        let result = self.process_all(profiles, on_outcome).await;

        // Teardown happens on every exit path, including login failure
        if let Err(e) = self.driver.close().await {
            tracing::warn!("Driver teardown failed: {}", e);
        }

        result
    }

    async fn process_all<F>(&self, profiles: &[Profile], mut on_outcome: F) -> Result<Vec<RunOutcome>>
    where
        F: FnMut(&RunOutcome),
    {
        let session = SessionManager::new(&self.driver, &self.credentials);
        if !session.login().await {
            return Err(Error::Login("could not authenticate, aborting run".to_string()));
        }

        let workflow = ConnectionWorkflow::new(&self.driver, &self.generator, &self.selectors);
        let mut outcomes = Vec::with_capacity(profiles.len());

        for (idx, profile) in profiles.iter().enumerate() {
            tracing::info!("Processing profile: {}", profile.name);
            let success = workflow.connect(&profile.target_url(), profile).await;
            if success {
                tracing::info!("Successfully processed {}", profile.name);
            } else {
                tracing::warn!("Failed to process {}", profile.name);
            }

            let outcome = RunOutcome {
                name: profile.name.clone(),
                url: profile.url.clone(),
                success,
            };
            on_outcome(&outcome);
            outcomes.push(outcome);

            // Pace between profiles, never after the last one
            if idx + 1 < profiles.len() {
                let pause = self.pacing.sample();
                tracing::info!("Waiting {:.0?} before next profile...", pause);
                sleep(pause).await;
            }
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{FixedNoteGenerator, MockDriver, MockElement, profile};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::Instant;

    fn credentials() -> Credentials {
        Credentials {
            email: "jane@example.com".to_string(),
            password: "hunter2".to_string(),
        }
    }

    fn login_page(driver: &MockDriver, landing: &str) {
        driver.add_elements("input#username", vec![MockElement::new("username", "")]);
        driver.add_elements("input#password", vec![MockElement::new("password", "")]);
        driver.add_elements(
            "button[type='submit']",
            vec![MockElement::new("submit", "Sign in").navigates_to(landing)],
        );
    }

    fn runner(
        driver: Arc<MockDriver>,
        pacing: PacingPolicy,
    ) -> BatchRunner<Arc<MockDriver>, FixedNoteGenerator> {
        BatchRunner::new(
            driver,
            credentials(),
            FixedNoteGenerator("Hi, let's connect.".to_string()),
            SelectorSet::default(),
            pacing,
        )
    }

    fn zero_pacing() -> PacingPolicy {
        PacingPolicy::new(Duration::ZERO, Duration::ZERO).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_failure_aborts_run_and_closes_driver() {
        let driver = Arc::new(MockDriver::new());
        login_page(&driver, "https://www.linkedin.com/login?error=credentials");

        let profiles = vec![profile("Jane", "x.test/jane", None)];
        let runner = runner(driver.clone(), zero_pacing());
        let result = runner.run(&profiles).await;

        assert!(matches!(result, Err(Error::Login(_))));
        // No profile was navigated to, and teardown still happened
        assert_eq!(
            driver.current_url().await.unwrap(),
            "https://www.linkedin.com/login?error=credentials"
        );
        assert_eq!(driver.close_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_profile_list_yields_empty_outcomes_without_pause() {
        let driver = Arc::new(MockDriver::new());
        login_page(&driver, "https://www.linkedin.com/feed/");

        let start = Instant::now();
        let runner = runner(driver.clone(), PacingPolicy::default());
        let outcomes = runner.run(&[]).await.unwrap();

        assert!(outcomes.is_empty());
        // Only login settle elapsed; no 20-40s pacing pause was taken
        assert!(start.elapsed() < Duration::from_secs(20));
        assert_eq!(driver.close_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_outcomes_in_order_and_run_continues_past_failures() {
        let driver = Arc::new(MockDriver::new());
        login_page(&driver, "https://www.linkedin.com/feed/");
        // No connect buttons anywhere: every profile fails, none crashes

        let profiles = vec![
            profile("Jane", "x.test/jane", None),
            profile("John", "x.test/john", None),
            profile("Jo", "x.test/jo", None),
        ];
        let runner = runner(driver.clone(), zero_pacing());
        let outcomes = runner.run(&profiles).await.unwrap();

        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].name, "Jane");
        assert_eq!(outcomes[2].name, "Jo");
        assert!(outcomes.iter().all(|o| !o.success));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exactly_n_minus_one_pacing_pauses() {
        let driver = Arc::new(MockDriver::new());
        login_page(&driver, "https://www.linkedin.com/feed/");

        let profiles = vec![
            profile("Jane", "x.test/jane", None),
            profile("John", "x.test/john", None),
            profile("Jo", "x.test/jo", None),
        ];
        // Fixed 30s pause makes virtual elapsed time count the pauses:
        // each failed profile costs 5s page settle, so 3 profiles with two
        // 30s pauses land in [60s, 90s) total.
        let pacing = PacingPolicy::new(Duration::from_secs(30), Duration::from_secs(30)).unwrap();

        let start = Instant::now();
        let runner = runner(driver, pacing);
        let outcomes = runner.run(&profiles).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(outcomes.len(), 3);
        assert!(elapsed >= Duration::from_secs(60), "two pauses expected, got {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(90), "three pauses taken, got {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_callback_fires_per_profile() {
        let driver = Arc::new(MockDriver::new());
        login_page(&driver, "https://www.linkedin.com/feed/");

        let profiles = vec![
            profile("Jane", "x.test/jane", None),
            profile("John", "x.test/john", None),
        ];
        let mut seen = Vec::new();
        let runner = runner(driver, zero_pacing());
        runner
            .run_with_progress(&profiles, |outcome| seen.push(outcome.name.clone()))
            .await
            .unwrap();

        assert_eq!(seen, vec!["Jane".to_string(), "John".to_string()]);
    }
}
