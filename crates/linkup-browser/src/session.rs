use crate::actions::{ActionExecutor, ELEMENT_WAIT};
use crate::driver::UiDriver;
use linkup_core::Credentials;
use std::time::Duration;
use tokio::time::sleep;

const LOGIN_URL: &str = "https://www.linkedin.com/login";
const USERNAME_SELECTOR: &str = "input#username";
const PASSWORD_SELECTOR: &str = "input#password";
const SUBMIT_SELECTOR: &str = "button[type='submit']";

/// URL fragments that indicate we landed on an authenticated surface.
const AUTHENTICATED_FRAGMENTS: &[&str] = &["/feed", "/mynetwork"];

/// Time for the post-submit redirect chain to settle.
const LOGIN_SETTLE: Duration = Duration::from_secs(5);

/// Authenticates the browsing session. One login per run; there is no
/// re-login mid-batch.
pub struct SessionManager<'a, D: UiDriver> {
    driver: &'a D,
    credentials: &'a Credentials,
}

impl<'a, D: UiDriver> SessionManager<'a, D> {
    pub fn new(driver: &'a D, credentials: &'a Credentials) -> Self {
        Self { driver, credentials }
    }

    /// Log in and report success. Success is judged solely from the URL we
    /// end up on; any error along the way is a failed login, not a crash.
    pub async fn login(&self) -> bool {
        match self.try_login().await {
            Ok(authenticated) => authenticated,
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                false
            }
        }
    }

    async fn try_login(&self) -> crate::Result<bool> {
        tracing::info!("Logging into LinkedIn...");
        self.driver.navigate(LOGIN_URL).await?;

        let executor = ActionExecutor::new(self.driver);

        let username_field = executor
            .wait_for_interactable(USERNAME_SELECTOR, ELEMENT_WAIT)
            .await
            .ok_or_else(|| crate::Error::Login("username field never appeared".to_string()))?;
        self.driver
            .type_text(&username_field, &self.credentials.email)
            .await?;

        let password_field = executor
            .wait_for_interactable(PASSWORD_SELECTOR, ELEMENT_WAIT)
            .await
            .ok_or_else(|| crate::Error::Login("password field never appeared".to_string()))?;
        self.driver
            .type_text(&password_field, &self.credentials.password)
            .await?;

        let submit = executor
            .wait_for_interactable(SUBMIT_SELECTOR, ELEMENT_WAIT)
            .await
            .ok_or_else(|| crate::Error::Login("submit button never appeared".to_string()))?;
        if !executor.attempt_click(&submit, "Login").await.succeeded() {
            return Err(crate::Error::Login("submit click failed".to_string()));
        }

        sleep(LOGIN_SETTLE).await;

        let url = self.driver.current_url().await?;
        let authenticated = AUTHENTICATED_FRAGMENTS.iter().any(|f| url.contains(f));
        if authenticated {
            tracing::info!("Successfully logged in");
        } else {
            tracing::warn!("Login may have failed, landed on: {}", url);
        }
        Ok(authenticated)
    }
}
