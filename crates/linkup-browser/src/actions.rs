use crate::driver::UiDriver;
use std::time::Duration;
use tokio::time::{Instant, sleep};

const MAX_CLICK_ATTEMPTS: u32 = 3;
const CLICK_BACKOFF: Duration = Duration::from_secs(2);
const SCROLL_SETTLE: Duration = Duration::from_secs(1);
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Default bound for presence/clickability waits.
pub const ELEMENT_WAIT: Duration = Duration::from_secs(10);

/// Outcome of one attempted UI step. Drives the workflow's fallback loops;
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionResult {
    Clicked,
    /// The element was not visible/enabled when checked. The caller decides
    /// whether to look again.
    NotFound,
    RetriesExhausted,
}

impl ActionResult {
    pub fn succeeded(&self) -> bool {
        matches!(self, ActionResult::Clicked)
    }
}

/// The one primitive every workflow step goes through: resolve candidates
/// from an ordered selector list, filter by visible text, click with
/// bounded retries.
pub struct ActionExecutor<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> ActionExecutor<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    /// Scroll an element into view and click it via scripted dispatch.
    /// Visibility is checked once up front and fails fast; exceptions are
    /// retried up to 3 attempts with a fixed backoff.
    pub async fn attempt_click(&self, element: &D::Element, action_name: &str) -> ActionResult {
        for attempt in 1..=MAX_CLICK_ATTEMPTS {
            match self.try_click(element).await {
                Ok(true) => {
                    tracing::info!("Clicked {} button", action_name);
                    return ActionResult::Clicked;
                }
                Ok(false) => {
                    tracing::debug!("{} button not visible/enabled, skipping", action_name);
                    return ActionResult::NotFound;
                }
                Err(e) => {
                    tracing::debug!(
                        "Attempt {}/{} to click {} failed: {}",
                        attempt,
                        MAX_CLICK_ATTEMPTS,
                        action_name,
                        e
                    );
                    if attempt < MAX_CLICK_ATTEMPTS {
                        sleep(CLICK_BACKOFF).await;
                    }
                }
            }
        }
        tracing::warn!("Exhausted click attempts for {} button", action_name);
        ActionResult::RetriesExhausted
    }

    async fn try_click(&self, element: &D::Element) -> crate::Result<bool> {
        if !self.driver.is_visible(element).await? || !self.driver.is_enabled(element).await? {
            return Ok(false);
        }
        self.driver.scroll_into_view(element).await?;
        sleep(SCROLL_SETTLE).await;
        self.driver.click(element).await?;
        Ok(true)
    }

    /// All candidates across an ordered selector list, most specific first.
    pub async fn collect_candidates(&self, selectors: &[String]) -> Vec<D::Element> {
        let mut candidates = Vec::new();
        for selector in selectors {
            match self.driver.find_elements(selector).await {
                Ok(elements) => candidates.extend(elements),
                Err(e) => tracing::debug!("Selector '{}' failed: {}", selector, e),
            }
        }
        candidates
    }

    /// First element across the selector list whose visible text satisfies
    /// the predicate.
    pub async fn find_first_match<F>(&self, selectors: &[String], predicate: F) -> Option<D::Element>
    where
        F: Fn(&str) -> bool,
    {
        for selector in selectors {
            let elements = self.driver.find_elements(selector).await.unwrap_or_default();
            for element in elements {
                let text = self
                    .driver
                    .visible_text(&element)
                    .await
                    .unwrap_or_default()
                    .to_lowercase();
                if predicate(&text) {
                    tracing::debug!("Matched element via selector '{}'", selector);
                    return Some(element);
                }
            }
        }
        None
    }

    /// Prioritized search-and-click: for each selector in order, click the
    /// first text-matching candidate that accepts the click.
    pub async fn click_first_match<F>(
        &self,
        selectors: &[String],
        predicate: F,
        action_name: &str,
    ) -> bool
    where
        F: Fn(&str) -> bool,
    {
        for selector in selectors {
            let elements = self.driver.find_elements(selector).await.unwrap_or_default();
            for element in elements {
                let text = self
                    .driver
                    .visible_text(&element)
                    .await
                    .unwrap_or_default()
                    .to_lowercase();
                if !predicate(&text) {
                    continue;
                }
                if self.attempt_click(&element, action_name).await.succeeded() {
                    return true;
                }
            }
        }
        false
    }

    /// Bounded wait for any element matching any of the selectors. Returns
    /// whatever is present when the first non-empty poll lands, or an empty
    /// list at the deadline.
    pub async fn wait_for_any(&self, selectors: &[String], timeout: Duration) -> Vec<D::Element> {
        let deadline = Instant::now() + timeout;
        loop {
            let candidates = self.collect_candidates(selectors).await;
            if !candidates.is_empty() {
                return candidates;
            }
            if Instant::now() >= deadline {
                return Vec::new();
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Bounded wait for one selector to yield a visible, enabled element.
    pub async fn wait_for_interactable(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Option<D::Element> {
        let deadline = Instant::now() + timeout;
        loop {
            let elements = self.driver.find_elements(selector).await.unwrap_or_default();
            for element in elements {
                let visible = self.driver.is_visible(&element).await.unwrap_or(false);
                let enabled = self.driver.is_enabled(&element).await.unwrap_or(false);
                if visible && enabled {
                    return Some(element);
                }
            }
            if Instant::now() >= deadline {
                return None;
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}
