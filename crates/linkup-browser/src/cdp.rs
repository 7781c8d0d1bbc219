use crate::driver::UiDriver;
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Masks the most obvious automation fingerprint. Installed on every new
/// document before any page script runs.
const STEALTH_INIT_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined })";

const IS_VISIBLE_FN: &str = "function() { \
     const style = window.getComputedStyle(this); \
     const rect = this.getBoundingClientRect(); \
     return style.display !== 'none' && style.visibility !== 'hidden' \
         && rect.width > 0 && rect.height > 0; \
 }";

const IS_ENABLED_FN: &str = "function() { return !this.disabled; }";

const CLICK_FN: &str = "function() { this.click(); }";

/// Chrome session driven over the DevTools Protocol. Owns the browser
/// process, its event handler task and one page.
pub struct CdpDriver {
    browser: Mutex<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
}

impl CdpDriver {
    /// Launch Chrome and prepare a page with the fingerprint-masking init
    /// script installed.
    pub async fn launch(headless: bool) -> Result<Self> {
        let mut config = BrowserConfig::builder()
            .arg("--disable-notifications")
            .arg("--start-maximized")
            .arg("--disable-blink-features=AutomationControlled");
        if !headless {
            config = config.with_head();
        }
        let config = config.build().map_err(Error::Browser)?;

        tracing::info!("Launching Chrome (headless: {})", headless);
        let (browser, mut handler) = Browser::launch(config).await?;

        // The handler task must run for every subsequent CDP command to work
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        // Give Chrome a moment to create its initial page
        tokio::time::sleep(Duration::from_millis(500)).await;

        let page = if let Some(page) = browser.pages().await?.first() {
            page.clone()
        } else {
            browser.new_page("about:blank").await?
        };

        page.execute(AddScriptToEvaluateOnNewDocumentParams::new(
            STEALTH_INIT_SCRIPT,
        ))
        .await?;

        tracing::info!("Chrome session ready");

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler_task,
        })
    }

    async fn eval_bool(&self, element: &Element, function: &str) -> Result<bool> {
        let ret = element.call_js_fn(function, false).await?;
        Ok(ret
            .result
            .value
            .as_ref()
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }
}

#[async_trait]
impl UiDriver for CdpDriver {
    type Element = Arc<Element>;

    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        tokio::time::timeout(NAVIGATION_TIMEOUT, async {
            self.page.goto(url).await?;
            self.page.wait_for_navigation().await?;
            Ok::<_, Error>(())
        })
        .await
        .map_err(|_| Error::Browser(format!("navigation to {} timed out", url)))??;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await?
            .ok_or_else(|| Error::Browser("page reports no URL".to_string()))
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>> {
        // A failed query and "no matches" are the same signal on this UI
        match self.page.find_elements(selector).await {
            Ok(elements) => Ok(elements.into_iter().map(Arc::new).collect()),
            Err(e) => {
                tracing::debug!("Selector query '{}' failed: {}", selector, e);
                Ok(Vec::new())
            }
        }
    }

    async fn visible_text(&self, element: &Self::Element) -> Result<String> {
        Ok(element.inner_text().await?.unwrap_or_default())
    }

    async fn is_visible(&self, element: &Self::Element) -> Result<bool> {
        self.eval_bool(element, IS_VISIBLE_FN).await
    }

    async fn is_enabled(&self, element: &Self::Element) -> Result<bool> {
        self.eval_bool(element, IS_ENABLED_FN).await
    }

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<()> {
        element.scroll_into_view().await?;
        Ok(())
    }

    async fn click(&self, element: &Self::Element) -> Result<()> {
        element.call_js_fn(CLICK_FN, false).await?;
        Ok(())
    }

    async fn set_value(&self, element: &Self::Element, value: &str) -> Result<()> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| Error::Browser(format!("failed to encode value: {}", e)))?;
        let function = format!(
            "function() {{ \
                this.value = {}; \
                this.dispatchEvent(new Event('input', {{ bubbles: true, cancelable: true }})); \
             }}",
            encoded
        );
        element.call_js_fn(function, false).await?;
        Ok(())
    }

    async fn type_text(&self, element: &Self::Element, text: &str) -> Result<()> {
        element.click().await?;
        element.type_str(text).await?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        tracing::info!("Closing Chrome session");
        let mut browser = self.browser.lock().await;
        browser.close().await?;
        let _ = browser.wait().await;
        self.handler_task.abort();
        Ok(())
    }
}
