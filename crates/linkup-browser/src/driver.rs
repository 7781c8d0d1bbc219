use crate::Result;
use async_trait::async_trait;

/// Capability surface the workflow needs from a browser. The workflow never
/// assumes a specific browser; [`crate::CdpDriver`] is the Chrome-backed
/// implementation and tests script their own.
#[async_trait]
pub trait UiDriver: Send + Sync {
    type Element: Send + Sync;

    async fn navigate(&self, url: &str) -> Result<()>;

    async fn current_url(&self) -> Result<String>;

    /// All elements matching a CSS selector, in document order. An empty
    /// list means "not there right now", never an error.
    async fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>>;

    async fn visible_text(&self, element: &Self::Element) -> Result<String>;

    async fn is_visible(&self, element: &Self::Element) -> Result<bool>;

    async fn is_enabled(&self, element: &Self::Element) -> Result<bool>;

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<()>;

    /// Script-level click dispatch, bypassing native event simulation so
    /// overlays cannot intercept it.
    async fn click(&self, element: &Self::Element) -> Result<()>;

    /// Assign a value by script and fire a bubbling `input` event so the
    /// page's own change detection notices.
    async fn set_value(&self, element: &Self::Element, value: &str) -> Result<()>;

    /// Keystroke-style input, for fields that reject scripted assignment
    /// (the login form).
    async fn type_text(&self, element: &Self::Element, text: &str) -> Result<()>;

    /// Tear the browsing session down. Safe to call exactly once.
    async fn close(&self) -> Result<()>;
}

/// Shared-handle passthrough, so an owner and an observer (tests, progress
/// reporting) can hold the same driver.
#[async_trait]
impl<T: UiDriver> UiDriver for std::sync::Arc<T> {
    type Element = T::Element;

    async fn navigate(&self, url: &str) -> Result<()> {
        (**self).navigate(url).await
    }

    async fn current_url(&self) -> Result<String> {
        (**self).current_url().await
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>> {
        (**self).find_elements(selector).await
    }

    async fn visible_text(&self, element: &Self::Element) -> Result<String> {
        (**self).visible_text(element).await
    }

    async fn is_visible(&self, element: &Self::Element) -> Result<bool> {
        (**self).is_visible(element).await
    }

    async fn is_enabled(&self, element: &Self::Element) -> Result<bool> {
        (**self).is_enabled(element).await
    }

    async fn scroll_into_view(&self, element: &Self::Element) -> Result<()> {
        (**self).scroll_into_view(element).await
    }

    async fn click(&self, element: &Self::Element) -> Result<()> {
        (**self).click(element).await
    }

    async fn set_value(&self, element: &Self::Element, value: &str) -> Result<()> {
        (**self).set_value(element, value).await
    }

    async fn type_text(&self, element: &Self::Element, text: &str) -> Result<()> {
        (**self).type_text(element, text).await
    }

    async fn close(&self) -> Result<()> {
        (**self).close().await
    }
}
