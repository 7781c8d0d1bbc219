//! Scripted driver for exercising the workflow without a live browser.

use crate::Result;
use crate::driver::UiDriver;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One scripted DOM element. Side effects (revealing more elements, moving
/// the page URL) fire when it is successfully clicked, mimicking dialogs
/// opening and navigations completing.
#[derive(Debug, Clone)]
pub struct MockElement {
    pub label: String,
    pub text: String,
    pub visible: bool,
    pub enabled: bool,
    pub fail_clicks: bool,
    pub reveal_on_click: Vec<(String, Vec<MockElement>)>,
    pub url_on_click: Option<String>,
}

impl MockElement {
    pub fn new(label: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            text: text.to_string(),
            visible: true,
            enabled: true,
            fail_clicks: false,
            reveal_on_click: Vec::new(),
            url_on_click: None,
        }
    }

    pub fn invisible(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Every click on this element raises a driver error.
    pub fn failing(mut self) -> Self {
        self.fail_clicks = true;
        self
    }

    /// Clicking this element makes `elements` appear under `selector`.
    pub fn reveals(mut self, selector: &str, elements: Vec<MockElement>) -> Self {
        self.reveal_on_click.push((selector.to_string(), elements));
        self
    }

    /// Clicking this element moves the page to `url` (login submit).
    pub fn navigates_to(mut self, url: &str) -> Self {
        self.url_on_click = Some(url.to_string());
        self
    }
}

#[derive(Default)]
pub struct MockDriver {
    elements: Mutex<HashMap<String, Vec<MockElement>>>,
    url: Mutex<String>,
    clicks: Mutex<Vec<String>>,
    click_attempts: AtomicUsize,
    values: Mutex<Vec<(String, String)>>,
    typed: Mutex<Vec<(String, String)>>,
    close_calls: AtomicUsize,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_elements(&self, selector: &str, elements: Vec<MockElement>) {
        self.elements
            .lock()
            .unwrap()
            .entry(selector.to_string())
            .or_default()
            .extend(elements);
    }

    /// Labels of elements successfully clicked, in order.
    pub fn clicks(&self) -> Vec<String> {
        self.clicks.lock().unwrap().clone()
    }

    /// Total click invocations, including failed ones.
    pub fn click_attempts(&self) -> usize {
        self.click_attempts.load(Ordering::SeqCst)
    }

    /// (element label, value) pairs injected via set_value.
    pub fn values(&self) -> Vec<(String, String)> {
        self.values.lock().unwrap().clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.typed.lock().unwrap().clone()
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UiDriver for MockDriver {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        *self.url.lock().unwrap() = url.to_string();
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.url.lock().unwrap().clone())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>> {
        Ok(self
            .elements
            .lock()
            .unwrap()
            .get(selector)
            .cloned()
            .unwrap_or_default())
    }

    async fn visible_text(&self, element: &Self::Element) -> Result<String> {
        Ok(element.text.clone())
    }

    async fn is_visible(&self, element: &Self::Element) -> Result<bool> {
        Ok(element.visible)
    }

    async fn is_enabled(&self, element: &Self::Element) -> Result<bool> {
        Ok(element.enabled)
    }

    async fn scroll_into_view(&self, _element: &Self::Element) -> Result<()> {
        Ok(())
    }

    async fn click(&self, element: &Self::Element) -> Result<()> {
        self.click_attempts.fetch_add(1, Ordering::SeqCst);
        if element.fail_clicks {
            return Err(crate::Error::Browser(format!(
                "scripted click failure on {}",
                element.label
            )));
        }
        self.clicks.lock().unwrap().push(element.label.clone());
        for (selector, revealed) in &element.reveal_on_click {
            self.add_elements(selector, revealed.clone());
        }
        if let Some(url) = &element.url_on_click {
            *self.url.lock().unwrap() = url.clone();
        }
        Ok(())
    }

    async fn set_value(&self, element: &Self::Element, value: &str) -> Result<()> {
        self.values
            .lock()
            .unwrap()
            .push((element.label.clone(), value.to_string()));
        Ok(())
    }

    async fn type_text(&self, element: &Self::Element, text: &str) -> Result<()> {
        self.typed
            .lock()
            .unwrap()
            .push((element.label.clone(), text.to_string()));
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A generator stub returning a fixed note.
pub struct FixedNoteGenerator(pub String);

#[async_trait]
impl linkup_notegen::NoteGenerator for FixedNoteGenerator {
    async fn generate(&self, _profile: &linkup_core::Profile) -> linkup_core::ConnectionNote {
        linkup_core::ConnectionNote::new(&self.0)
    }
}

pub fn profile(name: &str, url: &str, position: Option<&str>) -> linkup_core::Profile {
    linkup_core::Profile {
        name: name.to_string(),
        url: url.to_string(),
        current_position: position.map(String::from),
        extra: HashMap::new(),
    }
}
