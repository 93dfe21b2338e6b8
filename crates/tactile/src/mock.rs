//! Mock session for unit testing
//!
//! `MockSession` keeps a tiny scripted DOM (elements by locator, properties,
//! texts, rects, script results) and records every command. Perform hooks
//! let a test emulate what a page would do in response to a sequence, e.g.
//! set `value` to `"Clicked"` once a click lands.

use crate::actions::ActionsPayload;
use crate::geometry::Rect;
use crate::result::{InteractionError, InteractionResult};
use crate::session::{By, Session, WebElement};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

type PerformHook = Box<dyn Fn(&ActionsPayload, &mut MockDom) + Send + Sync>;

/// Scripted page state behind a [`MockSession`]
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<By, Vec<WebElement>>,
    children: HashMap<(String, By), Vec<WebElement>>,
    properties: HashMap<(String, String), Value>,
    texts: HashMap<String, String>,
    rects: HashMap<String, Rect>,
    scripts: Vec<(String, Value)>,
    pending_misses: HashMap<By, usize>,
    current_url: Option<String>,
}

impl MockDom {
    /// Register an element reachable through `by`
    pub fn add_element(&mut self, by: By, id: &str) -> WebElement {
        let element = WebElement::new(id);
        self.elements.entry(by).or_default().push(element.clone());
        element
    }

    /// Register a descendant of `parent` reachable through `by`
    pub fn add_child(&mut self, parent: &str, by: By, id: &str) -> WebElement {
        let element = WebElement::new(id);
        self.children
            .entry((parent.to_string(), by))
            .or_default()
            .push(element.clone());
        element
    }

    /// Set a DOM property
    pub fn set_property(&mut self, id: &str, name: &str, value: impl Into<Value>) {
        self.properties
            .insert((id.to_string(), name.to_string()), value.into());
    }

    /// Set rendered text
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        self.texts.insert(id.to_string(), text.into());
    }

    /// Set bounding rectangle
    pub fn set_rect(&mut self, id: &str, rect: Rect) {
        self.rects.insert(id.to_string(), rect);
    }

    /// Answer scripts containing `fragment` with `value`
    pub fn set_script_result(&mut self, fragment: &str, value: Value) {
        self.scripts.retain(|(f, _)| f != fragment);
        self.scripts.push((fragment.to_string(), value));
    }

    /// Make the next `misses` lookups of `by` fail with "no such element"
    pub fn hide_for(&mut self, by: By, misses: usize) {
        self.pending_misses.insert(by, misses);
    }

    /// Current DOM property of an element
    #[must_use]
    pub fn property(&self, id: &str, name: &str) -> Option<&Value> {
        self.properties.get(&(id.to_string(), name.to_string()))
    }

    /// Current rendered text of an element
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    /// Last navigated URL
    #[must_use]
    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    fn lookup(&mut self, by: &By) -> InteractionResult<Vec<WebElement>> {
        if let Some(misses) = self.pending_misses.get_mut(by) {
            if *misses > 0 {
                *misses -= 1;
                return Ok(Vec::new());
            }
        }
        Ok(self.elements.get(by).cloned().unwrap_or_default())
    }
}

/// Mock session for unit testing
pub struct MockSession {
    browser_name: String,
    simulate_time: bool,
    dom: Mutex<MockDom>,
    hooks: Mutex<Vec<PerformHook>>,
    performed: Mutex<Vec<ActionsPayload>>,
    history: Mutex<Vec<String>>,
}

impl std::fmt::Debug for MockSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSession")
            .field("browser_name", &self.browser_name)
            .field("simulate_time", &self.simulate_time)
            .field("dom", &self.dom)
            .finish_non_exhaustive()
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockSession {
    /// Create new mock session reporting itself as "mock"
    #[must_use]
    pub fn new() -> Self {
        Self::named("mock")
    }

    /// Create new mock session with a browser name
    #[must_use]
    pub fn named(browser_name: impl Into<String>) -> Self {
        Self {
            browser_name: browser_name.into(),
            simulate_time: false,
            dom: Mutex::new(MockDom::default()),
            hooks: Mutex::new(Vec::new()),
            performed: Mutex::new(Vec::new()),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Sleep for the payload's pause and move durations when performing
    #[must_use]
    pub const fn with_simulated_time(mut self, enabled: bool) -> Self {
        self.simulate_time = enabled;
        self
    }

    /// Mutate the scripted DOM
    pub fn with_dom<R>(&self, f: impl FnOnce(&mut MockDom) -> R) -> R {
        f(&mut lock(&self.dom))
    }

    /// Register an element reachable through `by`
    pub fn add_element(&self, by: By, id: &str) -> WebElement {
        self.with_dom(|dom| dom.add_element(by, id))
    }

    /// Set a DOM property
    pub fn set_property(&self, id: &str, name: &str, value: impl Into<Value>) {
        self.with_dom(|dom| dom.set_property(id, name, value));
    }

    /// Set rendered text
    pub fn set_text(&self, id: &str, text: impl Into<String>) {
        self.with_dom(|dom| dom.set_text(id, text));
    }

    /// Answer scripts containing `fragment` with `value`
    pub fn set_script_result(&self, fragment: &str, value: Value) {
        self.with_dom(|dom| dom.set_script_result(fragment, value));
    }

    /// Run `hook` after every performed sequence
    pub fn on_perform<F>(&self, hook: F)
    where
        F: Fn(&ActionsPayload, &mut MockDom) + Send + Sync + 'static,
    {
        lock(&self.hooks).push(Box::new(hook));
    }

    /// Every payload performed so far
    #[must_use]
    pub fn performed(&self) -> Vec<ActionsPayload> {
        lock(&self.performed).clone()
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        lock(&self.history).clone()
    }

    /// Check if a command was called
    #[must_use]
    pub fn was_called(&self, command: &str) -> bool {
        lock(&self.history).iter().any(|c| c.starts_with(command))
    }

    fn record(&self, entry: String) {
        lock(&self.history).push(entry);
    }
}

#[async_trait]
impl Session for MockSession {
    fn browser_name(&self) -> &str {
        &self.browser_name
    }

    async fn navigate(&self, url: &str) -> InteractionResult<()> {
        self.record(format!("navigate:{url}"));
        self.with_dom(|dom| dom.current_url = Some(url.to_string()));
        Ok(())
    }

    async fn find_element(&self, by: &By) -> InteractionResult<WebElement> {
        self.record(format!("find_element:{by}"));
        self.with_dom(|dom| dom.lookup(by))?
            .into_iter()
            .next()
            .ok_or_else(|| InteractionError::ElementNotFound {
                message: format!("Unable to locate element: {by}"),
            })
    }

    async fn find_elements(&self, by: &By) -> InteractionResult<Vec<WebElement>> {
        self.record(format!("find_elements:{by}"));
        self.with_dom(|dom| dom.lookup(by))
    }

    async fn find_child_element(
        &self,
        parent: &WebElement,
        by: &By,
    ) -> InteractionResult<WebElement> {
        self.find_child_elements(parent, by)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| InteractionError::ElementNotFound {
                message: format!("Unable to locate element: {by} under {}", parent.id),
            })
    }

    async fn find_child_elements(
        &self,
        parent: &WebElement,
        by: &By,
    ) -> InteractionResult<Vec<WebElement>> {
        self.record(format!("find_child_elements:{}:{by}", parent.id));
        Ok(self.with_dom(|dom| {
            dom.children
                .get(&(parent.id.clone(), by.clone()))
                .cloned()
                .unwrap_or_default()
        }))
    }

    async fn element_click(&self, element: &WebElement) -> InteractionResult<()> {
        self.record(format!("element_click:{}", element.id));
        Ok(())
    }

    async fn element_text(&self, element: &WebElement) -> InteractionResult<String> {
        self.record(format!("element_text:{}", element.id));
        Ok(self.with_dom(|dom| dom.texts.get(&element.id).cloned().unwrap_or_default()))
    }

    async fn element_property(
        &self,
        element: &WebElement,
        name: &str,
    ) -> InteractionResult<Value> {
        self.record(format!("element_property:{}:{name}", element.id));
        Ok(self.with_dom(|dom| {
            dom.properties
                .get(&(element.id.clone(), name.to_string()))
                .cloned()
                .unwrap_or(Value::Null)
        }))
    }

    async fn element_rect(&self, element: &WebElement) -> InteractionResult<Rect> {
        self.record(format!("element_rect:{}", element.id));
        self.with_dom(|dom| dom.rects.get(&element.id).copied())
            .ok_or_else(|| InteractionError::WebDriver {
                error: "stale element reference".to_string(),
                message: format!("no rect scripted for {}", element.id),
            })
    }

    async fn execute_script(&self, script: &str, _args: Vec<Value>) -> InteractionResult<Value> {
        self.record("execute_script".to_string());
        Ok(self.with_dom(|dom| {
            dom.scripts
                .iter()
                .find(|(fragment, _)| script.contains(fragment.as_str()))
                .map_or(Value::Null, |(_, value)| value.clone())
        }))
    }

    async fn perform_actions(&self, payload: &ActionsPayload) -> InteractionResult<()> {
        self.record(format!("perform_actions:{}", payload.actions.len()));
        lock(&self.performed).push(payload.clone());
        {
            let hooks = lock(&self.hooks);
            let mut dom = lock(&self.dom);
            for hook in hooks.iter() {
                hook(payload, &mut dom);
            }
        }
        if self.simulate_time {
            tokio::time::sleep(payload.total_duration()).await;
        }
        Ok(())
    }

    async fn release_actions(&self) -> InteractionResult<()> {
        self.record("release_actions".to_string());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
