// Shared test helpers
//
// FakeLocator is an in-memory ElementLocator: it records every engine call and
// answers queries from a scripted DOM keyed by selector. Selectors chain the
// same way Playwright's do (`parent >> child`, `... >> nth=0`).

// Note: Functions appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use playwright_harness::{BoundingBox, ElementLocator, EngineResult};
use playwright_rs::protocol::{KeyboardModifier, MouseButton, Position};
use playwright_rs::{ClickOptions, FillOptions, HoverOptions, PressOptions, SelectOption};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One call received by the fake engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Click {
        selector: String,
        button: Option<MouseButton>,
        position: Option<Position>,
        modifiers: Option<Vec<KeyboardModifier>>,
    },
    Hover {
        selector: String,
        position: Option<Position>,
        force: Option<bool>,
    },
    Fill {
        selector: String,
        value: String,
    },
    Clear {
        selector: String,
        force: Option<bool>,
    },
    Focus(String),
    Blur(String),
    Type {
        selector: String,
        text: String,
    },
    Press {
        selector: String,
        key: String,
    },
    SelectOptions {
        selector: String,
        options: Vec<SelectOption>,
    },
    DispatchEvent {
        selector: String,
        event_type: String,
        event_init: Option<Value>,
    },
    Evaluate {
        selector: String,
        expression: String,
        arg: Value,
    },
}

/// Scripted state of one element.
#[derive(Debug, Clone, Default)]
pub struct FakeNode {
    pub attributes: HashMap<String, String>,
    pub value: String,
    pub text: Option<String>,
    pub bounding_box: Option<BoundingBox>,
    pub css: HashMap<String, String>,
    pub properties: HashMap<String, Value>,
    /// Selectors this element matches
    pub matches: Vec<String>,
    pub selected: Vec<usize>,
}

#[derive(Debug, Default)]
struct FakeDom {
    nodes: Mutex<HashMap<String, FakeNode>>,
    counts: Mutex<HashMap<String, usize>>,
    detached: Mutex<HashSet<String>>,
    focused: Mutex<Option<String>>,
    calls: Mutex<Vec<Call>>,
}

/// In-memory locator sharing one fake DOM with every locator derived from it.
#[derive(Debug, Clone)]
pub struct FakeLocator {
    selector: String,
    dom: Arc<FakeDom>,
}

impl FakeLocator {
    /// A locator for `body` on an empty fake page.
    pub fn root() -> Self {
        Self {
            selector: "body".to_string(),
            dom: Arc::new(FakeDom::default()),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Edits the scripted node at this locator's selector.
    pub fn configure(&self, edit: impl FnOnce(&mut FakeNode)) -> &Self {
        edit(self.dom.nodes.lock().entry(self.selector.clone()).or_default());
        self
    }

    /// Snapshot of the scripted node at this locator's selector.
    pub fn node(&self) -> FakeNode {
        self.dom
            .nodes
            .lock()
            .get(&self.selector)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of elements this locator matches.
    pub fn set_count(&self, count: usize) -> &Self {
        self.dom.counts.lock().insert(self.selector.clone(), count);
        self
    }

    /// Makes every call on this selector fail as if the element were removed.
    pub fn detach(&self) -> &Self {
        self.dom.detached.lock().insert(self.selector.clone());
        self
    }

    /// Every call recorded on the shared DOM, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.dom.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.dom.calls.lock().clear();
    }

    fn derive(&self, selector: String) -> Self {
        Self {
            selector,
            dom: Arc::clone(&self.dom),
        }
    }

    fn record(&self, call: Call) {
        self.dom.calls.lock().push(call);
    }

    fn resolve(&self) -> EngineResult<()> {
        if self.dom.detached.lock().contains(&self.selector) {
            return Err(playwright_rs::Error::ElementNotFound(self.selector.clone()));
        }
        Ok(())
    }

    fn update(&self, edit: impl FnOnce(&mut FakeNode)) {
        self.configure(edit);
    }
}

#[async_trait]
impl ElementLocator for FakeLocator {
    fn locator(&self, selector: &str) -> Self {
        self.derive(format!("{} >> {}", self.selector, selector))
    }

    fn nth(&self, index: usize) -> Self {
        self.derive(format!("{} >> nth={}", self.selector, index))
    }

    async fn count(&self) -> EngineResult<usize> {
        Ok(self
            .dom
            .counts
            .lock()
            .get(&self.selector)
            .copied()
            .unwrap_or(0))
    }

    async fn click(&self, options: Option<ClickOptions>) -> EngineResult<()> {
        self.resolve()?;
        let options = options.unwrap_or_default();
        self.record(Call::Click {
            selector: self.selector.clone(),
            button: options.button,
            position: options.position,
            modifiers: options.modifiers,
        });
        Ok(())
    }

    async fn hover(&self, options: Option<HoverOptions>) -> EngineResult<()> {
        self.resolve()?;
        let options = options.unwrap_or_default();
        self.record(Call::Hover {
            selector: self.selector.clone(),
            position: options.position,
            force: options.force,
        });
        Ok(())
    }

    async fn fill(&self, value: &str, _options: Option<FillOptions>) -> EngineResult<()> {
        self.resolve()?;
        self.record(Call::Fill {
            selector: self.selector.clone(),
            value: value.to_string(),
        });
        self.update(|node| node.value = value.to_string());
        Ok(())
    }

    async fn clear(&self, options: Option<FillOptions>) -> EngineResult<()> {
        self.resolve()?;
        self.record(Call::Clear {
            selector: self.selector.clone(),
            force: options.and_then(|o| o.force),
        });
        self.update(|node| node.value.clear());
        Ok(())
    }

    async fn focus(&self) -> EngineResult<()> {
        self.resolve()?;
        self.record(Call::Focus(self.selector.clone()));
        *self.dom.focused.lock() = Some(self.selector.clone());
        Ok(())
    }

    async fn blur(&self) -> EngineResult<()> {
        self.resolve()?;
        self.record(Call::Blur(self.selector.clone()));
        let mut focused = self.dom.focused.lock();
        if focused.as_deref() == Some(self.selector.as_str()) {
            *focused = None;
        }
        Ok(())
    }

    async fn type_text(&self, text: &str) -> EngineResult<()> {
        self.resolve()?;
        self.record(Call::Type {
            selector: self.selector.clone(),
            text: text.to_string(),
        });
        self.update(|node| node.value.push_str(text));
        Ok(())
    }

    async fn press(&self, key: &str, _options: Option<PressOptions>) -> EngineResult<()> {
        self.resolve()?;
        self.record(Call::Press {
            selector: self.selector.clone(),
            key: key.to_string(),
        });
        Ok(())
    }

    async fn select_options(&self, options: Vec<SelectOption>) -> EngineResult<Vec<String>> {
        self.resolve()?;
        self.record(Call::SelectOptions {
            selector: self.selector.clone(),
            options: options.clone(),
        });
        let indexes: Vec<usize> = options
            .iter()
            .filter_map(|option| match option {
                SelectOption::Index(index) => Some(*index),
                _ => None,
            })
            .collect();
        self.update(|node| node.selected = indexes.clone());
        Ok(indexes.iter().map(|index| index.to_string()).collect())
    }

    async fn dispatch_event(
        &self,
        event_type: &str,
        event_init: Option<Value>,
    ) -> EngineResult<()> {
        self.resolve()?;
        self.record(Call::DispatchEvent {
            selector: self.selector.clone(),
            event_type: event_type.to_string(),
            event_init,
        });
        Ok(())
    }

    async fn get_attribute(&self, name: &str) -> EngineResult<Option<String>> {
        self.resolve()?;
        Ok(self.node().attributes.get(name).cloned())
    }

    async fn bounding_box(&self) -> EngineResult<Option<BoundingBox>> {
        self.resolve()?;
        Ok(self.node().bounding_box)
    }

    async fn input_value(&self) -> EngineResult<String> {
        self.resolve()?;
        Ok(self.node().value)
    }

    async fn text_content(&self) -> EngineResult<Option<String>> {
        self.resolve()?;
        Ok(self.node().text)
    }

    async fn evaluate(&self, expression: &str, arg: Value) -> EngineResult<Value> {
        self.resolve()?;
        self.record(Call::Evaluate {
            selector: self.selector.clone(),
            expression: expression.to_string(),
            arg: arg.clone(),
        });

        let node = self.node();
        let key = arg.as_str().unwrap_or_default();
        let result = if expression.contains("document.activeElement") {
            let focused = self.dom.focused.lock();
            Value::Bool(focused.as_deref() == Some(self.selector.as_str()))
        } else if expression.contains("getComputedStyle") {
            Value::String(node.css.get(key).cloned().unwrap_or_default())
        } else if expression.contains(".matches(") {
            Value::Bool(node.matches.iter().any(|selector| selector == key))
        } else if expression.contains("element[name]") {
            node.properties.get(key).cloned().unwrap_or(Value::Null)
        } else {
            return Err(playwright_rs::Error::ProtocolError(format!(
                "FakeLocator cannot evaluate: {expression}"
            )));
        };
        Ok(result)
    }
}
