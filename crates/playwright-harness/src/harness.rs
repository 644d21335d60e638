// Harness protocol - Element and environment contracts for component harnesses
//
// A harness environment locates elements and hands out `TestElement`s; harnesses
// only ever talk to those two abstractions, so the same harness runs against
// any host that implements them.

use crate::error::{Error, Result};
use crate::keys::{KeyToken, ModifierKeys};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::any::Any;
use std::fmt::Debug;

/// Payload attached to a dispatched event, keyed by event property.
pub type EventData = Map<String, Value>;

/// Position and size of an element in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementDimensions {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Options that affect which text `TestElement::text` includes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Selector for descendants whose text should be left out.
    ///
    /// Accepted for compatibility with harnesses that pass it; the Playwright
    /// environment currently ignores it and returns the full text content.
    pub exclude: Option<String>,
}

/// An element a harness can read and interact with.
#[async_trait]
pub trait TestElement: Debug + Send + Sync {
    /// Blurs the element.
    async fn blur(&self) -> Result<()>;

    /// Clears the value of an input or textarea.
    async fn clear(&self) -> Result<()>;

    /// Clicks the element with the primary button.
    ///
    /// With `position: None` the engine picks its default point (the centre).
    /// An explicit position is relative to the element's top-left corner.
    async fn click(&self, position: Option<(f64, f64)>, modifiers: ModifierKeys) -> Result<()>;

    /// Clicks the element with the secondary button.
    async fn right_click(
        &self,
        position: Option<(f64, f64)>,
        modifiers: ModifierKeys,
    ) -> Result<()>;

    /// Focuses the element.
    async fn focus(&self) -> Result<()>;

    /// Computed value of a CSS property.
    async fn get_css_value(&self, property: &str) -> Result<String>;

    /// Moves the pointer over the element's centre.
    async fn hover(&self) -> Result<()>;

    /// Moves the pointer to a point outside the element.
    async fn mouse_away(&self) -> Result<()>;

    /// Sends a sequence of text and keys with no modifiers held.
    async fn send_keys(&self, keys: &[KeyToken]) -> Result<()> {
        self.send_keys_with_modifiers(ModifierKeys::NONE, keys)
            .await
    }

    /// Sends a sequence of text and keys with `modifiers` held.
    async fn send_keys_with_modifiers(
        &self,
        modifiers: ModifierKeys,
        keys: &[KeyToken],
    ) -> Result<()>;

    /// Rendered text content of the element.
    async fn text(&self, options: Option<TextOptions>) -> Result<String>;

    /// Sets the value of a contenteditable element.
    async fn set_contenteditable_value(&self, value: &str) -> Result<()>;

    /// Attribute value, or `None` when the attribute is absent.
    async fn get_attribute(&self, name: &str) -> Result<Option<String>>;

    /// Whether `name` is one of the element's classes.
    async fn has_class(&self, name: &str) -> Result<bool>;

    /// Bounding geometry; all zeros when the element is not rendered.
    async fn get_dimensions(&self) -> Result<ElementDimensions>;

    /// JSON value of a JavaScript property of the element.
    async fn get_property(&self, name: &str) -> Result<Value>;

    /// Whether the element matches a CSS selector.
    async fn matches_selector(&self, selector: &str) -> Result<bool>;

    /// Whether the element is the document's active element.
    async fn is_focused(&self) -> Result<bool>;

    /// Replaces the value of a form control without simulating keystrokes.
    async fn set_input_value(&self, value: &str) -> Result<()>;

    /// Selects the options at the given indexes of a native `<select>`.
    async fn select_options(&self, option_indexes: &[usize]) -> Result<()>;

    /// Dispatches a DOM event named `name`.
    async fn dispatch_event(&self, name: &str, data: Option<EventData>) -> Result<()>;

    /// Upcast used by environments to recognise their own elements.
    fn as_any(&self) -> &dyn Any;
}

/// Host that finds elements for harnesses.
///
/// `Raw` is the host's element handle. Implementors supply the hooks; the
/// loader operations at the bottom are built on top of them.
#[async_trait]
pub trait HarnessEnvironment: Send + Sync + Sized {
    type Raw: Clone + Send + Sync;
    type Element: TestElement + 'static;

    /// Handle this environment searches under.
    fn root_scope(&self) -> &Self::Raw;

    /// Handle for the document root, shared by every scoped environment.
    fn document_root(&self) -> Self::Raw;

    /// Boxes a raw handle into a test element.
    fn wrap(&self, raw: Self::Raw) -> Self::Element;

    /// Creates an environment rooted at `raw`.
    fn scope_to(&self, raw: Self::Raw) -> Self;

    /// All raw handles under the root scope matching `selector`.
    async fn find_all_raw(&self, selector: &str) -> Result<Vec<Self::Raw>>;

    /// Flushes change detection in the host.
    async fn force_stabilize(&self) -> Result<()>;

    /// Waits for async work scheduled outside the change-detection zone.
    async fn wait_for_tasks_outside_zone(&self) -> Result<()>;

    /// Test elements for every match of `selector` under the root scope.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>> {
        let raws = self.find_all_raw(selector).await?;
        Ok(raws.into_iter().map(|raw| self.wrap(raw)).collect())
    }

    /// The root scope as a test element.
    fn root_element(&self) -> Self::Element {
        self.wrap(self.root_scope().clone())
    }

    /// Environment rooted at the document root.
    fn document_root_loader(&self) -> Self {
        self.scope_to(self.document_root())
    }

    /// Environment rooted at the first match of `selector`.
    async fn child_loader(&self, selector: &str) -> Result<Self> {
        let raw = self
            .find_all_raw(selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::ElementNotFound(selector.to_string()))?;
        Ok(self.scope_to(raw))
    }

    /// One environment per match of `selector`.
    async fn all_child_loaders(&self, selector: &str) -> Result<Vec<Self>> {
        let raws = self.find_all_raw(selector).await?;
        Ok(raws.into_iter().map(|raw| self.scope_to(raw)).collect())
    }
}
