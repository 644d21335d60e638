// ElementLocator - The locator capability the harness adapter consumes
//
// Harness elements never hold a captured DOM node. They hold a locator that
// Playwright re-resolves on every action, so a detached element surfaces as
// an engine error at the time of use rather than as stale state.
//
// Architecture:
// - `ElementLocator` is the subset of Playwright's Locator API the adapter needs
// - `PageLocator` implements it against a live page
// - Tests implement it with an in-memory fake
//
// See: https://playwright.dev/docs/api/class-locator

use async_trait::async_trait;
use playwright_rs::{ClickOptions, FillOptions, HoverOptions, PressOptions, SelectOption};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

/// Result type for engine calls; failures are Playwright's own errors.
pub type EngineResult<T> = std::result::Result<T, playwright_rs::Error>;

/// Bounding box of an element in viewport coordinates.
///
/// See: <https://playwright.dev/docs/api/class-locator#locator-bounding-box>
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Lazily resolved element reference offered by the automation engine.
///
/// Every method is a single request to the engine. Implementations must not
/// retry; timeouts and detached elements are reported as errors.
#[async_trait]
pub trait ElementLocator: Clone + Debug + Send + Sync + 'static {
    /// Creates a locator for `selector` scoped under this locator's subtree.
    fn locator(&self, selector: &str) -> Self;

    /// Creates a locator for the nth match (0-indexed).
    fn nth(&self, index: usize) -> Self;

    /// Number of elements currently matching.
    async fn count(&self) -> EngineResult<usize>;

    /// One locator per current match, in document order.
    async fn all(&self) -> EngineResult<Vec<Self>> {
        let count = self.count().await?;
        Ok((0..count).map(|index| self.nth(index)).collect())
    }

    async fn click(&self, options: Option<ClickOptions>) -> EngineResult<()>;

    async fn hover(&self, options: Option<HoverOptions>) -> EngineResult<()>;

    /// Replaces the value of an input, textarea or contenteditable element.
    async fn fill(&self, value: &str, options: Option<FillOptions>) -> EngineResult<()>;

    async fn clear(&self, options: Option<FillOptions>) -> EngineResult<()>;

    async fn focus(&self) -> EngineResult<()>;

    async fn blur(&self) -> EngineResult<()>;

    /// Types `text` one character at a time, firing key events for each.
    async fn type_text(&self, text: &str) -> EngineResult<()>;

    /// Presses a single key name or accelerator string such as `Control+a`.
    async fn press(&self, key: &str, options: Option<PressOptions>) -> EngineResult<()>;

    /// Selects options in a `<select>`, returning the selected values.
    async fn select_options(&self, options: Vec<SelectOption>) -> EngineResult<Vec<String>>;

    /// Dispatches a DOM event of type `event_type` with an optional init payload.
    async fn dispatch_event(&self, event_type: &str, event_init: Option<Value>)
    -> EngineResult<()>;

    async fn get_attribute(&self, name: &str) -> EngineResult<Option<String>>;

    /// Bounding box, or `None` when the element is not rendered.
    async fn bounding_box(&self) -> EngineResult<Option<BoundingBox>>;

    async fn input_value(&self) -> EngineResult<String>;

    async fn text_content(&self) -> EngineResult<Option<String>>;

    /// Evaluates `expression`, a JavaScript function taking `(element, arg)`,
    /// against the resolved element and returns its JSON result.
    async fn evaluate(&self, expression: &str, arg: Value) -> EngineResult<Value>;
}
