// PageLocator - ElementLocator backed by a live Playwright page
//
// Architecture:
// - Wraps a `playwright_rs::Locator` plus the page's main Frame
// - Actions the Locator already exposes are delegated to it
// - focus/blur/type/dispatchEvent/evalOnSelector are sent to the Frame
//   channel directly, with strict=true and the default timeout, the same
//   shape Locator uses for its own frame calls
// - evalOnSelector is preceded by waitForSelector(state=attached), so in-page
//   reads wait for a late element the same way getAttribute/textContent do
//
// See: https://playwright.dev/docs/api/class-locator

use crate::locator::{BoundingBox, ElementLocator, EngineResult};
use async_trait::async_trait;
use playwright_rs::protocol::{Frame, parse_result, serialize_argument, serialize_null};
use playwright_rs::server::channel_owner::ChannelOwner;
use playwright_rs::{
    ClickOptions, DEFAULT_TIMEOUT_MS, FillOptions, HoverOptions, Locator, Page, PressOptions,
    SelectOption,
};
use serde_json::{Value, json};
use std::sync::Arc;

const BOUNDING_BOX_SCRIPT: &str = r#"element => {
  if (!element.isConnected || element.getClientRects().length === 0) return null;
  const rect = element.getBoundingClientRect();
  return { x: rect.x, y: rect.y, width: rect.width, height: rect.height };
}"#;

/// Locator on a Playwright page, usable as a harness element handle.
///
/// # Example
///
/// ```ignore
/// use playwright_harness::PageLocator;
/// use playwright_rs::Playwright;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let playwright = Playwright::launch().await?;
///     let browser = playwright.chromium().launch().await?;
///     let page = browser.new_page().await?;
///
///     let body = PageLocator::body(&page).await?;
///     assert_eq!(body.selector(), "body");
///
///     browser.close().await?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct PageLocator {
    inner: Locator,
    frame: Arc<Frame>,
}

impl PageLocator {
    /// Creates a locator for `selector` on the page's main frame.
    pub async fn new(page: &Page, selector: &str) -> EngineResult<Self> {
        let frame = page.main_frame().await?;
        let inner = page.locator(selector).await;
        Ok(Self {
            inner,
            frame: Arc::new(frame),
        })
    }

    /// Creates a locator for the document body.
    pub async fn body(page: &Page) -> EngineResult<Self> {
        Self::new(page, "body").await
    }

    /// Returns the selector string for this locator
    pub fn selector(&self) -> &str {
        self.inner.selector()
    }

    /// Returns the wrapped Playwright locator
    pub fn as_locator(&self) -> &Locator {
        &self.inner
    }

    fn derive(&self, inner: Locator) -> Self {
        Self {
            inner,
            frame: Arc::clone(&self.frame),
        }
    }

    /// Sends a selector-targeted call to the frame channel.
    async fn frame_call(&self, method: &str, mut params: Value) -> EngineResult<Value> {
        params["selector"] = json!(self.selector());
        params["strict"] = json!(true);
        if params.get("timeout").is_none() {
            params["timeout"] = json!(DEFAULT_TIMEOUT_MS);
        }

        tracing::debug!(method, selector = self.selector(), "Frame locator call");

        ChannelOwner::channel(self.frame.as_ref())
            .send(method, params)
            .await
    }
}

#[async_trait]
impl ElementLocator for PageLocator {
    fn locator(&self, selector: &str) -> Self {
        self.derive(self.inner.locator(selector))
    }

    fn nth(&self, index: usize) -> Self {
        self.derive(self.inner.nth(i32::try_from(index).unwrap_or(i32::MAX)))
    }

    async fn count(&self) -> EngineResult<usize> {
        self.inner.count().await
    }

    async fn click(&self, options: Option<ClickOptions>) -> EngineResult<()> {
        self.inner.click(options).await
    }

    async fn hover(&self, options: Option<HoverOptions>) -> EngineResult<()> {
        self.inner.hover(options).await
    }

    async fn fill(&self, value: &str, options: Option<FillOptions>) -> EngineResult<()> {
        self.inner.fill(value, options).await
    }

    async fn clear(&self, options: Option<FillOptions>) -> EngineResult<()> {
        self.inner.clear(options).await
    }

    async fn focus(&self) -> EngineResult<()> {
        self.frame_call("focus", json!({})).await.map(|_| ())
    }

    async fn blur(&self) -> EngineResult<()> {
        self.frame_call("blur", json!({})).await.map(|_| ())
    }

    async fn type_text(&self, text: &str) -> EngineResult<()> {
        self.frame_call("type", json!({ "text": text }))
            .await
            .map(|_| ())
    }

    async fn press(&self, key: &str, options: Option<PressOptions>) -> EngineResult<()> {
        self.inner.press(key, options).await
    }

    async fn select_options(&self, options: Vec<SelectOption>) -> EngineResult<Vec<String>> {
        self.inner.select_option_multiple(&options, None).await
    }

    async fn dispatch_event(
        &self,
        event_type: &str,
        event_init: Option<Value>,
    ) -> EngineResult<()> {
        let event_init = match event_init {
            Some(init) => serialize_argument(&init),
            None => serialize_null(),
        };
        self.frame_call(
            "dispatchEvent",
            json!({ "type": event_type, "eventInit": event_init }),
        )
        .await
        .map(|_| ())
    }

    async fn get_attribute(&self, name: &str) -> EngineResult<Option<String>> {
        self.inner.get_attribute(name).await
    }

    async fn bounding_box(&self) -> EngineResult<Option<BoundingBox>> {
        match self.evaluate(BOUNDING_BOX_SCRIPT, Value::Null).await? {
            Value::Null => Ok(None),
            rect => Ok(Some(serde_json::from_value(rect)?)),
        }
    }

    async fn input_value(&self) -> EngineResult<String> {
        self.inner.input_value(None).await
    }

    async fn text_content(&self) -> EngineResult<Option<String>> {
        self.inner.text_content().await
    }

    async fn evaluate(&self, expression: &str, arg: Value) -> EngineResult<Value> {
        self.frame_call("waitForSelector", json!({ "state": "attached" }))
            .await?;

        let response = self
            .frame_call(
                "evalOnSelector",
                json!({
                    "expression": expression,
                    "isFunction": true,
                    "arg": serialize_argument(&arg),
                }),
            )
            .await?;

        Ok(response
            .get("value")
            .map(parse_result)
            .unwrap_or(Value::Null))
    }
}

impl std::fmt::Debug for PageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLocator")
            .field("selector", &self.selector())
            .finish()
    }
}
