// PlaywrightElement - TestElement implemented on top of a Playwright locator
//
// Each harness operation becomes one or more locator calls. No state is kept
// beyond the locator itself; the element is re-resolved by Playwright on
// every call.

use crate::error::Result;
use crate::harness::{ElementDimensions, EventData, TestElement, TextOptions};
use crate::keys::{KeyStroke, KeyToken, ModifierKeys, resolve_strokes};
use crate::locator::ElementLocator;
use crate::page_locator::PageLocator;
use async_trait::async_trait;
use playwright_rs::protocol::{MouseButton, Position};
use playwright_rs::{ClickOptions, FillOptions, HoverOptions, SelectOption};
use serde_json::{Value, json};
use std::any::Any;

const CSS_VALUE_SCRIPT: &str =
    "(element, property) => getComputedStyle(element).getPropertyValue(property)";
const PROPERTY_SCRIPT: &str = "(element, name) => element[name]";
const MATCHES_SCRIPT: &str = "(element, selector) => element.matches(selector)";
const IS_FOCUSED_SCRIPT: &str = "element => element === document.activeElement";

/// Offset from the element's top-left corner that lies outside the element.
const MOUSE_AWAY_POSITION: Position = Position { x: -1.0, y: -1.0 };

/// A `TestElement` backed by a Playwright locator.
///
/// Created by `PlaywrightHarnessEnvironment` for every element it finds.
#[derive(Debug, Clone)]
pub struct PlaywrightElement<L: ElementLocator = PageLocator> {
    locator: L,
}

impl<L: ElementLocator> PlaywrightElement<L> {
    pub fn new(locator: L) -> Self {
        Self { locator }
    }

    /// Returns the locator this element wraps
    pub fn locator(&self) -> &L {
        &self.locator
    }

    async fn click_with(
        &self,
        button: MouseButton,
        position: Option<(f64, f64)>,
        modifiers: ModifierKeys,
    ) -> Result<()> {
        let mut options = ClickOptions::builder().button(button);
        if let Some((x, y)) = position {
            options = options.position(Position { x, y });
        }
        let held = modifiers.held();
        if !held.is_empty() {
            options = options.modifiers(held);
        }
        self.locator.click(Some(options.build())).await?;
        Ok(())
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Class tokens of a `class` attribute; empty runs of whitespace never count.
fn has_class_token(class_attribute: &str, name: &str) -> bool {
    class_attribute.split_whitespace().any(|class| class == name)
}

#[async_trait]
impl<L: ElementLocator> TestElement for PlaywrightElement<L> {
    async fn blur(&self) -> Result<()> {
        self.locator.blur().await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let options = FillOptions::builder().force(true).build();
        self.locator.clear(Some(options)).await?;
        Ok(())
    }

    async fn click(&self, position: Option<(f64, f64)>, modifiers: ModifierKeys) -> Result<()> {
        self.click_with(MouseButton::Left, position, modifiers)
            .await
    }

    async fn right_click(
        &self,
        position: Option<(f64, f64)>,
        modifiers: ModifierKeys,
    ) -> Result<()> {
        self.click_with(MouseButton::Right, position, modifiers)
            .await
    }

    async fn focus(&self) -> Result<()> {
        self.locator.focus().await?;
        Ok(())
    }

    async fn get_css_value(&self, property: &str) -> Result<String> {
        let value = self
            .locator
            .evaluate(CSS_VALUE_SCRIPT, json!(property))
            .await?;
        Ok(value_to_string(value))
    }

    async fn hover(&self) -> Result<()> {
        self.locator.hover(None).await?;
        Ok(())
    }

    async fn mouse_away(&self) -> Result<()> {
        // The hit-target check would reject a point outside the element.
        let options = HoverOptions::builder()
            .position(MOUSE_AWAY_POSITION)
            .force(true)
            .build();
        self.locator.hover(Some(options)).await?;
        Ok(())
    }

    async fn send_keys_with_modifiers(
        &self,
        modifiers: ModifierKeys,
        keys: &[KeyToken],
    ) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let strokes = resolve_strokes(modifiers, keys)?;
        tracing::debug!(
            locator = ?self.locator,
            strokes = strokes.len(),
            ?modifiers,
            "Sending keys"
        );

        for stroke in strokes {
            match stroke {
                KeyStroke::Type(text) => self.locator.type_text(text).await?,
                KeyStroke::Press(key) => self.locator.press(&key, None).await?,
            }
        }
        Ok(())
    }

    async fn text(&self, _options: Option<TextOptions>) -> Result<String> {
        Ok(self.locator.text_content().await?.unwrap_or_default())
    }

    async fn set_contenteditable_value(&self, value: &str) -> Result<()> {
        self.locator.type_text(value).await?;
        Ok(())
    }

    async fn get_attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.locator.get_attribute(name).await?)
    }

    async fn has_class(&self, name: &str) -> Result<bool> {
        let classes = self.get_attribute("class").await?.unwrap_or_default();
        Ok(has_class_token(&classes, name))
    }

    async fn get_dimensions(&self) -> Result<ElementDimensions> {
        let dimensions = match self.locator.bounding_box().await? {
            Some(rect) => ElementDimensions {
                top: rect.y,
                left: rect.x,
                width: rect.width,
                height: rect.height,
            },
            None => ElementDimensions::default(),
        };
        Ok(dimensions)
    }

    async fn get_property(&self, name: &str) -> Result<Value> {
        if name == "value" {
            return Ok(Value::String(self.locator.input_value().await?));
        }
        Ok(self.locator.evaluate(PROPERTY_SCRIPT, json!(name)).await?)
    }

    async fn matches_selector(&self, selector: &str) -> Result<bool> {
        let matches = self
            .locator
            .evaluate(MATCHES_SCRIPT, json!(selector))
            .await?;
        Ok(matches.as_bool().unwrap_or(false))
    }

    async fn is_focused(&self) -> Result<bool> {
        let focused = self
            .locator
            .evaluate(IS_FOCUSED_SCRIPT, Value::Null)
            .await?;
        Ok(focused.as_bool().unwrap_or(false))
    }

    async fn set_input_value(&self, value: &str) -> Result<()> {
        self.locator.fill(value, None).await?;
        Ok(())
    }

    async fn select_options(&self, option_indexes: &[usize]) -> Result<()> {
        let options = option_indexes
            .iter()
            .map(|&index| SelectOption::Index(index))
            .collect();
        self.locator.select_options(options).await?;
        Ok(())
    }

    async fn dispatch_event(&self, name: &str, data: Option<EventData>) -> Result<()> {
        self.locator
            .dispatch_event(name, data.map(Value::Object))
            .await?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
