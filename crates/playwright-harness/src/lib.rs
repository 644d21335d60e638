//! playwright-harness: Component test-harness environment backed by Playwright
//!
//! This crate lets component harnesses locate and drive elements in a real
//! browser through Playwright locators. It translates harness calls (find
//! elements, click, type, read text or CSS) into locator calls and converts the
//! results back into the shapes harnesses expect.
//!
//! # Examples
//!
//! ## Loading harness elements from a page
//!
//! ```ignore
//! use playwright_harness::{HarnessEnvironment, PlaywrightHarnessEnvironment, TestElement};
//! use playwright_rs::Playwright;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let playwright = Playwright::launch().await?;
//!     let browser = playwright.chromium().launch().await?;
//!     let page = browser.new_page().await?;
//!
//!     let _ = page.goto(
//!         "data:text/html,<html><body>\
//!             <input id='name' class='field wide' />\
//!         </body></html>",
//!         None
//!     ).await;
//!
//!     let loader = PlaywrightHarnessEnvironment::loader(&page, None).await?;
//!     let input = &loader.find_all("#name").await?[0];
//!
//!     input.set_input_value("Ada").await?;
//!     assert_eq!(input.get_property("value").await?, "Ada");
//!     assert!(input.has_class("wide").await?);
//!
//!     browser.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Sending keys
//!
//! ```ignore
//! use playwright_harness::{KeyToken, ModifierKeys, TestElement, TestKey};
//!
//! # async fn run(input: &dyn TestElement) -> playwright_harness::Result<()> {
//! // Typed character by character, then Enter pressed by name
//! input.send_keys(&[KeyToken::from("hello"), KeyToken::from(TestKey::Enter)]).await?;
//!
//! // One accelerator press: "Control+a"
//! let control = ModifierKeys { control: true, ..Default::default() };
//! input.send_keys_with_modifiers(control, &[KeyToken::from("a")]).await?;
//! # Ok(())
//! # }
//! ```

mod element;
mod environment;
mod error;
mod harness;
mod keys;
mod locator;
mod page_locator;

// Re-export error types
pub use error::{Error, Result};

// Re-export the harness protocol
pub use harness::{ElementDimensions, EventData, HarnessEnvironment, TestElement, TextOptions};

// Re-export the Playwright-backed implementations
pub use element::PlaywrightElement;
pub use environment::{
    HarnessEnvironmentOptions, HarnessEnvironmentOptionsBuilder, PlaywrightHarnessEnvironment,
    QueryFn, default_query,
};

// Re-export key handling
pub use keys::{KeyToken, ModifierKeys, TestKey};

// Re-export the locator capability
pub use locator::{BoundingBox, ElementLocator, EngineResult};
pub use page_locator::PageLocator;
