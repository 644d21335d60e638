// PlaywrightHarnessEnvironment - HarnessEnvironment backed by Playwright locators
//
// Architecture:
// - The document-rooted environment is created once per page via `loader()`
// - Scoped environments share the same options and document root, and only
//   swap the root scope
// - Element discovery runs the configured query function against the root
//   scope and boxes every match in a fresh `PlaywrightElement`

use crate::element::PlaywrightElement;
use crate::error::{Error, Result};
use crate::harness::{HarnessEnvironment, TestElement};
use crate::locator::ElementLocator;
use crate::page_locator::PageLocator;
use async_trait::async_trait;
use playwright_rs::Page;
use std::fmt;
use std::sync::Arc;

/// Query function turning a selector and a root locator into a locator for the matches.
pub type QueryFn<L> = Arc<dyn Fn(&str, &L) -> L + Send + Sync>;

/// Default query: `selector` scoped under `root`.
pub fn default_query<L: ElementLocator>(selector: &str, root: &L) -> L {
    root.locator(selector)
}

/// Options to configure the environment.
///
/// # Example
///
/// ```ignore
/// use playwright_harness::{ElementLocator, HarnessEnvironmentOptions, PageLocator};
///
/// // Only match visible elements
/// let options = HarnessEnvironmentOptions::<PageLocator>::builder()
///     .query_fn(|selector, root| root.locator(&format!("{selector} >> visible=true")))
///     .build();
/// ```
pub struct HarnessEnvironmentOptions<L: ElementLocator = PageLocator> {
    /// The query function used to find DOM elements.
    pub query_fn: QueryFn<L>,
}

impl<L: ElementLocator> HarnessEnvironmentOptions<L> {
    /// Create a new builder for HarnessEnvironmentOptions
    pub fn builder() -> HarnessEnvironmentOptionsBuilder<L> {
        HarnessEnvironmentOptionsBuilder::default()
    }
}

impl<L: ElementLocator> Default for HarnessEnvironmentOptions<L> {
    fn default() -> Self {
        Self {
            query_fn: Arc::new(default_query::<L>),
        }
    }
}

impl<L: ElementLocator> Clone for HarnessEnvironmentOptions<L> {
    fn clone(&self) -> Self {
        Self {
            query_fn: Arc::clone(&self.query_fn),
        }
    }
}

impl<L: ElementLocator> fmt::Debug for HarnessEnvironmentOptions<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarnessEnvironmentOptions")
            .field("query_fn", &"<fn>")
            .finish()
    }
}

/// Builder for HarnessEnvironmentOptions
///
/// Unset fields fall back to the defaults.
pub struct HarnessEnvironmentOptionsBuilder<L: ElementLocator = PageLocator> {
    query_fn: Option<QueryFn<L>>,
}

impl<L: ElementLocator> Default for HarnessEnvironmentOptionsBuilder<L> {
    fn default() -> Self {
        Self { query_fn: None }
    }
}

impl<L: ElementLocator> HarnessEnvironmentOptionsBuilder<L> {
    /// Set the query function used to find DOM elements
    pub fn query_fn<F>(mut self, query_fn: F) -> Self
    where
        F: Fn(&str, &L) -> L + Send + Sync + 'static,
    {
        self.query_fn = Some(Arc::new(query_fn));
        self
    }

    /// Build the HarnessEnvironmentOptions
    pub fn build(self) -> HarnessEnvironmentOptions<L> {
        let defaults = HarnessEnvironmentOptions::default();
        HarnessEnvironmentOptions {
            query_fn: self.query_fn.unwrap_or(defaults.query_fn),
        }
    }
}

/// A `HarnessEnvironment` implementation for Playwright.
///
/// # Example
///
/// ```ignore
/// use playwright_harness::{HarnessEnvironment, PlaywrightHarnessEnvironment, TestElement};
/// use playwright_rs::Playwright;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let playwright = Playwright::launch().await?;
///     let browser = playwright.chromium().launch().await?;
///     let page = browser.new_page().await?;
///     page.goto("data:text/html,<button class='primary'>Save</button>", None).await?;
///
///     let loader = PlaywrightHarnessEnvironment::loader(&page, None).await?;
///     let buttons = loader.find_all("button").await?;
///     assert!(buttons[0].has_class("primary").await?);
///
///     browser.close().await?;
///     Ok(())
/// }
/// ```
pub struct PlaywrightHarnessEnvironment<L: ElementLocator = PageLocator> {
    root: L,
    document_root: L,
    options: Arc<HarnessEnvironmentOptions<L>>,
}

impl PlaywrightHarnessEnvironment<PageLocator> {
    /// Creates a loader rooted at the document body of `page`.
    pub async fn loader(
        page: &Page,
        options: Option<HarnessEnvironmentOptions<PageLocator>>,
    ) -> Result<Self> {
        let body = PageLocator::body(page).await?;
        tracing::debug!(url = %page.url(), "Creating harness loader at document body");
        Ok(Self::new(body, options))
    }
}

impl<L: ElementLocator> PlaywrightHarnessEnvironment<L> {
    /// Creates an environment whose root scope and document root are `root`.
    pub fn new(root: L, options: Option<HarnessEnvironmentOptions<L>>) -> Self {
        Self {
            document_root: root.clone(),
            root,
            options: Arc::new(options.unwrap_or_default()),
        }
    }

    /// Gets the locator wrapped by a `TestElement`.
    ///
    /// Fails with [`Error::ForeignElement`] when the element was not created by
    /// a `PlaywrightHarnessEnvironment` over the same locator type.
    pub fn native_element(element: &dyn TestElement) -> Result<L> {
        element
            .as_any()
            .downcast_ref::<PlaywrightElement<L>>()
            .map(|element| element.locator().clone())
            .ok_or(Error::ForeignElement)
    }

    /// Options shared by this environment and every environment scoped from it.
    pub fn options(&self) -> &HarnessEnvironmentOptions<L> {
        &self.options
    }
}

impl<L: ElementLocator> Clone for PlaywrightHarnessEnvironment<L> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            document_root: self.document_root.clone(),
            options: Arc::clone(&self.options),
        }
    }
}

impl<L: ElementLocator> fmt::Debug for PlaywrightHarnessEnvironment<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaywrightHarnessEnvironment")
            .field("root", &self.root)
            .field("document_root", &self.document_root)
            .finish()
    }
}

#[async_trait]
impl<L: ElementLocator> HarnessEnvironment for PlaywrightHarnessEnvironment<L> {
    type Raw = L;
    type Element = PlaywrightElement<L>;

    fn root_scope(&self) -> &L {
        &self.root
    }

    fn document_root(&self) -> L {
        self.document_root.clone()
    }

    fn wrap(&self, raw: L) -> PlaywrightElement<L> {
        PlaywrightElement::new(raw)
    }

    fn scope_to(&self, raw: L) -> Self {
        tracing::debug!(root = ?raw, "Creating scoped harness environment");
        Self {
            root: raw,
            document_root: self.document_root.clone(),
            options: Arc::clone(&self.options),
        }
    }

    async fn find_all_raw(&self, selector: &str) -> Result<Vec<L>> {
        let matches = (self.options.query_fn)(selector, &self.root);
        let elements = matches.all().await?;
        tracing::debug!(selector, count = elements.len(), "Found elements");
        Ok(elements)
    }

    async fn force_stabilize(&self) -> Result<()> {
        tracing::warn!("forceStabilize called on a Playwright harness environment");
        Err(Error::NotSupported("forceStabilize"))
    }

    async fn wait_for_tasks_outside_zone(&self) -> Result<()> {
        tracing::warn!("waitForTasksOutsideZone called on a Playwright harness environment");
        Err(Error::NotSupported("waitForTasksOutsideZone"))
    }
}
