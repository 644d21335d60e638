// Error types for playwright-harness

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving harnesses through Playwright
#[derive(Debug, Error)]
pub enum Error {
    /// A `TestElement` was handed to an environment that did not create it
    ///
    /// Native locators can only be recovered from elements produced by
    /// `PlaywrightHarnessEnvironment`. Mixing elements from different
    /// environment implementations is a programming error.
    #[error("This TestElement was not created by the PlaywrightHarnessEnvironment")]
    ForeignElement,

    /// A symbolic key has no Playwright key name
    #[error("Unsupported TestKey: {0}")]
    UnsupportedKey(String),

    /// The hook only makes sense for an in-process host
    ///
    /// Change-detection flushing and waiting for tasks outside the zone have
    /// no counterpart when the page runs in a browser driven by Playwright.
    #[error("{0} is not supported by the Playwright harness environment")]
    NotSupported(&'static str),

    /// No element matched the selector of a child loader
    #[error("Expected to find element for HarnessLoader matching selector: \"{0}\"")]
    ElementNotFound(String),

    /// Failure reported by Playwright (detached element, timeout, evaluation error)
    #[error(transparent)]
    Engine(#[from] playwright_rs::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_key_names_the_key() {
        let err = Error::UnsupportedKey("COMMA".to_string());
        assert_eq!(err.to_string(), "Unsupported TestKey: COMMA");
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err: Error = playwright_rs::Error::Timeout("waiting for #btn".to_string()).into();
        assert_eq!(err.to_string(), "Timeout: waiting for #btn");
        assert!(matches!(err, Error::Engine(playwright_rs::Error::Timeout(_))));
    }

    #[test]
    fn test_not_supported_names_the_hook() {
        let err = Error::NotSupported("forceStabilize");
        assert!(err.to_string().starts_with("forceStabilize is not supported"));
    }
}
