use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::element::PageElement;
use crate::errors::AutomationError;
use crate::page::PageEngine;
use crate::selector::Selector;

// Default timeout if none is specified on the locator itself
const DEFAULT_LOCATOR_TIMEOUT: Duration = Duration::from_secs(30);

/// A high-level API for finding and waiting on page elements
#[derive(Clone)]
pub struct Locator {
    engine: Arc<dyn PageEngine>,
    selector: Selector,
    timeout: Duration, // Default timeout for this locator instance
}

impl Locator {
    /// Create a new locator with the given selector
    pub(crate) fn new(engine: Arc<dyn PageEngine>, selector: Selector) -> Self {
        Self {
            engine,
            selector,
            timeout: DEFAULT_LOCATOR_TIMEOUT,
        }
    }

    /// Set a default timeout for waiting operations on this locator instance.
    /// This timeout is used if no specific timeout is passed to wait methods.
    pub fn set_default_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wait for an element matching the locator to be present, up to the
    /// specified timeout. If no timeout is provided, uses the locator's
    /// default timeout.
    pub async fn wait(&self, timeout: Option<Duration>) -> Result<PageElement, AutomationError> {
        debug!("Waiting for element matching selector: {}", self.selector);
        let effective_timeout = timeout.unwrap_or(self.timeout);
        self.engine.wait_for(&self.selector, effective_timeout).await
    }

    /// Wait for an element matching the locator to be displayed and enabled,
    /// up to the specified timeout.
    pub async fn wait_clickable(
        &self,
        timeout: Option<Duration>,
    ) -> Result<PageElement, AutomationError> {
        debug!(
            "Waiting for element matching selector to be clickable: {}",
            self.selector
        );
        let effective_timeout = timeout.unwrap_or(self.timeout);
        self.engine
            .wait_clickable(&self.selector, effective_timeout)
            .await
    }

    pub fn selector_string(&self) -> String {
        self.selector.to_string()
    }
}
