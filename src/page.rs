//! The page-engine seam between the workflow and a concrete browser client.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::element::PageElement;
use crate::errors::AutomationError;
use crate::selector::Selector;

/// Navigation and element-query operations against a live page.
///
/// The production implementation drives a remote WebDriver session
/// ([`crate::driver::WebDriverEngine`]); tests substitute a scripted page.
#[async_trait]
pub trait PageEngine: Send + Sync {
    /// Navigate the session to the given URL
    async fn goto(&self, url: &str) -> Result<(), AutomationError>;

    /// URL the session is currently on
    async fn current_url(&self) -> Result<String, AutomationError>;

    /// Find the first element matching the selector, without waiting
    async fn find(&self, selector: &Selector) -> Result<PageElement, AutomationError>;

    /// Find all elements matching the selector, in DOM order, without waiting
    async fn find_all(&self, selector: &Selector) -> Result<Vec<PageElement>, AutomationError>;

    /// Wait up to `timeout` for an element matching the selector to be
    /// present. Exceeding the timeout yields [`AutomationError::Timeout`].
    async fn wait_for(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<PageElement, AutomationError>;

    /// Wait up to `timeout` for an element matching the selector to be both
    /// displayed and enabled.
    async fn wait_clickable(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<PageElement, AutomationError>;

    /// Capture a screenshot of the current page to `path`
    async fn screenshot(&self, path: &Path) -> Result<(), AutomationError>;

    /// Tear down the underlying browser session
    async fn close(&self) -> Result<(), AutomationError>;
}
