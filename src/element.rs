use std::fmt::Debug;

use async_trait::async_trait;

use crate::errors::AutomationError;
use crate::selector::Selector;

/// Represents an element on the remote page
///
/// All interaction with page content goes through this wrapper, so workflow
/// code never depends on a concrete WebDriver client and can run against a
/// scripted page in tests.
#[derive(Debug)]
pub struct PageElement {
    inner: Box<dyn PageElementImpl>,
}

#[async_trait]
pub trait PageElementImpl: Send + Sync + Debug {
    async fn text(&self) -> Result<String, AutomationError>;
    async fn click(&self) -> Result<(), AutomationError>;
    async fn clear(&self) -> Result<(), AutomationError>;
    async fn type_text(&self, text: &str) -> Result<(), AutomationError>;
    async fn is_displayed(&self) -> Result<bool, AutomationError>;
    async fn is_enabled(&self) -> Result<bool, AutomationError>;
    /// Find the first descendant matching the selector
    async fn find(&self, selector: &Selector) -> Result<PageElement, AutomationError>;
    /// Find all descendants matching the selector, in DOM order
    async fn find_all(&self, selector: &Selector) -> Result<Vec<PageElement>, AutomationError>;
    fn clone_box(&self) -> Box<dyn PageElementImpl>;
}

impl Clone for PageElement {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone_box(),
        }
    }
}

impl PageElement {
    /// Create a new page element from a driver-specific implementation
    pub fn new(impl_: Box<dyn PageElementImpl>) -> Self {
        Self { inner: impl_ }
    }

    /// Get the element's visible text
    pub async fn text(&self) -> Result<String, AutomationError> {
        self.inner.text().await
    }

    /// Click on this element
    pub async fn click(&self) -> Result<(), AutomationError> {
        self.inner.click().await
    }

    /// Clear any pre-existing content (input elements)
    pub async fn clear(&self) -> Result<(), AutomationError> {
        self.inner.clear().await
    }

    /// Type text into this element
    pub async fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        self.inner.type_text(text).await
    }

    pub async fn is_displayed(&self) -> Result<bool, AutomationError> {
        self.inner.is_displayed().await
    }

    pub async fn is_enabled(&self) -> Result<bool, AutomationError> {
        self.inner.is_enabled().await
    }

    /// Find the first descendant matching the selector
    pub async fn find(
        &self,
        selector: impl Into<Selector> + Send,
    ) -> Result<PageElement, AutomationError> {
        self.inner.find(&selector.into()).await
    }

    /// Find all descendants matching the selector, in DOM order
    pub async fn find_all(
        &self,
        selector: impl Into<Selector> + Send,
    ) -> Result<Vec<PageElement>, AutomationError> {
        self.inner.find_all(&selector.into()).await
    }
}
