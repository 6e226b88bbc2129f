//! Production [`PageEngine`] over a remote WebDriver (Selenium) session.

use std::path::Path;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use tracing::{debug, info};

use crate::config::BotConfig;
use crate::element::{PageElement, PageElementImpl};
use crate::errors::AutomationError;
use crate::page::PageEngine;
use crate::selector::Selector;

/// Chrome launch flags for a containerized remote browser
const CHROME_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-gpu",
    "--disable-dev-shm-usage",
    "--start-maximized",
];

/// Remote browser startup can be slow; keep the session timeouts generous
const SESSION_TIMEOUT: Duration = Duration::from_secs(300);

/// Interval between condition checks inside a bounded wait
const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub struct WebDriverEngine {
    driver: WebDriver,
}

impl WebDriverEngine {
    /// Establish a session against the remote automation server.
    ///
    /// Construction failure is fatal for the whole workflow and is surfaced
    /// to the caller, never retried here.
    pub async fn connect(config: &BotConfig) -> Result<Self, AutomationError> {
        let mut caps = DesiredCapabilities::chrome();
        for arg in CHROME_ARGS.iter().copied() {
            caps.add_arg(arg)?;
        }

        info!(url = %config.webdriver_url, "connecting to remote WebDriver");
        let driver = WebDriver::new(&config.webdriver_url, caps).await?;
        driver.set_page_load_timeout(SESSION_TIMEOUT).await?;
        driver.set_script_timeout(SESSION_TIMEOUT).await?;

        Ok(Self { driver })
    }

    async fn try_find(&self, selector: &Selector) -> Result<PageElement, AutomationError> {
        let by = to_by(selector)?;
        match self.driver.find(by).await {
            Ok(element) => Ok(wrap(element)),
            Err(WebDriverError::NoSuchElement(_)) => Err(AutomationError::ElementNotFound(
                format!("no element matching {selector}"),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl PageEngine for WebDriverEngine {
    async fn goto(&self, url: &str) -> Result<(), AutomationError> {
        debug!(url, "navigating");
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, AutomationError> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn find(&self, selector: &Selector) -> Result<PageElement, AutomationError> {
        self.try_find(selector).await
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<PageElement>, AutomationError> {
        let by = to_by(selector)?;
        let elements = self.driver.find_all(by).await?;
        Ok(elements.into_iter().map(wrap).collect())
    }

    async fn wait_for(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<PageElement, AutomationError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.try_find(selector).await {
                Ok(element) => return Ok(element),
                Err(AutomationError::ElementNotFound(msg)) => {
                    if Instant::now() >= deadline {
                        return Err(AutomationError::Timeout(format!(
                            "timed out after {timeout:?} waiting for {selector}: {msg}"
                        )));
                    }
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn wait_clickable(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<PageElement, AutomationError> {
        let deadline = Instant::now() + timeout;
        let mut last_state: Option<AutomationError> = None;
        loop {
            match self.try_find(selector).await {
                Ok(element) => {
                    let displayed = element.is_displayed().await?;
                    let enabled = element.is_enabled().await?;
                    if displayed && enabled {
                        return Ok(element);
                    }
                    last_state = Some(if !displayed {
                        AutomationError::ElementNotVisible(selector.to_string())
                    } else {
                        AutomationError::ElementNotEnabled(selector.to_string())
                    });
                }
                Err(e @ AutomationError::ElementNotFound(_)) => last_state = Some(e),
                Err(e) => return Err(e),
            }
            if Instant::now() >= deadline {
                return Err(match last_state {
                    Some(AutomationError::ElementNotFound(msg)) => AutomationError::Timeout(
                        format!("timed out after {timeout:?} waiting for clickable {selector}: {msg}"),
                    ),
                    Some(e) => e,
                    None => AutomationError::Timeout(format!(
                        "timed out after {timeout:?} waiting for clickable {selector}"
                    )),
                });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn screenshot(&self, path: &Path) -> Result<(), AutomationError> {
        self.driver.screenshot(path).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), AutomationError> {
        // WebDriver is a cheap handle clone; quit() consumes it.
        self.driver.clone().quit().await?;
        Ok(())
    }
}

fn wrap(element: WebElement) -> PageElement {
    PageElement::new(Box::new(WebDriverElement { inner: element }))
}

fn to_by(selector: &Selector) -> Result<By, AutomationError> {
    match selector {
        Selector::Css(s) => Ok(By::Css(s.as_str())),
        Selector::Xpath(s) => Ok(By::XPath(s.as_str())),
        Selector::Id(s) => Ok(By::Id(s.as_str())),
        Selector::Tag(s) => Ok(By::Tag(s.as_str())),
        Selector::Invalid(reason) => Err(AutomationError::InvalidSelector(reason.clone())),
    }
}

#[derive(Debug, Clone)]
struct WebDriverElement {
    inner: WebElement,
}

#[async_trait]
impl PageElementImpl for WebDriverElement {
    async fn text(&self) -> Result<String, AutomationError> {
        Ok(self.inner.text().await?)
    }

    async fn click(&self) -> Result<(), AutomationError> {
        Ok(self.inner.click().await?)
    }

    async fn clear(&self) -> Result<(), AutomationError> {
        Ok(self.inner.clear().await?)
    }

    async fn type_text(&self, text: &str) -> Result<(), AutomationError> {
        Ok(self.inner.send_keys(text).await?)
    }

    async fn is_displayed(&self) -> Result<bool, AutomationError> {
        Ok(self.inner.is_displayed().await?)
    }

    async fn is_enabled(&self) -> Result<bool, AutomationError> {
        Ok(self.inner.is_enabled().await?)
    }

    async fn find(&self, selector: &Selector) -> Result<PageElement, AutomationError> {
        let by = to_by(selector)?;
        match self.inner.find(by).await {
            Ok(element) => Ok(wrap(element)),
            Err(WebDriverError::NoSuchElement(_)) => Err(AutomationError::ElementNotFound(
                format!("no descendant matching {selector}"),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_all(&self, selector: &Selector) -> Result<Vec<PageElement>, AutomationError> {
        let by = to_by(selector)?;
        let elements = self.inner.find_all(by).await?;
        Ok(elements.into_iter().map(wrap).collect())
    }

    fn clone_box(&self) -> Box<dyn PageElementImpl> {
        Box::new(self.clone())
    }
}
