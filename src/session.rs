use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::config::BotConfig;
use crate::driver::WebDriverEngine;
use crate::element::PageElement;
use crate::errors::AutomationError;
use crate::locator::Locator;
use crate::page::PageEngine;
use crate::selector::Selector;

/// Named screenshot checkpoints along the workflow.
///
/// Each run overwrites the prior image at the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    Login,
    Qr,
    Home,
    MessageList,
}

impl Checkpoint {
    fn file_name(&self) -> &'static str {
        match self {
            Checkpoint::Login => "login.zhipin.com.png",
            Checkpoint::Qr => "qr.zhipin.com.png",
            Checkpoint::Home => "home.zhipin.com.png",
            Checkpoint::MessageList => "message.zhipin.com.png",
        }
    }

    pub fn path(&self, root: &Path) -> PathBuf {
        root.join("boss").join(self.file_name())
    }
}

/// One authenticated browsing context, owned for the process lifetime.
///
/// Created once at startup and never recreated; if the underlying browser
/// session dies the run is over. [`Session::close`] must be called on every
/// exit path so the remote browser is not leaked.
pub struct Session {
    engine: Arc<dyn PageEngine>,
    screenshot_dir: PathBuf,
    default_timeout: Duration,
}

impl Session {
    /// Establish the browser session against the remote automation server
    pub async fn connect(config: &BotConfig) -> Result<Self, AutomationError> {
        let engine = WebDriverEngine::connect(config).await?;
        Ok(Self::with_engine(Arc::new(engine), config))
    }

    /// Build a session over an existing engine (tests use a scripted one)
    pub fn with_engine(engine: Arc<dyn PageEngine>, config: &BotConfig) -> Self {
        Self {
            engine,
            screenshot_dir: config.screenshot_dir.clone(),
            default_timeout: config.wait_timeout,
        }
    }

    pub fn locator(&self, selector: impl Into<Selector>) -> Locator {
        Locator::new(self.engine.clone(), selector.into())
            .set_default_timeout(self.default_timeout)
    }

    pub async fn goto(&self, url: &str) -> Result<(), AutomationError> {
        self.engine.goto(url).await
    }

    pub async fn current_url(&self) -> Result<String, AutomationError> {
        self.engine.current_url().await
    }

    /// Find an element without waiting
    pub async fn find(
        &self,
        selector: impl Into<Selector> + Send,
    ) -> Result<PageElement, AutomationError> {
        self.engine.find(&selector.into()).await
    }

    /// Capture a checkpoint screenshot, creating the directory as needed
    pub async fn screenshot(&self, checkpoint: Checkpoint) -> Result<PathBuf, AutomationError> {
        let path = checkpoint.path(&self.screenshot_dir);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        self.engine.screenshot(&path).await?;
        debug!(?checkpoint, path = %path.display(), "checkpoint captured");
        Ok(path)
    }

    /// Tear down the browser session
    pub async fn close(&self) -> Result<(), AutomationError> {
        self.engine.close().await
    }
}
