//! QR-code login handshake.
//!
//! Four states: `PageLoaded → QrDisplayed → ScanPending → LoggedIn`. The
//! scan-status substep is the only non-fatal wait; the landing-marker wait
//! is the real gate and its failure aborts the run.

use tracing::{debug, info, warn};

use crate::config::BotConfig;
use crate::errors::AutomationError;
use crate::selector::zhipin;
use crate::session::{Checkpoint, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    PageLoaded,
    QrDisplayed,
    ScanPending,
    LoggedIn,
}

pub struct LoginHandshake<'a> {
    session: &'a Session,
    config: &'a BotConfig,
}

impl<'a> LoginHandshake<'a> {
    pub fn new(session: &'a Session, config: &'a BotConfig) -> Self {
        Self { session, config }
    }

    /// Run the handshake to completion. Returns once the post-login landing
    /// marker has been observed; any earlier fatal failure propagates.
    pub async fn run(&self) -> Result<(), AutomationError> {
        self.open_login_page().await?;
        self.switch_to_qr().await?;
        self.wait_for_scan().await?;
        Ok(())
    }

    async fn open_login_page(&self) -> Result<(), AutomationError> {
        self.session.goto(&self.config.login_url).await?;
        self.session.locator(zhipin::LOGIN_PANEL).wait(None).await?;
        self.session.screenshot(Checkpoint::Login).await?;
        debug!(state = ?LoginState::PageLoaded, "login page rendered");
        info!("opened the zhipin login page");
        Ok(())
    }

    async fn switch_to_qr(&self) -> Result<(), AutomationError> {
        // Only click once the control is confirmed clickable, so a stale or
        // disabled switch never receives the click.
        let switch = self
            .session
            .locator(zhipin::QR_SWITCH)
            .wait_clickable(None)
            .await?;
        switch.click().await?;

        self.session
            .locator(zhipin::QR_IMAGE)
            .wait(Some(self.config.qr_timeout))
            .await?;
        let qr_path = self.session.screenshot(Checkpoint::Qr).await?;
        debug!(state = ?LoginState::QrDisplayed, "QR code rendered");
        info!(
            path = %qr_path.display(),
            "scan the QR code within 60 seconds to log in"
        );
        Ok(())
    }

    async fn wait_for_scan(&self) -> Result<(), AutomationError> {
        debug!(state = ?LoginState::ScanPending, "waiting for scan");
        match self.scan_status().await {
            Ok(status) => info!(%status, "scan status"),
            Err(AutomationError::Timeout(_)) | Err(AutomationError::ElementNotFound(_)) => {
                // Non-fatal: the landing-marker wait below is the real gate.
                warn!("timed out waiting for the scan status title");
            }
            Err(e) => return Err(e),
        }

        self.session
            .locator(zhipin::LANDING_MARKER)
            .wait(Some(self.config.landing_timeout))
            .await?;
        let url = self.session.current_url().await?;
        debug!(state = ?LoginState::LoggedIn, "landing marker present");
        info!(%url, "zhipin login succeeded");
        self.session.screenshot(Checkpoint::Home).await?;
        Ok(())
    }

    async fn scan_status(&self) -> Result<String, AutomationError> {
        let title = self
            .session
            .locator(zhipin::SCAN_STATUS)
            .wait(Some(self.config.scan_timeout))
            .await?;
        title.text().await
    }
}
