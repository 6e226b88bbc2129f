use std::path::PathBuf;
use std::time::Duration;

/// Fixed acknowledgment sent to every conversation with unread messages
pub const DEFAULT_REPLY_TEXT: &str =
    "您好，很高兴收到您的消息。我正在查看您的信息，稍后会给您详细回复。";

/// Remote Selenium endpoint the session is established against
pub const DEFAULT_WEBDRIVER_URL: &str = "http://selenium:4444/wd/hub";

pub const LOGIN_URL: &str = "https://www.zhipin.com/web/user/?ka=header-login";
pub const CHAT_URL: &str = "https://www.zhipin.com/web/geek/chat?ka=header-message";

/// Runtime configuration for one bot session
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Remote WebDriver endpoint
    pub webdriver_url: String,
    /// Login page URL
    pub login_url: String,
    /// Message-center page URL
    pub chat_url: String,
    /// Directory checkpoint screenshots are written under
    pub screenshot_dir: PathBuf,
    /// Reply template sent to unread conversations
    pub reply_text: String,
    /// Pause between inbox polling cycles
    pub poll_interval: Duration,
    /// UI settle pause after each reply attempt
    pub settle_delay: Duration,
    /// Default bounded-wait timeout for element lookups
    pub wait_timeout: Duration,
    /// Bounded wait for the QR image to render
    pub qr_timeout: Duration,
    /// Bounded wait for the scan-status title (non-fatal on expiry)
    pub scan_timeout: Duration,
    /// Bounded wait for the post-login landing marker (fatal on expiry)
    pub landing_timeout: Duration,
    /// Skip a row whose extraction fails instead of aborting the run
    pub skip_bad_rows: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            login_url: LOGIN_URL.to_string(),
            chat_url: CHAT_URL.to_string(),
            screenshot_dir: PathBuf::from("screenshot"),
            reply_text: DEFAULT_REPLY_TEXT.to_string(),
            poll_interval: Duration::from_secs(5),
            settle_delay: Duration::from_secs(2),
            wait_timeout: Duration::from_secs(30),
            qr_timeout: Duration::from_secs(30),
            scan_timeout: Duration::from_secs(60),
            landing_timeout: Duration::from_secs(30),
            skip_bad_rows: false,
        }
    }
}
