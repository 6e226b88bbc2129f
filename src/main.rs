use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use zhipin_bot::config::{BotConfig, DEFAULT_WEBDRIVER_URL};
use zhipin_bot::{InboxPoller, LoginHandshake, Session};

#[derive(Parser)]
#[command(name = "zhipin-bot")]
#[command(about = "QR-login auto-reply bot for the BOSS Zhipin chat inbox", version)]
struct Cli {
    /// Remote WebDriver endpoint
    #[arg(long, default_value = DEFAULT_WEBDRIVER_URL)]
    webdriver_url: String,

    /// Directory checkpoint screenshots are written under
    #[arg(long, default_value = "screenshot")]
    screenshot_dir: PathBuf,

    /// Reply template sent to unread conversations
    #[arg(long)]
    reply_text: Option<String>,

    /// Seconds between inbox polling cycles
    #[arg(long, default_value_t = 5)]
    poll_interval: u64,

    /// Skip a row whose extraction fails instead of aborting the run
    #[arg(long)]
    skip_bad_rows: bool,
}

impl Cli {
    fn into_config(self) -> BotConfig {
        let mut config = BotConfig {
            webdriver_url: self.webdriver_url,
            screenshot_dir: self.screenshot_dir,
            poll_interval: Duration::from_secs(self.poll_interval),
            skip_bad_rows: self.skip_bad_rows,
            ..BotConfig::default()
        };
        if let Some(reply_text) = self.reply_text {
            config.reply_text = reply_text;
        }
        config
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config();
    if let Err(e) = run(config).await {
        error!("fatal: {e:#}");
        std::process::exit(1);
    }
}

async fn run(config: BotConfig) -> anyhow::Result<()> {
    let session = Session::connect(&config)
        .await
        .context("failed to establish the WebDriver session")?;

    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested");
            ctrl_c_cancel.cancel();
        }
    });

    // The session must be torn down on every exit path, error paths included.
    let result = drive(&session, &config, cancel).await;
    if let Err(e) = session.close().await {
        warn!("failed to close the browser session: {e}");
    }
    Ok(result?)
}

async fn drive(
    session: &Session,
    config: &BotConfig,
    cancel: CancellationToken,
) -> Result<(), zhipin_bot::AutomationError> {
    LoginHandshake::new(session, config).run().await?;
    InboxPoller::new(session, config).run(cancel).await
}
