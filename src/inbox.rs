//! Message polling loop and reply action.
//!
//! Conversations are re-extracted from the list every cycle and discarded
//! after being logged and acted on; nothing persists across cycles. Rows are
//! processed strictly in the order they currently appear in the list.

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::BotConfig;
use crate::element::PageElement;
use crate::errors::AutomationError;
use crate::selector::zhipin;
use crate::session::{Checkpoint, Session};

/// One conversation row, as extracted during a polling cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    pub unread_count: u32,
    pub time: String,
    pub name: String,
    pub company: String,
    pub position: String,
    pub last_message: String,
}

impl Conversation {
    /// Render the full record for the per-conversation log line
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Counters for one polling cycle
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub rows_seen: usize,
    pub rows_skipped: usize,
    pub replies_sent: usize,
    pub replies_skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReplyOutcome {
    Sent,
    /// Send button was hidden or disabled; reply skipped, no retry
    Skipped,
}

pub struct InboxPoller<'a> {
    session: &'a Session,
    config: &'a BotConfig,
}

impl<'a> InboxPoller<'a> {
    pub fn new(session: &'a Session, config: &'a BotConfig) -> Self {
        Self { session, config }
    }

    /// Navigate to the message center and poll until cancelled.
    ///
    /// There is no natural termination: the loop exits only through the
    /// cancellation token or a propagated error.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), AutomationError> {
        self.open().await?;
        loop {
            if cancel.is_cancelled() {
                info!("inbox poller stopped");
                return Ok(());
            }
            let stats = self.run_cycle().await?;
            if stats.replies_sent > 0 || stats.rows_skipped > 0 {
                info!(
                    rows = stats.rows_seen,
                    skipped = stats.rows_skipped,
                    sent = stats.replies_sent,
                    "cycle complete"
                );
            }
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("inbox poller stopped");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }

    /// Open the message-center page and wait for the list to render
    pub async fn open(&self) -> Result<(), AutomationError> {
        info!("opening the message center");
        self.session.goto(&self.config.chat_url).await?;
        self.session.locator(zhipin::USER_LIST).wait(None).await?;
        self.session.screenshot(Checkpoint::MessageList).await?;
        Ok(())
    }

    /// One polling cycle: enumerate the visible rows, log each record, and
    /// reply to every row with unread messages.
    pub async fn run_cycle(&self) -> Result<CycleStats, AutomationError> {
        let container = self.session.locator(zhipin::USER_LIST).wait(None).await?;
        let group = container.find(zhipin::CHAT_GROUP).await?;
        let rows = group.find_all(zhipin::CHAT_ROW).await?;

        let mut stats = CycleStats::default();
        for (index, row) in rows.iter().enumerate() {
            let conversation = match extract_conversation(row).await {
                Ok(conversation) => conversation,
                Err(e) if self.config.skip_bad_rows => {
                    warn!(index, error = %e, "skipping row that failed extraction");
                    stats.rows_skipped += 1;
                    continue;
                }
                Err(e) => return Err(e),
            };

            info!(
                unread = conversation.unread_count,
                record = %conversation.to_json().unwrap_or_default(),
                "conversation"
            );
            stats.rows_seen += 1;

            if conversation.unread_count > 0 {
                match self.reply(row, &conversation.name).await? {
                    ReplyOutcome::Sent => stats.replies_sent += 1,
                    ReplyOutcome::Skipped => stats.replies_skipped += 1,
                }
            }
        }
        Ok(stats)
    }

    /// Open the conversation behind `row` and send the templated reply.
    ///
    /// A hidden or disabled send button downgrades to a warning and the row
    /// is skipped. There is no idempotence guard: a row that is still unread
    /// next cycle gets the same reply again.
    pub(crate) async fn reply(
        &self,
        row: &PageElement,
        name: &str,
    ) -> Result<ReplyOutcome, AutomationError> {
        info!(name, "replying to unread conversation");
        row.click().await?;
        self.session.locator(zhipin::MESSAGE_PANE).wait(None).await?;

        let input = self.session.find(zhipin::CHAT_INPUT).await?;
        input.click().await?;
        input.clear().await?;
        input.type_text(&self.config.reply_text).await?;

        let send = self.session.find(zhipin::SEND_BUTTON).await?;
        let outcome = if send.is_displayed().await? && send.is_enabled().await? {
            send.click().await?;
            info!(name, text = %self.config.reply_text, "reply sent");
            ReplyOutcome::Sent
        } else {
            warn!(name, "send button is not clickable, skipping reply");
            ReplyOutcome::Skipped
        };

        // Let the UI settle before the next row is processed.
        tokio::time::sleep(self.config.settle_delay).await;
        Ok(outcome)
    }
}

/// Extract one conversation record from a row's subtree.
///
/// A missing unread badge means zero unread; any other missing sub-element
/// is an extraction error for the row.
pub(crate) async fn extract_conversation(
    row: &PageElement,
) -> Result<Conversation, AutomationError> {
    Ok(Conversation {
        unread_count: unread_count(row).await?,
        time: row.find(zhipin::ROW_TIME).await?.text().await?,
        name: row.find(zhipin::ROW_NAME).await?.text().await?,
        company: row.find(zhipin::ROW_COMPANY).await?.text().await?,
        position: row.find(zhipin::ROW_POSITION).await?.text().await?,
        last_message: row.find(zhipin::ROW_LAST_MESSAGE).await?.text().await?,
    })
}

/// Badge text parses by leading digits, so a capped badge like "99+" counts
/// as 99. No badge element means nothing unread.
pub(crate) async fn unread_count(row: &PageElement) -> Result<u32, AutomationError> {
    match row.find(zhipin::UNREAD_BADGE).await {
        Ok(badge) => {
            let text = badge.text().await?;
            let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
            Ok(digits.parse().unwrap_or(0))
        }
        Err(AutomationError::ElementNotFound(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
