//! Auto-reply bot for the BOSS Zhipin chat inbox
//!
//! Drives a remote WebDriver session through the QR-code login flow, then
//! polls the conversation list and sends a templated acknowledgment to every
//! conversation with unread messages. Page interaction goes through the
//! [`page::PageEngine`] seam, inspired by Playwright's web automation model,
//! so the workflow is testable against a scripted page.

pub mod config;
pub mod driver;
pub mod element;
pub mod errors;
pub mod inbox;
pub mod locator;
pub mod login;
pub mod page;
pub mod selector;
pub mod session;
#[cfg(test)]
mod tests;

pub use config::BotConfig;
pub use element::PageElement;
pub use errors::AutomationError;
pub use inbox::{Conversation, CycleStats, InboxPoller};
pub use locator::Locator;
pub use login::LoginHandshake;
pub use selector::Selector;
pub use session::{Checkpoint, Session};
