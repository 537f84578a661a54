//! Telegram Bot API transport
//!
//! Long-polls `getUpdates` for inbound messages and delivers replies with
//! `sendMessage`. Transport failures are logged and retried by the poller;
//! they never reach the dispatcher.

mod client;
mod poller;
mod types;

pub use client::TelegramClient;
pub use poller::Poller;
pub use types::Update;

use crate::message::OutboundReply;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Telegram request failed: {0}")]
    Network(String),
    #[error("Telegram API error: {0}")]
    Api(String),
    #[error("Failed to parse Telegram response: {0}")]
    Parse(String),
}

/// Source of inbound updates
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Fetch updates with id >= `offset`, waiting up to `timeout_secs`
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, TelegramError>;
}

/// Destination for outbound replies
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_reply(&self, reply: &OutboundReply) -> Result<(), TelegramError>;
}
