//! Outbound delivery of contact submissions

mod message;
mod telegram;

use async_trait::async_trait;
use thiserror::Error;

pub use message::format_contact_message;
pub use telegram::{escape_markdown, TelegramRelay};

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Telegram credentials are not configured; set TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID")]
    NotConfigured,

    #[error("request to messaging API failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("messaging API answered {status}: {body}")]
    Upstream { status: u16, body: String },
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the bot token
        RelayError::Http(err.without_url())
    }
}

/// Sends a pre-formatted text message somewhere a human will read it
#[async_trait]
pub trait MessageRelay: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), RelayError>;
}
