//! Telegram Bot API relay

use async_trait::async_trait;
use serde::Serialize;

use super::{MessageRelay, RelayError};
use crate::config::TelegramConfig;

const MARKDOWN_SPECIAL: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    '\\',
];

/// Prefix every Telegram markdown control character with a backslash
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Posts messages through `sendMessage` of the Bot API
pub struct TelegramRelay {
    client: reqwest::Client,
    api_base: String,
    parse_mode: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramRelay {
    pub fn new(config: &TelegramConfig) -> Self {
        TelegramRelay {
            client: reqwest::Client::new(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            parse_mode: config.parse_mode.clone(),
            bot_token: non_empty(config.bot_token.as_deref()),
            chat_id: non_empty(config.chat_id.as_deref()),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl MessageRelay for TelegramRelay {
    async fn send(&self, text: &str) -> Result<(), RelayError> {
        let (Some(token), Some(chat_id)) = (&self.bot_token, &self.chat_id) else {
            return Err(RelayError::NotConfigured);
        };

        let url = format!("{}/bot{}/sendMessage", self.api_base, token);
        let body = SendMessage {
            chat_id,
            text,
            parse_mode: &self.parse_mode,
        };

        let resp = self.client.post(url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let body = if body.trim().is_empty() {
                "Failed to send Telegram message".to_string()
            } else {
                body
            };
            return Err(RelayError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!("Relayed message to Telegram chat");
        Ok(())
    }
}
