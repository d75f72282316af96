//! Pre-filled messenger links (WhatsApp, Telegram, e-mail)

use serde::Serialize;

use super::url::encode_component;
use crate::config::MessengerConfig;

/// All contact links for one pre-filled message
#[derive(Debug, Clone, Serialize)]
pub struct MessengerLinks {
    pub whatsapp: String,
    pub telegram: String,
    pub email: String,
}

/// `https://wa.me/{digits}?text=...`; non-digits are removed from the phone
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}?text={}", digits, encode_component(message))
}

/// `https://t.me/{username}?text=...`; a leading `@` is dropped
pub fn telegram_link(username: &str, message: &str) -> String {
    let username = username.trim_start_matches('@');
    format!("https://t.me/{}?text={}", username, encode_component(message))
}

/// `mailto:` link with subject and body
pub fn email_link(email: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        email,
        encode_component(subject),
        encode_component(body)
    )
}

/// Build every link from configured defaults, optionally with a custom message
pub fn messenger_links(config: &MessengerConfig, message: Option<&str>) -> MessengerLinks {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(&config.default_message);

    MessengerLinks {
        whatsapp: whatsapp_link(&config.whatsapp_phone, message),
        telegram: telegram_link(&config.telegram_username, message),
        email: email_link(&config.email, &config.email_subject, message),
    }
}
