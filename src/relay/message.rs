use super::escape_markdown;
use crate::contact::ContactSubmission;

/// Render a submission as a Telegram MarkdownV2 message; every user field is escaped
pub fn format_contact_message(submission: &ContactSubmission) -> String {
    let mut lines = vec![
        "*Новая заявка Uralliance*".to_string(),
        String::new(),
        format!("*Имя:* {}", escape_markdown(&submission.name)),
        format!("*Email:* {}", escape_markdown(&submission.email)),
    ];

    if let Some(phone) = &submission.phone {
        lines.push(format!("*Телефон:* {}", escape_markdown(phone)));
    }

    lines.push(format!("*Направление:* {}", submission.service.label()));
    lines.push(String::new());
    lines.push("*Сообщение:*".to_string());
    lines.push(escape_markdown(&submission.message));

    lines.join("\n")
}
