//! Chat thread rendering

use colored::Colorize;

use crate::domain::{ChatMessage, ChatRole, Conversation};

/// Shown while an advisor call is in flight
pub const LOADING: &str = "Curating galleries...";

pub fn render_message(message: &ChatMessage) -> String {
    match message.role {
        ChatRole::User => format!("{} {}", "you:".bright_green(), message.text),
        ChatRole::Model => format!("{} {}", "halfart:".bright_blue(), message.text),
    }
}

/// One line per message, text truncated to `width` characters
pub fn render_history(conversation: &Conversation, width: usize) -> String {
    conversation
        .messages()
        .iter()
        .enumerate()
        .map(|(i, msg)| {
            let role = match msg.role {
                ChatRole::User => "User".bright_green(),
                ChatRole::Model => "HALFART".bright_blue(),
            };
            let first_line = msg.text.lines().next().unwrap_or_default();
            let preview: String = first_line.chars().take(width).collect();
            let ellipsis = if msg.text.chars().count() > preview.chars().count() { "..." } else { "" };
            format!("  {}. {}: {}{}", i + 1, role, preview, ellipsis)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message() {
        assert!(render_message(&ChatMessage::user("hi")).ends_with(" hi"));
        assert!(render_message(&ChatMessage::model("hello")).contains("halfart:"));
    }

    #[test]
    fn test_history_truncates() {
        let mut conversation = Conversation::with_greeting();
        conversation.push(ChatMessage::user("short"));
        conversation.push(ChatMessage::model("a".repeat(80)));

        let out = render_history(&conversation, 10);
        assert_eq!(out.lines().count(), 3);
        assert!(out.contains("2. "));
        assert!(out.contains(": short"));
        assert!(out.contains(&format!("{}...", "a".repeat(10))));
    }
}
