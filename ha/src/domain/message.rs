//! Conversation messages

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Greeting the conversation opens with
pub const GREETING: &str = "Hello. I'm HALFART. Tell me where you are headed (e.g. Chelsea, Tribeca) \
                            and I'll scan for current exhibitions to suggest.";

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One entry in the conversation; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub text: String,
    /// Creation time (unix ms)
    pub timestamp: i64,
}

impl ChatMessage {
    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            role,
            text: text.into(),
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Create a message authored by the user
    pub fn user(text: impl Into<String>) -> Self {
        debug!("ChatMessage::user: called");
        Self::new(ChatRole::User, text)
    }

    /// Create a message authored by the advisor
    pub fn model(text: impl Into<String>) -> Self {
        debug!("ChatMessage::model: called");
        Self::new(ChatRole::Model, text)
    }
}

/// Append-only, chronologically ordered message log
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Conversation seeded with the greeting
    pub fn with_greeting() -> Self {
        Self {
            messages: vec![ChatMessage::model(GREETING)],
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        debug!(role = ?message.role, len = self.messages.len(), "Conversation::push: called");
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Count messages written by `role`
    pub fn count_by(&self, role: ChatRole) -> usize {
        self.messages.iter().filter(|m| m.role == role).count()
    }
}
