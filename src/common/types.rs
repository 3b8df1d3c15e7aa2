use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped line typed by a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub text: String,
}

impl ChatMessage {
    pub fn new(
        timestamp: DateTime<Utc>,
        sender: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            text: text.into(),
        }
    }
}

/// Identity and message history for one registered email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    username: String,
    registered_at: DateTime<Utc>,
    messages: BTreeMap<DateTime<Utc>, ChatMessage>,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, registered_at: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            registered_at,
            messages: BTreeMap::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Messages in chronological order.
    pub fn messages(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.values()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Keyed by the message's own timestamp; a collision replaces the older
    /// entry and hands it back.
    pub fn add_message(&mut self, message: ChatMessage) -> Option<ChatMessage> {
        self.messages.insert(message.timestamp, message)
    }
}
