//! # Chat Records
//!
//! The two flat record types of the data model: a [`Message`] is one turn in
//! a conversation, a [`ChatHistory`] is an immutable snapshot of a past
//! conversation shown in the side panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length (in characters) before an ellipsis is appended.
pub const TITLE_MAX_CHARS: usize = 30;
/// Maximum last-message preview length before an ellipsis is appended.
pub const LAST_MESSAGE_MAX_CHARS: usize = 50;

/// Placeholder title for a freshly started conversation.
pub const NEW_CHAT_TITLE: &str = "New Chat";
/// Placeholder preview for a freshly started conversation.
pub const NEW_CHAT_PREVIEW: &str = "Start a new conversation";

/// Author of a chat turn.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in a conversation. Immutable once created; identity is `id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn user(id: String, content: String) -> Self {
        Self {
            id,
            content,
            role: Role::User,
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(id: String, content: String) -> Self {
        Self {
            id,
            content,
            role: Role::Assistant,
            timestamp: Utc::now(),
        }
    }
}

/// An immutable record of a past conversation.
///
/// `messages` is an independent copy taken at creation time: later mutation
/// of the live conversation never changes a saved entry.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatHistory {
    pub id: String,
    pub title: String,
    pub last_message: String,
    pub timestamp: DateTime<Utc>,
    pub messages: Vec<Message>,
}

impl ChatHistory {
    /// Snapshot a completed exchange: title from the user's text, preview
    /// from the assistant's reply, `messages` owned by the entry.
    pub fn snapshot(id: String, user_text: &str, reply: &str, messages: Vec<Message>) -> Self {
        Self {
            id,
            title: truncate_with_ellipsis(user_text, TITLE_MAX_CHARS),
            last_message: truncate_with_ellipsis(reply, LAST_MESSAGE_MAX_CHARS),
            timestamp: Utc::now(),
            messages,
        }
    }

    /// Placeholder entry prepended when the user starts a new chat.
    pub fn placeholder(id: String) -> Self {
        Self {
            id,
            title: NEW_CHAT_TITLE.to_string(),
            last_message: NEW_CHAT_PREVIEW.to_string(),
            timestamp: Utc::now(),
            messages: Vec::new(),
        }
    }
}

/// Truncate to `max_chars` characters, appending `...` only when something
/// was cut. Counts chars, not bytes, so multibyte input never splits a
/// code point.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(max_chars).collect();
        truncated.push_str("...");
        truncated
    }
}
