//! # Conversation Controller
//!
//! The single state holder for a chat session. All state changes go through
//! the explicit transitions below; the TUI only reads the fields and calls
//! transitions. No UI types in here.
//!
//! ```text
//! ChatController
//! ├── messages: Vec<Message>       // current conversation, append-only
//! ├── input: String                // text being typed
//! ├── history: Vec<ChatHistory>    // past conversations, newest first
//! ├── is_history_open: bool        // side panel visibility
//! └── is_loading: bool             // guard against overlapping sends
//! ```
//!
//! A send is split into `begin_send` (synchronous: precondition check, user
//! message appended, input cleared) and `complete_send` (applies the settled
//! result). `send` composes the two around the client call; the TUI runs the
//! client call on a spawned task instead so the event loop keeps polling.

use log::warn;

use crate::api::client::{ApiError, ChatClient};
use crate::core::chat::{ChatHistory, Message};

/// Fixed user-visible reply when a request fails. The underlying error is
/// only logged, never shown verbatim.
pub const ERROR_REPLY: &str =
    "Sorry, there was an error processing your request. Please try again.";

/// Ticket for an in-flight send: the user message id and the trimmed text
/// that was submitted.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub id: String,
    pub text: String,
}

#[derive(Default)]
pub struct ChatController {
    pub messages: Vec<Message>,
    pub input: String,
    pub history: Vec<ChatHistory>,
    pub is_history_open: bool,
    pub is_loading: bool,
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a send: if the trimmed input is empty or a send is already in
    /// flight, this is a silent no-op. Otherwise sets the loading flag,
    /// appends the user message, clears the input, and returns the ticket.
    pub fn begin_send(&mut self) -> Option<PendingSend> {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.is_loading {
            return None;
        }

        let id = next_message_id();
        self.is_loading = true;
        self.messages.push(Message::user(id.clone(), text.clone()));
        self.input.clear();
        Some(PendingSend { id, text })
    }

    /// Apply the settled result of a send. On success the assistant message
    /// is appended and a snapshot of the full exchange is prepended to the
    /// history; on failure a fixed apology reply is appended and no history
    /// entry is created. Both arms clear the loading flag.
    pub fn complete_send(&mut self, pending: PendingSend, result: Result<String, ApiError>) {
        match result {
            Ok(reply) => {
                self.messages.push(Message::assistant(
                    format!("{}-response", pending.id),
                    reply.clone(),
                ));
                let snapshot = ChatHistory::snapshot(
                    pending.id,
                    &pending.text,
                    &reply,
                    self.messages.clone(),
                );
                self.history.insert(0, snapshot);
            }
            Err(err) => {
                warn!("Send failed: {}", err);
                self.messages.push(Message::assistant(
                    format!("{}-error", pending.id),
                    ERROR_REPLY.to_string(),
                ));
            }
        }
        self.is_loading = false;
    }

    /// Full send as one operation: used by library callers and tests. The
    /// TUI drives the same pair across a spawned task instead.
    pub async fn send(&mut self, client: &dyn ChatClient) {
        let Some(pending) = self.begin_send() else {
            return;
        };
        let result = client.complete(&pending.text).await;
        self.complete_send(pending, result);
    }

    /// Clear the conversation and prepend a placeholder history entry.
    /// Pure state mutation, no I/O.
    pub fn start_new_chat(&mut self) {
        self.messages.clear();
        self.history.insert(0, ChatHistory::placeholder(next_message_id()));
    }

    /// Replace the conversation with a copy of a saved entry's messages and
    /// close the panel. The clone keeps later edits from flowing back into
    /// the stored snapshot.
    pub fn load_chat_history(&mut self, entry: &ChatHistory) {
        self.messages = entry.messages.clone();
        self.is_history_open = false;
    }
}

/// Message ids are current-timestamp-derived strings (Unix millis).
fn next_message_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}
