//! Wire types for the EchoGPT chat-completions endpoint.
//!
//! Request: `{ messages: [{role, content}, ...], model }`.
//! Response: `{ choices: [{ message: { content } }, ...] }`. Only
//! `choices[0]` is consulted, and every level may be missing or null.

use serde::{Deserialize, Serialize};

/// Role of a request message (OpenAI terminology).
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestRole {
    System,
    User,
}

/// A single message in the request array.
#[derive(Serialize, Debug, Clone)]
pub struct RequestMessage {
    pub role: RequestRole,
    pub content: String,
}

/// The request body for the chat-completions endpoint.
#[derive(Serialize, Debug)]
pub struct ChatRequest {
    pub messages: Vec<RequestMessage>,
    pub model: String,
}

/// The response body. `choices` defaults to empty when absent.
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Choice {
    #[serde(default)]
    pub message: ResponseMessage,
}

#[derive(Deserialize, Debug, Default)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// The first choice's message content. `None` when there are no
    /// choices, no content, or the content is empty; callers substitute
    /// the fallback string.
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
    }
}
