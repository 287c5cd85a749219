//! EchoGPT chat-completions client.
//!
//! One `POST {base_url}/chat/completions` per user turn, authenticated with
//! a static `x-api-key` header. Rate-limited requests (HTTP 429) are retried
//! through [`retry_with_backoff`]; everything else propagates to the caller
//! on first occurrence.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::api::retry::{
    DEFAULT_INITIAL_DELAY_MS, DEFAULT_RETRIES, Recoverable, retry_with_backoff,
};
use crate::api::types::{ChatRequest, ChatResponse, RequestMessage, RequestRole};

/// Model identifier sent with every request.
pub const MODEL_NAME: &str = "EchoGPT";
/// Fixed system preamble prepended to every request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
/// Placeholder reply when a success response carries no usable content.
pub const FALLBACK_REPLY: &str = "No response received";

/// Errors that can occur while talking to the completion endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The service returned an error response. Retryable only for 429.
    Api { status: u16, message: String },
    /// Failed to decode the response body.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl Recoverable for ApiError {
    fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::Api { status: 429, .. })
    }
}

/// Seam between the controller and the HTTP layer; tests substitute a stub.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Completes a single user turn, returning the assistant's reply text.
    async fn complete(&self, user_text: &str) -> Result<String, ApiError>;
}

/// Production client for the EchoGPT API.
pub struct EchoGptClient {
    base_url: String,
    api_key: String,
    retries: u32,
    initial_delay: Duration,
    client: reqwest::Client,
}

impl EchoGptClient {
    /// An empty or wrong API key is not rejected here; it surfaces as an
    /// authentication failure from the service.
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            base_url,
            api_key,
            retries: DEFAULT_RETRIES,
            initial_delay: Duration::from_millis(DEFAULT_INITIAL_DELAY_MS),
            client: reqwest::Client::new(),
        }
    }

    /// Override the rate-limit retry policy (budget and first delay).
    pub fn with_retry_policy(mut self, retries: u32, initial_delay: Duration) -> Self {
        self.retries = retries;
        self.initial_delay = initial_delay;
        self
    }

    /// One request attempt, no retry.
    async fn complete_once(&self, user_text: &str) -> Result<String, ApiError> {
        let request = ChatRequest {
            messages: vec![
                RequestMessage {
                    role: RequestRole::System,
                    content: SYSTEM_PROMPT.to_string(),
                },
                RequestMessage {
                    role: RequestRole::User,
                    content: user_text.to_string(),
                },
            ],
            model: MODEL_NAME.to_string(),
        };

        info!(
            "EchoGPT request: model={}, {} chars of user input",
            MODEL_NAME,
            user_text.len()
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        debug!("EchoGPT response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("EchoGPT API error: {} - {}", status, message);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(completion
            .first_content()
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}

#[async_trait]
impl ChatClient for EchoGptClient {
    async fn complete(&self, user_text: &str) -> Result<String, ApiError> {
        retry_with_backoff(
            || self.complete_once(user_text),
            self.retries,
            self.initial_delay,
        )
        .await
    }
}
