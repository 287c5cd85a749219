//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::client::{ApiError, ChatClient};

/// A scripted client for tests that don't need real HTTP calls.
/// Pops one result per `complete` call; repeats the last reply when the
/// script runs out.
pub struct StubClient {
    script: Mutex<VecDeque<Result<String, ApiError>>>,
    fallback: String,
}

impl StubClient {
    /// Always replies with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: reply.to_string(),
        }
    }

    /// Fails the first call with `err`.
    pub fn failing(err: ApiError) -> Self {
        Self {
            script: Mutex::new(VecDeque::from([Err(err)])),
            fallback: String::from("ok"),
        }
    }
}

#[async_trait]
impl ChatClient for StubClient {
    async fn complete(&self, _user_text: &str) -> Result<String, ApiError> {
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}
