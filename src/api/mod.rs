pub mod client;
pub mod retry;
pub mod types;

pub use client::{ApiError, ChatClient, EchoGptClient};
pub use retry::{Recoverable, retry_with_backoff};
pub use types::{ChatRequest, ChatResponse, RequestMessage};
