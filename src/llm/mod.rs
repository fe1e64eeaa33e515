mod client;
mod types;

pub use client::{GeminiClient, LlmClient};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, Choice, Usage};
