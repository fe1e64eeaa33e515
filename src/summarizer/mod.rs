mod prompt;
pub mod text;
mod types;

pub use prompt::{SYSTEM_PROMPT, build_prompt, style_instruction};
pub use types::*;

use crate::{
    Error, Result, UpstreamError,
    llm::{ChatCompletionRequest, ChatMessage, LlmClient},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_name: String,
    pub provider: String,
    pub framework: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Turns a `SummaryRequest` into a single model call and shapes the reply.
///
/// Built once at startup and shared by every handler.
pub struct Summarizer {
    llm_client: Arc<dyn LlmClient>,
    temperature: f32,
    max_tokens: u32,
}

impl Summarizer {
    pub fn new(llm_client: Arc<dyn LlmClient>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            llm_client,
            temperature,
            max_tokens,
        }
    }

    pub async fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResult> {
        let request_id = Uuid::new_v4();
        self.summarize_with_id(request_id, request).await
    }

    pub async fn summarize_with_id(
        &self,
        request_id: Uuid,
        request: &SummaryRequest,
    ) -> Result<SummaryResult> {
        let cleaned = text::clean_input(request.text());
        if cleaned.is_empty() {
            return Err(Error::invalid_input(
                "Text contains nothing to summarize after cleaning",
            ));
        }

        info!(
            "[{}] Summarizing {} words as {} in {} (max {} words)",
            request_id,
            text::count_words(&cleaned),
            request.style(),
            request.language(),
            request.max_words()
        );

        let chat_request = ChatCompletionRequest {
            messages: vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(build_prompt(
                    &cleaned,
                    request.style(),
                    request.max_words(),
                    request.language(),
                )),
            ],
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
        };

        let response = self.llm_client.create_chat_completion(chat_request).await?;
        if let Some(usage) = &response.usage {
            debug!(
                "[{}] Token usage: {} prompt, {} completion",
                request_id, usage.prompt_tokens, usage.completion_tokens
            );
        }

        let raw = response
            .first_content()
            .ok_or(UpstreamError::EmptyResponse)?;

        let summary_text = self.shape(raw, request)?;
        let word_count = text::count_words(&summary_text);

        info!(
            "[{}] Summary generated with {} words",
            request_id, word_count
        );

        Ok(SummaryResult {
            summary_text,
            word_count,
        })
    }

    fn shape(&self, raw: &str, request: &SummaryRequest) -> Result<String> {
        let mut summary = text::strip_unwanted_prefixes(raw);

        if request.style() == SummaryStyle::BulletPoints {
            summary = text::normalize_bullets(&summary);
        }

        let ceiling = text::word_ceiling(request.max_words());
        if text::count_words(&summary) > ceiling {
            warn!(
                "Summary overshot {} words (ceiling {}), truncating",
                request.max_words(),
                ceiling
            );
            summary = text::truncate_words(&summary, ceiling);
        }

        if summary.trim().is_empty() {
            return Err(UpstreamError::EmptyResponse.into());
        }

        Ok(summary)
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.llm_client.model().to_string(),
            provider: "Google".to_string(),
            framework: "async-openai".to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
