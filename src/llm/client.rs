use super::types::*;
use crate::{Error, Result, UpstreamError, config::ClientConfig};
use async_openai::{Client, config::OpenAIConfig, types as openai_types};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse>;

    fn model(&self) -> &str;
}

/// Talks to Gemini through its OpenAI-compatible chat completions endpoint.
pub struct GeminiClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn openai_client(&self, api_key: &str) -> Client<OpenAIConfig> {
        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(self.config.base_url.trim_end_matches('/'));

        // One attempt per call: the retry window closes before the first retry
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Client::with_config(openai_config)
            .with_http_client(self.http.clone())
            .with_backoff(no_retry)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let api_key = self.config.credentials()?;
        let client = self.openai_client(api_key);

        debug!(
            "Creating chat completion with {} messages against model {}",
            request.messages.len(),
            self.config.model
        );

        let mut messages = Vec::new();
        for msg in &request.messages {
            messages.push(msg.to_openai_message()?);
        }

        let mut request_builder = openai_types::CreateChatCompletionRequestArgs::default();
        request_builder
            .model(&self.config.model)
            .messages(messages)
            .temperature(request.temperature.unwrap_or(self.config.temperature))
            .max_tokens(request.max_tokens.unwrap_or(self.config.max_tokens));

        let openai_request = request_builder
            .build()
            .map_err(|e| Error::internal(format!("Failed to build chat request: {}", e)))?;

        let seconds = self.config.timeout_seconds;
        let response =
            match tokio::time::timeout(self.config.timeout(), client.chat().create(openai_request))
                .await
            {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    warn!("Chat completion failed: {}", e);
                    return Err(UpstreamError::from(e).with_timeout_seconds(seconds).into());
                }
                Err(_) => {
                    warn!("Chat completion exceeded the {}s deadline", seconds);
                    return Err(UpstreamError::Timeout { seconds }.into());
                }
            };

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let choices: Vec<Choice> = response
            .choices
            .into_iter()
            .map(|choice| Choice {
                index: choice.index,
                message: ChatMessage::assistant(choice.message.content.unwrap_or_default()),
                finish_reason: choice.finish_reason.map(|fr| format!("{fr:?}")),
            })
            .collect();

        let usage = response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatCompletionResponse {
            id: response.id,
            model: response.model,
            choices,
            usage,
        })
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}
