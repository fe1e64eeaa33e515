use async_trait::async_trait;
use std::sync::Mutex;
use text_summarizer::{
    Error, Result, UpstreamError,
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, LlmClient, Usage},
};

/// Mock LLM client that replays scripted replies and records every request
pub struct MockLlmClient {
    replies: Mutex<Vec<std::result::Result<String, UpstreamError>>>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push(Ok(content.into()));
        self
    }

    pub fn with_error(self, error: UpstreamError) -> Self {
        self.replies.lock().unwrap().push(Err(error));
        self
    }

    pub fn get_requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(Error::internal("No more mock responses available"));
        }

        let content = replies.remove(0)?;
        Ok(ChatCompletionResponse {
            id: "mock-completion".to_string(),
            model: "mock-model".to_string(),
            choices: vec![Choice {
                index: 0,
                message: ChatMessage::assistant(content),
                finish_reason: Some("Stop".to_string()),
            }],
            usage: Some(Usage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
        })
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}
