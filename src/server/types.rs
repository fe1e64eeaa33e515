use crate::summarizer::TextStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub max_words: Option<u32>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub request_id: String,
    pub summary: String,
    pub word_count: usize,
    pub stats: TextStats,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct DownloadForm {
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
