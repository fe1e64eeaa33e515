use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures reported by (or on the way to) the hosted model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    #[error("Request timed out after {seconds}s. Please try again with shorter text or check your internet connection.")]
    Timeout { seconds: u64 },

    #[error("API quota exceeded. Please check your Google Cloud billing and quota limits. ({0})")]
    QuotaExceeded(String),

    #[error("Authentication failed. Please verify your Google API key is correct and has proper permissions. ({0})")]
    Authentication(String),

    #[error("Generated summary is empty")]
    EmptyResponse,

    #[error("Summarization failed: {0}")]
    Request(String),
}

impl UpstreamError {
    /// Classifies a raw provider or transport message.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();

        if lowered.contains("quota") || lowered.contains("resource_exhausted") || lowered.contains("exhausted") {
            Self::QuotaExceeded(message)
        } else if lowered.contains("authentication")
            || lowered.contains("api key")
            || lowered.contains("api_key")
            || lowered.contains("unauthorized")
            || lowered.contains("permission")
        {
            Self::Authentication(message)
        } else if lowered.contains("timeout") || lowered.contains("timed out") {
            // Seconds are unknown here; callers with a deadline build Timeout directly
            Self::Timeout { seconds: 0 }
        } else {
            Self::Request(message)
        }
    }

    /// Fills in the deadline on a `Timeout` classified without one.
    pub fn with_timeout_seconds(self, seconds: u64) -> Self {
        match self {
            Self::Timeout { .. } => Self::Timeout { seconds },
            other => other,
        }
    }
}

/// Pulls `error.message` out of a raw error body. async-openai passes 5xx
/// bodies through unparsed, and Gemini sometimes wraps the object in an array.
fn provider_message(raw: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    let body = parsed
        .as_array()
        .and_then(|entries| entries.first())
        .unwrap_or(&parsed);

    body.pointer("/error/message")?
        .as_str()
        .map(str::to_string)
}

impl From<async_openai::error::OpenAIError> for UpstreamError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;

        match err {
            OpenAIError::Reqwest(e) if e.is_timeout() => Self::Timeout { seconds: 0 },
            OpenAIError::Reqwest(e) => Self::classify(e.to_string()),
            OpenAIError::ApiError(api) => {
                Self::classify(provider_message(&api.message).unwrap_or(api.message))
            }
            OpenAIError::JSONDeserialize(e) => {
                Self::Request(format!("invalid response payload: {}", e))
            }
            other => Self::classify(other.to_string()),
        }
    }
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream(UpstreamError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_quota() {
        let err = UpstreamError::classify("Resource has been exhausted (e.g. check quota).");
        assert!(matches!(err, UpstreamError::QuotaExceeded(_)));
    }

    #[test]
    fn test_classify_authentication() {
        let err = UpstreamError::classify("API key not valid. Please pass a valid API key.");
        assert!(matches!(err, UpstreamError::Authentication(_)));
    }

    #[test]
    fn test_classify_fallback() {
        let err = UpstreamError::classify("model overloaded");
        assert_eq!(err, UpstreamError::Request("model overloaded".to_string()));
    }

    #[test]
    fn test_provider_message_from_raw_body() {
        let raw = r#"{"error":{"code":null,"message":"boom","param":null,"type":"server_error"}}"#;
        assert_eq!(provider_message(raw).as_deref(), Some("boom"));

        let wrapped = r#"[{"error":{"code":503,"message":"The model is overloaded.","status":"UNAVAILABLE"}}]"#;
        assert_eq!(
            provider_message(wrapped).as_deref(),
            Some("The model is overloaded.")
        );

        assert_eq!(provider_message("backend unavailable"), None);
    }

    #[test]
    fn test_raw_json_api_error_is_unwrapped() {
        use async_openai::error::{ApiError, OpenAIError};

        let err = UpstreamError::from(OpenAIError::ApiError(ApiError {
            message: r#"{"error":{"code":null,"message":"boom","type":"server_error"}}"#
                .to_string(),
            r#type: None,
            param: None,
            code: None,
        }));
        assert_eq!(err, UpstreamError::Request("boom".to_string()));
        assert_eq!(err.to_string(), "Summarization failed: boom");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::invalid_input("empty").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::config("missing key").status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            Error::from(UpstreamError::Timeout { seconds: 30 }).status_code(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            Error::from(UpstreamError::EmptyResponse).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            Error::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_display_is_prefixed() {
        let err = Error::from(UpstreamError::EmptyResponse);
        assert_eq!(err.to_string(), "Upstream error: Generated summary is empty");
    }
}
