use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: ClientConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Settings for the hosted model. Immutable once loaded.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<SecretString>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.llm.validate()
    }
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(Error::config("max_tokens must be greater than 0"));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than 0"));
        }
        if self.model.trim().is_empty() {
            return Err(Error::config("model must not be empty"));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::config("base_url must not be empty"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Returns the API key once it passes the format check.
    ///
    /// Runs before any request is sent, so a missing or mangled key never
    /// reaches the network.
    pub fn credentials(&self) -> Result<&str> {
        let Some(secret) = self.api_key.as_ref() else {
            return Err(Error::config(
                "Google API Key not found. Please set the GOOGLE_API_KEY environment variable.",
            ));
        };

        let key = secret.expose_secret().trim();
        if key.is_empty() {
            return Err(Error::config(
                "Google API Key is empty. Please set the GOOGLE_API_KEY environment variable.",
            ));
        }
        if !(MIN_API_KEY_LEN..=MAX_API_KEY_LEN).contains(&key.len()) {
            return Err(Error::config(format!(
                "Google API Key is malformed: expected {}-{} characters",
                MIN_API_KEY_LEN, MAX_API_KEY_LEN
            )));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::config(
                "Google API Key is malformed: only letters, digits, '-' and '_' are allowed",
            ));
        }

        Ok(key)
    }
}

const MIN_API_KEY_LEN: usize = 8;
const MAX_API_KEY_LEN: usize = 128;

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            logs: LogsConfig::default(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config_with_key(key: &str) -> ClientConfig {
        ClientConfig {
            api_key: Some(SecretString::new(key.to_string())),
            ..ClientConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.max_tokens, 1024);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.model, "gemini-1.5-flash");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_missing_key_is_configuration_error() {
        let err = ClientConfig::default().credentials().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_blank_key_is_configuration_error() {
        assert!(config_with_key("   ").credentials().unwrap_err().is_configuration());
    }

    #[test]
    fn test_malformed_key_is_configuration_error() {
        assert!(config_with_key("short").credentials().is_err());
        assert!(config_with_key("has spaces in the middle").credentials().is_err());
        assert!(config_with_key("AIza$ymbols-not-allowed").credentials().is_err());
    }

    #[test]
    fn test_valid_key_is_trimmed() {
        let config = config_with_key("  AIzaSyTestKey_0123456789-abcdef  ");
        assert_eq!(
            config.credentials().unwrap(),
            "AIzaSyTestKey_0123456789-abcdef"
        );
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = config_with_key("AIzaSyTestKey_0123456789");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("AIzaSyTestKey_0123456789"));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let mut config = ClientConfig::default();
        config.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());

        assert!(ClientConfig::default().validate().is_ok());
    }
}
