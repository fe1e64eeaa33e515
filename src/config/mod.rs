mod types;

pub use types::*;

use crate::Result;
use secrecy::SecretString;
use std::env;
use tracing::{debug, info};

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let api_key = env::var("GOOGLE_API_KEY").ok();

    load_from(explicit_path.as_deref(), api_key).await
}

/// Loads YAML from `path`, or from `config.yaml` when present, then applies
/// the API key override.
pub async fn load_from(path: Option<&str>, api_key: Option<String>) -> Result<Config> {
    // Only an explicitly named file has to exist
    let default_exists = path.is_none()
        && tokio::fs::try_exists(DEFAULT_CONFIG_PATH)
            .await
            .unwrap_or(false);
    let source = path.or(default_exists.then_some(DEFAULT_CONFIG_PATH));

    let mut config = match source {
        Some(path) => {
            debug!("Loading configuration from: {}", path);
            parse(&tokio::fs::read_to_string(path).await?)?
        }
        None => {
            info!("No configuration file found, using defaults");
            Config::default()
        }
    };

    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.llm.api_key = Some(SecretString::new(key));
    }

    config.validate()?;

    Ok(config)
}

pub fn parse(yaml: &str) -> Result<Config> {
    // An empty document deserializes to unit, not to a struct with defaults
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(yaml)?)
}
