//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use crate::errors::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the donation platform backend
    pub api_base_url: String,
    /// Opaque shard-routing value appended as `shardKey=` to most calls
    pub shard_key: String,
    /// Path of the file holding the signed-in identity triple
    pub session_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_base_url = env_var("DONATIONS_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "DONATIONS_API_URL must be an http(s) URL, got {api_base_url:?}"
            )));
        }

        Ok(Config {
            api_base_url,
            shard_key: env_var("DONATIONS_SHARD_KEY").unwrap_or_else(|_| "test".to_string()),
            session_file: env_var("DONATIONS_SESSION_FILE")
                .unwrap_or_else(|_| "./.donations_session.json".to_string())
                .into(),
        })
    }
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| ClientError::Config(format!("Missing env var: {key}")))
}
