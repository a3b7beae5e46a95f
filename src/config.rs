use crate::error::{ChatError, Result};
use serde::Deserialize;
use std::env;
use std::fs;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_CHAT_PATH: &str = "/api/chat";

/// Where the chat backend lives
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
}

fn default_chat_path() -> String {
    DEFAULT_CHAT_PATH.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            chat_path: default_chat_path(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("CHAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let chat_path = env::var("CHAT_PATH").unwrap_or_else(|_| default_chat_path());

        Ok(ClientConfig {
            base_url,
            chat_path,
        })
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ChatError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_toml(&contents)?;

        // Allow environment variables to override file config
        if let Ok(base_url) = env::var("CHAT_BASE_URL") {
            config.base_url = base_url;
        }

        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ChatError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ChatError::ConfigError("Base URL is empty".to_string()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ChatError::ConfigError(format!(
                "Base URL must use http or https: {}",
                self.base_url
            )));
        }

        if !self.chat_path.starts_with('/') {
            return Err(ChatError::ConfigError(format!(
                "Chat path must start with '/': {}",
                self.chat_path
            )));
        }

        Ok(())
    }

    /// Full URL of the chat endpoint
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.chat_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let valid_config = ClientConfig::new("http://localhost:8000");
        assert!(valid_config.validate().is_ok());

        let invalid_scheme = ClientConfig::new("localhost:8000");
        assert!(invalid_scheme.validate().is_err());

        let empty = ClientConfig::new("");
        assert!(empty.validate().is_err());

        let bad_path = ClientConfig {
            base_url: "https://chat.example.com".to_string(),
            chat_path: "api/chat".to_string(),
        };
        assert!(bad_path.validate().is_err());
    }

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            ClientConfig::new("http://localhost:8000/").endpoint_url(),
            "http://localhost:8000/api/chat"
        );
        assert_eq!(
            ClientConfig::default().endpoint_url(),
            "http://127.0.0.1:8000/api/chat"
        );
    }

    #[test]
    fn test_from_toml() {
        let config = ClientConfig::from_toml(r#"base_url = "https://chat.example.com""#).unwrap();
        assert_eq!(config.chat_path, "/api/chat");

        let config = ClientConfig::from_toml(
            r#"
            base_url = "http://10.0.0.2:9000"
            chat_path = "/v2/chat"
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint_url(), "http://10.0.0.2:9000/v2/chat");

        assert!(ClientConfig::from_toml("chat_path = \"/x\"").is_err());
    }
}
