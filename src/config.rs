use crate::ai_provider::AiProvider;
use crate::error::{CivicAiError, Result};
use civic_ai_common::types::DEFAULT_FALLBACK_CATEGORY;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 事前学習済みキャプションモデル
pub const DEFAULT_MODEL: &str = "Salesforce/blip-image-captioning-base";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: AiProvider,
    pub model: String,
    pub api_base: String,
    pub api_key: Option<String>,
    pub max_image_size: u32,
    pub max_upload_bytes: usize,
    pub timeout_seconds: u64,
    pub bind_addr: String,
    pub fallback_category: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: AiProvider::Blip,
            model: DEFAULT_MODEL.into(),
            api_base: "https://api-inference.huggingface.co/models".into(),
            api_key: None,
            max_image_size: 1024,
            max_upload_bytes: 20 * 1024 * 1024,
            timeout_seconds: 120,
            bind_addr: "0.0.0.0:5000".into(),
            fallback_category: DEFAULT_FALLBACK_CATEGORY.into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// 指定パスのJSONから読み込み（欠けている項目はデフォルト値）
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CivicAiError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("civic-ai").join("config.json"))
    }

    pub fn get_api_key(&self) -> Option<String> {
        // 環境変数を優先
        if let Ok(key) = std::env::var("HF_TOKEN") {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }

        self.api_key.clone()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .map_err(|e| CivicAiError::Config(format!("invalid bind_addr ({}): {}", self.bind_addr, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider, AiProvider::Blip);
        assert_eq!(config.model, "Salesforce/blip-image-captioning-base");
        assert_eq!(config.fallback_category, "Others");
        assert_eq!(config.socket_addr().unwrap().port(), 5000);
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"provider": "claude", "bind_addr": "127.0.0.1:8080"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.provider, AiProvider::Claude);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.max_image_size, 1024);
        assert_eq!(config.fallback_category, "Others");
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ invalid").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(CivicAiError::JsonParse(_))));
    }

    #[test]
    fn test_invalid_bind_addr() {
        let config = Config {
            bind_addr: "not-an-address".into(),
            ..Default::default()
        };
        assert!(matches!(config.socket_addr(), Err(CivicAiError::Config(_))));
    }
}
