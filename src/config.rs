// 配置管理

use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Clone)]
pub struct Config {
    /// 分析服務金鑰（OPENAI_API_KEY）
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// 輸入框字數上限
    pub max_chars: usize,
    /// 超過此字數時計數器變紅
    pub warn_chars: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            timeout_secs: 30,
            max_chars: 100,
            warn_chars: 90,
        }
    }

    /// 從環境變數讀取，未設定的項目使用預設值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        config.api_key = get("OPENAI_API_KEY");
        if let Some(url) = get("OPENAI_BASE_URL") {
            config.base_url = url;
        }
        if let Some(model) = get("FRLENS_MODEL") {
            config.model = model;
        }
        config
    }

    /// chat completions 端點
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_chars, 100);
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:8080/v1/"),
            ("FRLENS_MODEL", "  "),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
        // 空白值視為未設定
        assert_eq!(config.model, DEFAULT_MODEL);
    }
}
