//! 分析服務錯誤類型

use thiserror::Error;

/// 服務呼叫失敗時顯示給使用者的通用訊息
pub const SERVICE_FAILED_MESSAGE: &str = "AI service invocation failed.";

/// 分析服務可能發生的錯誤
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// 沒有設定 OPENAI_API_KEY
    #[error("OPENAI_API_KEY is missing")]
    MissingApiKey,

    /// 輸入為空白
    #[error("sentence is empty")]
    InvalidInput,

    /// 輸入超過字數上限
    #[error("sentence has {len} characters (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("request failed: {0}")]
    Request(String),

    /// 服務回傳非 2xx 狀態碼
    #[error("service returned HTTP {0}")]
    Status(u16),

    /// 回應無法解析為分析結果
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// 服務拒絕分析（例如輸入不是法語），附帶服務自己的訊息
    #[error("{0}")]
    Rejected(String),

    #[error("failed to read analysis file: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// 顯示在錯誤列上的單行訊息
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::MissingApiKey => {
                "Server configuration error: OPENAI_API_KEY is missing.".to_string()
            }
            AnalysisError::InvalidInput => "Invalid input.".to_string(),
            AnalysisError::TooLong { max, .. } => {
                format!("Invalid input: at most {} characters.", max)
            }
            AnalysisError::Rejected(message) if !message.trim().is_empty() => message.clone(),
            _ => SERVICE_FAILED_MESSAGE.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::MalformedResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AnalysisError::MissingApiKey.user_message(),
            "Server configuration error: OPENAI_API_KEY is missing."
        );
        assert_eq!(AnalysisError::InvalidInput.user_message(), "Invalid input.");
        assert_eq!(
            AnalysisError::Rejected("请仅输入法语句子。".to_string()).user_message(),
            "请仅输入法语句子。"
        );
        assert_eq!(
            AnalysisError::Status(502).user_message(),
            SERVICE_FAILED_MESSAGE
        );
        assert_eq!(
            AnalysisError::Timeout(30).user_message(),
            SERVICE_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_empty_rejection_falls_back() {
        assert_eq!(
            AnalysisError::Rejected(String::new()).user_message(),
            SERVICE_FAILED_MESSAGE
        );
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err: AnalysisError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }
}
