//! 句子分析服務邊界
//!
//! `Analyzer` 是 UI 與外部分析服務之間唯一的介面：
//! - `OpenAiClient`：呼叫 OpenAI 相容的 chat completions 端點
//! - `ReplayAnalyzer`：讀取已存檔的回應（離線展示與測試用）

mod error;
mod openai;
mod prompt;
mod replay;

pub use error::{AnalysisError, SERVICE_FAILED_MESSAGE};
pub use openai::{parse_completion, OpenAiClient};
pub use prompt::SYSTEM_PROMPT;
pub use replay::ReplayAnalyzer;

use crate::model::{AnalysisResponse, AnalysisResult};

/// 把一個法語句子交給外部服務分析
pub trait Analyzer {
    fn analyze(&self, sentence: &str) -> Result<AnalysisResult, AnalysisError>;
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn analyze(&self, sentence: &str) -> Result<AnalysisResult, AnalysisError> {
        (**self).analyze(sentence)
    }
}

/// 檢查輸入：不可為空白，字數（以字元計）不可超過上限
pub fn validate_sentence(sentence: &str, max_chars: usize) -> Result<&str, AnalysisError> {
    let trimmed = sentence.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidInput);
    }

    let len = sentence.chars().count();
    if len > max_chars {
        return Err(AnalysisError::TooLong {
            len,
            max: max_chars,
        });
    }

    Ok(trimmed)
}

/// 把服務回應轉為結果；`error` 狀態視為拒絕
///
/// 回應缺少原句時以送出的句子補上，確保組合器有文字可切分。
pub(crate) fn into_result(
    response: AnalysisResponse,
    sentence: &str,
) -> Result<AnalysisResult, AnalysisError> {
    match response {
        AnalysisResponse::Success(mut result) => {
            if result.source_sentence.trim().is_empty() {
                result.source_sentence = sentence.to_string();
            }
            Ok(result)
        }
        AnalysisResponse::Error { message } => Err(AnalysisError::Rejected(message)),
    }
}
