//! 分析結果資料模型
//!
//! 對應分析服務回傳的 JSON 結構。上游資料不一定完整，
//! 缺少或為 null 的欄位一律反序列化為預設值，不視為錯誤。

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::highlight::{compose, Segment};

/// 中文解析缺失時的預設文字
pub const MISSING_CN_EXPLANATION: &str = "暂无中文解析";

/// 把 null 當作預設值處理
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// 關鍵詞詞性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeywordType {
    Verb,
    Noun,
    /// 其他標籤原樣保留（例如 ADJ、PREP）
    Other(String),
}

impl KeywordType {
    pub fn as_str(&self) -> &str {
        match self {
            KeywordType::Verb => "VERB",
            KeywordType::Noun => "NOUN",
            KeywordType::Other(tag) => tag,
        }
    }
}

impl Default for KeywordType {
    fn default() -> Self {
        KeywordType::Other(String::new())
    }
}

impl From<String> for KeywordType {
    fn from(tag: String) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "VERB" => KeywordType::Verb,
            "NOUN" => KeywordType::Noun,
            other => KeywordType::Other(other.to_string()),
        }
    }
}

impl From<KeywordType> for String {
    fn from(kind: KeywordType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for KeywordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 例句（法 / 英 / 中）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fr: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub en: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cn: String,
}

/// 單一關鍵詞的語法註解
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAnnotation {
    /// 原句中的字面子字串；空字串表示上游資料有缺
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: KeywordType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub examples: Vec<ExampleEntry>,
}

impl KeywordAnnotation {
    pub fn new(word: impl Into<String>, kind: KeywordType) -> Self {
        Self {
            word: word.into(),
            kind,
            ..Self::default()
        }
    }
}

/// 以英文為樞紐語言的句構解析
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnglishAnalysis {
    #[serde(default)]
    pub literal_translation: Option<String>,
    #[serde(default)]
    pub grammar_explanation_en: Option<String>,
    #[serde(default)]
    pub grammar_explanation_cn: Option<String>,
    /// 舊版回應只有這個欄位
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar_explanation: Option<String>,
}

impl EnglishAnalysis {
    /// 英文解析，缺失時退回舊欄位
    pub fn grammar_en(&self) -> Option<&str> {
        non_blank(self.grammar_explanation_en.as_deref())
            .or_else(|| non_blank(self.grammar_explanation.as_deref()))
    }

    /// 中文解析，缺失時顯示預設文字
    pub fn grammar_cn(&self) -> &str {
        non_blank(self.grammar_explanation_cn.as_deref()).unwrap_or(MISSING_CN_EXPLANATION)
    }

    pub fn literal(&self) -> Option<&str> {
        non_blank(self.literal_translation.as_deref())
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// 成功的分析結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_sentence: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chinese_translation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub english_analysis: EnglishAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<KeywordAnnotation>,
}

impl AnalysisResult {
    /// 組合可互動的句子片段
    pub fn segments(&self) -> Vec<Segment<'_>> {
        compose(&self.source_sentence, &self.keywords)
    }
}

/// 服務回應外層，以 `status` 欄位區分
///
/// 只有 `status` 為 `error` 時才視為拒絕；缺少 `status` 或其他值都當成分析結果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AnalysisResponse {
    Success(AnalysisResult),
    Error {
        #[serde(default)]
        message: String,
    },
}

impl<'de> Deserialize<'de> for AnalysisResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let is_error = value
            .get("status")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|status| status.trim().eq_ignore_ascii_case("error"));

        if is_error {
            let message = value
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Ok(AnalysisResponse::Error { message });
        }

        AnalysisResult::deserialize(value)
            .map(AnalysisResponse::Success)
            .map_err(serde::de::Error::custom)
    }
}
