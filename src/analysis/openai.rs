//! OpenAI 相容的 chat completions 客戶端
//!
//! 一次分析就是一次同步請求：系統指令 + 使用者句子，要求 JSON 物件輸出。
//! 逾時與連線錯誤都轉為 `AnalysisError`，不重試。

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::prompt::SYSTEM_PROMPT;
use super::{into_result, AnalysisError, Analyzer};
use crate::config::Config;
use crate::model::{AnalysisResponse, AnalysisResult};

const USER_AGENT: &str = concat!("frlens/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// chat completions 分析客戶端
pub struct OpenAiClient {
    client: reqwest::blocking::Client,
    url: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    max_chars: usize,
    timeout_secs: u64,
}

impl OpenAiClient {
    /// 建立客戶端；缺少金鑰不在此報錯，而是在分析時回傳 `MissingApiKey`
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: config.completions_url(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_chars: config.max_chars,
            timeout_secs: config.timeout_secs,
        })
    }

    pub(crate) fn build_request<'a>(&'a self, sentence: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: sentence,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: self.temperature,
        }
    }

    fn map_transport_error(&self, err: reqwest::Error) -> AnalysisError {
        if err.is_timeout() {
            AnalysisError::Timeout(self.timeout_secs)
        } else {
            AnalysisError::Request(err.to_string())
        }
    }
}

impl Analyzer for OpenAiClient {
    fn analyze(&self, sentence: &str) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self.api_key.as_deref().ok_or(AnalysisError::MissingApiKey)?;
        let sentence = super::validate_sentence(sentence, self.max_chars)?;

        log::info!("analyzing {} chars with {}", sentence.chars().count(), self.model);
        let started = Instant::now();

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&self.build_request(sentence))
            .send()
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        log::debug!("service answered HTTP {} in {:?}", status, started.elapsed());
        if !status.is_success() {
            log::error!("analysis request failed with HTTP {}", status);
            return Err(AnalysisError::Status(status.as_u16()));
        }

        let body = response.text().map_err(|e| self.map_transport_error(e))?;
        let parsed = parse_completion(&body).inspect_err(|e| {
            log::error!("could not parse analysis response: {}", e);
        })?;

        into_result(parsed, sentence)
    }
}

/// 從 chat completions 回應本文取出 `AnalysisResponse`
///
/// 模型輸出的 JSON 在 `choices[0].message.content` 裡，是一個字串。
pub fn parse_completion(body: &str) -> Result<AnalysisResponse, AnalysisError> {
    let completion: ChatResponse = serde_json::from_str(body)?;
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| AnalysisError::MalformedResponse("completion has no content".to_string()))?;

    Ok(serde_json::from_str(&content)?)
}
