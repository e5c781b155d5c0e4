//! 外部分類服務
//!
//! `ClassificationOracle` 只負責「送出請求、取回模型文字」，
//! 解析與驗證由 `FileClassifier` 處理，測試時可換成假的實作

use super::prompt::build_chat_body;
use crate::component::extractor::{ExtractedContent, FileMetadata, ImagePayload};
use crate::config::OracleSettings;
use anyhow::{Context, Result};
use log::info;
use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("empty response from model")]
    EmptyResponse,

    #[error("{0}")]
    Unavailable(String),
}

/// 送出的內容：文字或圖片
#[derive(Debug, Clone, PartialEq)]
pub enum RequestContent {
    Text { text: String, truncated: bool },
    Image(ImagePayload),
}

/// 一次分類請求
#[derive(Debug, Clone, PartialEq)]
pub struct OracleRequest {
    pub filename: String,
    pub extension: String,
    pub size_human: String,
    pub content: RequestContent,
}

impl OracleRequest {
    /// 抽取失敗的內容無法建立請求
    #[must_use]
    pub fn from_extraction(metadata: &FileMetadata, content: &ExtractedContent) -> Option<Self> {
        let content = match content {
            ExtractedContent::Text {
                content, truncated, ..
            } => RequestContent::Text {
                text: content.clone(),
                truncated: *truncated,
            },
            ExtractedContent::Image { payload } => RequestContent::Image(payload.clone()),
            ExtractedContent::Error { .. } => return None,
        };

        Some(Self {
            filename: metadata.filename.clone(),
            extension: metadata.extension.clone(),
            size_human: metadata.size_human.clone(),
            content,
        })
    }
}

pub trait ClassificationOracle {
    /// 回傳模型輸出的原始文字（預期為 JSON 物件）
    fn complete(&self, request: &OracleRequest) -> Result<String, OracleError>;
}

impl<O: ClassificationOracle + ?Sized> ClassificationOracle for &O {
    fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        (**self).complete(request)
    }
}

/// OpenAI 相容的 chat completions 端點
pub struct OpenAiOracle {
    client: Client,
    settings: OracleSettings,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

impl OpenAiOracle {
    pub fn new(settings: OracleSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

impl ClassificationOracle for OpenAiOracle {
    fn complete(&self, request: &OracleRequest) -> Result<String, OracleError> {
        let body = build_chat_body(&self.settings.model, request);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json()?;

        if let Some(usage) = &completion.usage {
            info!(
                "Tokens used for {}: prompt={}, completion={}",
                request.filename, usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(OracleError::EmptyResponse)
    }
}
