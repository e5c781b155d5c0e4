use super::oracle::{ClassificationOracle, OracleError, OracleRequest};
use super::response::{ResponseError, parse_response};
use super::types::ClassificationResult;
use crate::component::extractor::{ExtractedContent, FileMetadata};
use log::{error, warn};
use serde_json::{Map, Value};
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// 預設最多送出兩次（第一次加一次重試）
pub const DEFAULT_MAX_ATTEMPTS: usize = 2;

/// 每次呼叫後的固定延遲，避免超過外部速率限制
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
enum ClassifyError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Response(#[from] ResponseError),

    #[error("content could not be extracted: {0}")]
    Unextractable(String),
}

/// 以外部分類服務分類檔案，永遠回傳合法結果
pub struct FileClassifier<O> {
    oracle: O,
    max_attempts: usize,
    pacing: Duration,
}

impl<O: ClassificationOracle> FileClassifier<O> {
    pub fn new(oracle: O) -> Self {
        Self {
            oracle,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            pacing: DEFAULT_PACING,
        }
    }

    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// 分類一個檔案；所有失敗都降級為兜底結果
    pub fn classify(
        &self,
        metadata: &FileMetadata,
        content: &ExtractedContent,
    ) -> ClassificationResult {
        match self.request_classification(metadata, content) {
            Ok(raw) => ClassificationResult::from_raw(&raw),
            Err(e) => {
                error!("Classification failed for {}: {e}", metadata.filename);
                ClassificationResult::fallback(&e.to_string())
            }
        }
    }

    fn request_classification(
        &self,
        metadata: &FileMetadata,
        content: &ExtractedContent,
    ) -> Result<Map<String, Value>, ClassifyError> {
        let request = match (OracleRequest::from_extraction(metadata, content), content) {
            (Some(request), _) => request,
            (None, ExtractedContent::Error { message }) => {
                return Err(ClassifyError::Unextractable(message.clone()));
            }
            (None, _) => return Err(ClassifyError::Unextractable(String::new())),
        };

        let mut attempt = 1;
        loop {
            match self.attempt(&request) {
                Ok(raw) => return Ok(raw),
                Err(e) if attempt < self.max_attempts => {
                    warn!(
                        "Attempt {attempt}/{} failed for {}: {e}, retrying",
                        self.max_attempts, metadata.filename
                    );
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn attempt(&self, request: &OracleRequest) -> Result<Map<String, Value>, ClassifyError> {
        let text = self.oracle.complete(request)?;
        if !self.pacing.is_zero() {
            thread::sleep(self.pacing);
        }
        Ok(parse_response(&text)?)
    }
}
