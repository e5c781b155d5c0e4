//! 模型回應的解析與正規化

use super::types::ClassificationResult;
use crate::config::Category;
use log::warn;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("no JSON object found in response")]
    MissingObject,

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response JSON is not an object")]
    NotAnObject,
}

/// 從回應文字中找出 JSON 物件（可能包在 ``` 區塊中）
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.starts_with('{') {
        return Some(text);
    }

    if let Some(start) = text.find("```") {
        let block_start = start + 3;
        let content_start = text[block_start..]
            .find('\n')
            .map_or(block_start, |i| block_start + i + 1);
        if let Some(end) = text[content_start..].find("```") {
            let block = text[content_start..content_start + end].trim();
            if block.starts_with('{') {
                return Some(block);
            }
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

pub fn parse_response(text: &str) -> Result<Map<String, Value>, ResponseError> {
    let json = extract_json_object(text).ok_or(ResponseError::MissingObject)?;
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        _ => Err(ResponseError::NotAnObject),
    }
}

/// 非數字或缺少時為 0.0，最後夾在 [0, 1]
fn coerce_confidence(value: Option<&Value>) -> f64 {
    let confidence = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, 1.0)
}

fn coerce_category(value: Option<&Value>) -> Category {
    let label = value.and_then(Value::as_str);
    match label.and_then(Category::from_label) {
        Some(category) => category,
        None => {
            warn!("Invalid category '{}', mapping to Autre", label.unwrap_or("<missing>"));
            Category::Other
        }
    }
}

fn string_field(raw: &Map<String, Value>, key: &str, default: &str) -> String {
    match raw.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

impl ClassificationResult {
    /// 由模型原始輸出建立結果，並套用所有不變條件
    #[must_use]
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        Self {
            category: coerce_category(raw.get("category")),
            confidence: coerce_confidence(raw.get("confidence")),
            description: string_field(raw, "description", "unknown"),
            reasoning: string_field(raw, "reasoning", ""),
        }
    }
}
