use super::oracle::{OracleRequest, RequestContent};
use crate::component::extractor::MAX_TEXT_LENGTH;
use crate::config::Category;
use serde_json::{Value, json};

const TEMPERATURE: f64 = 0.2;

/// 系統提示：列出固定分類並要求四個欄位的 JSON 回應
#[must_use]
pub fn system_prompt() -> String {
    let categories: Vec<String> = Category::all_categories()
        .iter()
        .map(|c| format!("- {}: {}", c.folder_name(), c.description()))
        .collect();

    format!(
        "You are a document classification assistant for FANGA, an electric motorcycle platform in Cote d'Ivoire.

Classify the given file into exactly one of these categories:
{}

Respond with valid JSON only, with exactly these fields:
- \"category\": one of the categories listed above
- \"confidence\": float between 0.0 and 1.0 reflecting genuine certainty
- \"description\": short kebab-case label suitable for a filename (max 5 words, no accents, lowercase)
- \"reasoning\": brief explanation of your classification choice",
        categories.join("\n")
    )
}

fn file_info(request: &OracleRequest) -> String {
    format!(
        "Filename: {}\nExtension: {}\nSize: {}",
        request.filename, request.extension, request.size_human
    )
}

/// 使用者訊息的 content parts
#[must_use]
pub fn user_content(request: &OracleRequest) -> Value {
    let info = file_info(request);

    match &request.content {
        RequestContent::Text { text, truncated } => {
            let note = if *truncated {
                format!("\n(content truncated to the first {MAX_TEXT_LENGTH} characters)")
            } else {
                String::new()
            };
            json!([{
                "type": "text",
                "text": format!("{info}\n\nFile content:\n{text}{note}\n\nClassify this file."),
            }])
        }
        RequestContent::Image(payload) if payload.is_pdf() => json!([
            { "type": "text", "text": format!("{info}\n\nClassify this file.") },
            {
                "type": "file",
                "file": { "filename": request.filename, "file_data": payload.data_url() },
            },
        ]),
        RequestContent::Image(payload) => json!([
            { "type": "text", "text": format!("{info}\n\nClassify this file.") },
            {
                "type": "image_url",
                "image_url": { "url": payload.data_url(), "detail": "low" },
            },
        ]),
    }
}

/// 完整的 chat completions 請求內容
#[must_use]
pub fn build_chat_body(model: &str, request: &OracleRequest) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": system_prompt() },
            { "role": "user", "content": user_content(request) },
        ],
        "temperature": TEMPERATURE,
        "response_format": { "type": "json_object" },
    })
}
