use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Serialize;

/// 文字內容上限（字元數）
pub const MAX_TEXT_LENGTH: usize = 1000;

/// 檔案的基本資訊，建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub filename: String,
    /// 小寫且含前導點，例如 `.pdf`；無副檔名時為空字串
    pub extension: String,
    pub size_bytes: u64,
    pub size_human: String,
    pub created_date: String,
    pub modified_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    Pdf,
    Docx,
    Xlsx,
    Csv,
    PlainText,
    Vision,
    FilenameOnly,
}

impl ExtractionMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Xlsx => "xlsx",
            Self::Csv => "csv",
            Self::PlainText => "plain_text",
            Self::Vision => "vision",
            Self::FilenameOnly => "filename_only",
        }
    }
}

/// 送給視覺模型的二進位內容（base64）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data: String,
}

impl ImagePayload {
    #[must_use]
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    #[must_use]
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.mime_type == "application/pdf"
    }
}

/// 每個檔案恰好一種抽取結果
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedContent {
    Text {
        content: String,
        method: ExtractionMethod,
        truncated: bool,
    },
    Image {
        payload: ImagePayload,
    },
    Error {
        message: String,
    },
}

impl ExtractedContent {
    /// 建立文字內容，超過上限時截斷並標記
    #[must_use]
    pub fn text(content: &str, method: ExtractionMethod) -> Self {
        let (content, truncated) = truncate_text(content);
        Self::Text {
            content,
            method,
            truncated,
        }
    }

    #[must_use]
    pub const fn method(&self) -> Option<ExtractionMethod> {
        match self {
            Self::Text { method, .. } => Some(*method),
            Self::Image { .. } => Some(ExtractionMethod::Vision),
            Self::Error { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// 依字元（非位元組）截斷到 `MAX_TEXT_LENGTH`
#[must_use]
pub fn truncate_text(text: &str) -> (String, bool) {
    match text.char_indices().nth(MAX_TEXT_LENGTH) {
        Some((byte_index, _)) => (text[..byte_index].to_string(), true),
        None => (text.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_not_truncated() {
        let (text, truncated) = truncate_text("contrat de location");
        assert_eq!(text, "contrat de location");
        assert!(!truncated);
    }

    #[test]
    fn test_exact_limit_not_truncated() {
        let input = "a".repeat(MAX_TEXT_LENGTH);
        let (text, truncated) = truncate_text(&input);
        assert_eq!(text.len(), MAX_TEXT_LENGTH);
        assert!(!truncated);
    }

    #[test]
    fn test_long_text_truncated_on_char_boundary() {
        let input = "é".repeat(MAX_TEXT_LENGTH + 10);
        let (text, truncated) = truncate_text(&input);
        assert_eq!(text.chars().count(), MAX_TEXT_LENGTH);
        assert!(truncated);
    }

    #[test]
    fn test_text_constructor_sets_flag() {
        let content = ExtractedContent::text(&"x".repeat(1500), ExtractionMethod::Csv);
        match content {
            ExtractedContent::Text {
                content,
                method,
                truncated,
            } => {
                assert_eq!(content.len(), 1000);
                assert_eq!(method, ExtractionMethod::Csv);
                assert!(truncated);
            }
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn test_image_payload_data_url() {
        let payload = ImagePayload::from_bytes("image/png", b"abc");
        assert_eq!(payload.data_url(), "data:image/png;base64,YWJj");
        assert!(!payload.is_pdf());
    }
}
