use crate::config::Category;
use serde::Serialize;

/// 經過驗證與正規化的分類結果
///
/// `confidence` 一定落在 [0, 1]，`category` 一定是固定分類之一
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub confidence: f64,
    pub description: String,
    pub reasoning: String,
}

impl ClassificationResult {
    /// 分類失敗時使用的兜底結果
    #[must_use]
    pub fn fallback(error: &str) -> Self {
        Self {
            category: Category::Other,
            confidence: 0.0,
            description: "classification-error".to_string(),
            reasoning: format!("Classification failed: {error}"),
        }
    }
}
