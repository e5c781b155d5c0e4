use super::date_extractor::derive_date;
use super::filename_cleaner::sanitize_description;
use crate::component::classifier::ClassificationResult;
use crate::component::extractor::FileMetadata;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// 重複檔案在檔名中的標記
pub const DUPLICATE_MARKER: &str = "_DOUBLON";

/// 產生 `{date}_{category}_{description}{ext}` 形式的檔名
#[derive(Debug, Default, Clone, Copy)]
pub struct FileRenamer;

impl FileRenamer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn generate_name(
        &self,
        metadata: &FileMetadata,
        classification: &ClassificationResult,
    ) -> String {
        self.generate_name_on(metadata, classification, Local::now().date_naive())
    }

    /// 同 `generate_name`，但由呼叫端指定「今天」
    #[must_use]
    pub fn generate_name_on(
        &self,
        metadata: &FileMetadata,
        classification: &ClassificationResult,
        today: NaiveDate,
    ) -> String {
        let date = derive_date(&metadata.filename, &classification.description, today);
        let description = sanitize_description(&classification.description);

        format!(
            "{date}_{}_{description}{}",
            classification.category.folder_name(),
            metadata.extension
        )
    }

    /// 目標已存在時依序嘗試 `_01`、`_02`… 直到找到空位
    #[must_use]
    pub fn resolve_collision(&self, path: &Path) -> PathBuf {
        if !path.exists() {
            return path.to_path_buf();
        }

        let (stem, extension) = split_name(path.file_name().and_then(|n| n.to_str()).unwrap_or(""));
        let parent = path.parent().unwrap_or_else(|| Path::new(""));

        (1u32..)
            .map(|counter| parent.join(format!("{stem}_{counter:02}{extension}")))
            .find(|candidate| !candidate.exists())
            .unwrap_or_else(|| path.to_path_buf())
    }

    /// 在副檔名前插入 `_DOUBLON`
    #[must_use]
    pub fn mark_duplicate(&self, name: &str) -> String {
        let (stem, extension) = split_name(name);
        format!("{stem}{DUPLICATE_MARKER}{extension}")
    }
}

/// 以最後一個點切出副檔名（含點）；開頭的點不算副檔名
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}
