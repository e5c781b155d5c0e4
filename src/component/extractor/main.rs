use super::document_reader::{
    read_csv_text, read_docx_text, read_pdf_text, read_plain_text, read_xlsx_text,
};
use super::types::{ExtractedContent, ExtractionMethod, FileMetadata, ImagePayload};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::{debug, error, info, warn};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// 可直接送往視覺模型的圖片副檔名
pub const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".bmp", ".webp"];

/// PDF 文字少於此字元數時視為掃描檔，改以圖片送出
const MIN_PDF_TEXT_LENGTH: usize = 20;

const PDF_MAX_PAGES: usize = 2;
const XLSX_MAX_ROWS: usize = 10;
const CSV_MAX_ROWS: usize = 11;

/// 檔案資訊與內容抽取器
#[derive(Debug, Clone)]
pub struct FileExtractor {
    pdf_max_pages: usize,
    xlsx_max_rows: usize,
    csv_max_rows: usize,
}

impl Default for FileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FileExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pdf_max_pages: PDF_MAX_PAGES,
            xlsx_max_rows: XLSX_MAX_ROWS,
            csv_max_rows: CSV_MAX_ROWS,
        }
    }

    /// 讀取檔案的 stat 資訊，I/O 錯誤直接往上傳
    pub fn extract_metadata(&self, path: &Path) -> Result<FileMetadata> {
        let metadata =
            fs::metadata(path).with_context(|| format!("無法讀取檔案資訊: {}", path.display()))?;
        let modified = metadata
            .modified()
            .with_context(|| format!("無法取得修改時間: {}", path.display()))?;
        // 部分檔案系統不提供建立時間，改用修改時間
        let created = metadata.created().unwrap_or(modified);
        let size = metadata.len();

        Ok(FileMetadata {
            filename: file_name_of(path),
            extension: extension_of(path),
            size_bytes: size,
            size_human: human_size(size),
            created_date: format_date(created),
            modified_date: format_date(modified),
        })
    }

    /// 依副檔名抽取內容，任何失敗都轉成 `ExtractedContent::Error`
    pub fn extract_content(&self, path: &Path) -> ExtractedContent {
        match self.try_extract(path) {
            Ok(content) => content,
            Err(e) => {
                error!("Extraction failed for {}: {e:#}", path.display());
                ExtractedContent::Error {
                    message: format!("{e:#}"),
                }
            }
        }
    }

    fn try_extract(&self, path: &Path) -> Result<ExtractedContent> {
        let extension = extension_of(path);

        let content = match extension.as_str() {
            ".pdf" => self.extract_pdf(path)?,
            ".docx" => ExtractedContent::text(&read_docx_text(path)?, ExtractionMethod::Docx),
            ".xlsx" => ExtractedContent::text(
                &read_xlsx_text(path, self.xlsx_max_rows)?,
                ExtractionMethod::Xlsx,
            ),
            ".csv" => ExtractedContent::text(
                &read_csv_text(path, self.csv_max_rows)?,
                ExtractionMethod::Csv,
            ),
            ".txt" | ".md" => {
                ExtractedContent::text(&read_plain_text(path)?, ExtractionMethod::PlainText)
            }
            ext if IMAGE_EXTENSIONS.contains(&ext) => self.extract_image(path)?,
            _ => ExtractedContent::text(&file_name_of(path), ExtractionMethod::FilenameOnly),
        };

        if let ExtractedContent::Text {
            truncated: true, ..
        } = content
        {
            warn!("Content truncated for {}", path.display());
        }
        if let Some(method) = content.method() {
            debug!("Extracted {} via {}", path.display(), method.as_str());
        }

        Ok(content)
    }

    fn extract_pdf(&self, path: &Path) -> Result<ExtractedContent> {
        let text = read_pdf_text(path, self.pdf_max_pages)?;

        if text.chars().count() < MIN_PDF_TEXT_LENGTH {
            info!(
                "PDF 文字過少 ({} 字元)，改以圖片方式送出: {}",
                text.chars().count(),
                path.display()
            );
            return self.extract_image(path);
        }

        Ok(ExtractedContent::text(&text, ExtractionMethod::Pdf))
    }

    fn extract_image(&self, path: &Path) -> Result<ExtractedContent> {
        let bytes =
            fs::read(path).with_context(|| format!("無法讀取檔案: {}", path.display()))?;
        let mime_type = mime_type_for(&extension_of(path));
        Ok(ExtractedContent::Image {
            payload: ImagePayload::from_bytes(mime_type, &bytes),
        })
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 小寫副檔名，含前導點
fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn mime_type_for(extension: &str) -> &'static str {
    match extension {
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".bmp" => "image/bmp",
        ".webp" => "image/webp",
        ".pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

fn format_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%Y-%m-%d").to_string()
}

/// 人類可讀的檔案大小，例如 `1.5 KB`
#[must_use]
pub fn human_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1} {unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1} TB")
}
