//! 檔案內容抽取元件
//!
//! 依副檔名把檔案轉成可供分類的文字或圖片內容

mod document_reader;
#[cfg(test)]
mod fixtures;
mod main;
mod types;

pub use main::{FileExtractor, IMAGE_EXTENSIONS, human_size};
pub use types::{
    ExtractedContent, ExtractionMethod, FileMetadata, ImagePayload, MAX_TEXT_LENGTH,
    truncate_text,
};
