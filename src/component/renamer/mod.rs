//! 檔案重新命名元件
//!
//! 依分類結果產生標準檔名，並處理撞名與重複標記

mod date_extractor;
mod filename_cleaner;
mod main;

pub use date_extractor::derive_date;
pub use filename_cleaner::{MAX_DESCRIPTION_LENGTH, fold_diacritics, sanitize_description};
pub use main::{DUPLICATE_MARKER, FileRenamer};
