use log::warn;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// 列出資料夾第一層的非隱藏一般檔案，依檔名字典序排序
///
/// 無法讀取的項目（斷掉的連結、連結迴圈）記錄警告後略過
pub fn scan_input_files(directory: &Path) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("略過無法讀取的項目 {}: {e}", directory.display());
                None
            }
        })
        .filter(|entry| !is_hidden(entry) && entry.file_type().is_file())
        .map(DirEntry::into_path)
        .collect()
}
