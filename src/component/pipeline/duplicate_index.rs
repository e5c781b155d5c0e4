//! 整批檔案的重複內容索引
//!
//! 必須在任何檔案開始分流之前建好

use crate::tools::calculate_file_hashes;
use log::{info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct DuplicateIndex {
    duplicates: HashSet<PathBuf>,
}

impl DuplicateIndex {
    /// 平行計算雜湊，再依列舉順序分組；每組第一個檔案視為正本
    #[must_use]
    pub fn build(files: &[PathBuf]) -> Self {
        let hashes = calculate_file_hashes(files);

        let mut seen = HashSet::new();
        let mut duplicates = HashSet::new();
        for (path, hash) in hashes {
            match hash {
                Ok(hash) => {
                    if !seen.insert(hash) {
                        warn!("Duplicate detected: {}", display_name(&path));
                        duplicates.insert(path);
                    }
                }
                Err(e) => warn!("無法計算雜湊，略過重複檢查 {}: {e:#}", path.display()),
            }
        }

        info!(
            "Duplicate pass complete: {} of {} files are duplicates",
            duplicates.len(),
            files.len()
        );
        Self { duplicates }
    }

    #[must_use]
    pub fn is_duplicate(&self, path: &Path) -> bool {
        self.duplicates.contains(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.duplicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}
