use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

const BUFFER_SIZE: usize = 1024 * 1024; // 1MB buffer

/// 計算檔案內容的 BLAKE3 雜湊（hex）
pub fn calculate_file_hash(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("無法開啟檔案: {}", path.display()))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);
    let mut hasher = blake3::Hasher::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .with_context(|| format!("讀取檔案失敗: {}", path.display()))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().to_hex().to_string())
}

/// 平行計算多個檔案的雜湊，結果順序與輸入一致
pub fn calculate_file_hashes(paths: &[PathBuf]) -> Vec<(PathBuf, Result<String>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), calculate_file_hash(path)))
        .collect()
}
