use anyhow::{Context, Result, bail};
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Input directory not found: {}", path.display());
    }
    if !path.is_dir() {
        bail!("Input path is not a directory: {}", path.display());
    }
    Ok(())
}

/// 建立資料夾（含上層），已存在時不做事
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("無法建立資料夾: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing_directory() {
        let err = validate_directory_exists(Path::new("/nonexistent/inbox")).unwrap_err();
        assert!(err.to_string().starts_with("Input directory not found"));
    }

    #[test]
    fn test_validate_file_is_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("facture.pdf");
        std::fs::write(&file, "x").unwrap();
        assert!(validate_directory_exists(&file).is_err());
        assert!(validate_directory_exists(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_ensure_directory_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        ensure_directory_exists(&nested).unwrap();
        ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
