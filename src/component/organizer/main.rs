use crate::config::{Category, Destination};
use crate::tools::ensure_directory_exists;
use anyhow::{Context, Result};
use chrono::Local;
use filetime::FileTime;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// 低信心度檔案旁的說明檔內容
#[derive(Debug, Clone)]
pub struct AmbiguityNote<'a> {
    /// 放置後的檔名，說明檔名稱由此而來
    pub final_name: &'a str,
    pub original_name: &'a str,
    pub suggested_category: Category,
    pub confidence: f64,
    pub threshold: f64,
    pub reasoning: &'a str,
}

impl AmbiguityNote<'_> {
    /// `{stem}_NOTE.txt`
    #[must_use]
    pub fn file_name(&self) -> String {
        let stem = Path::new(self.final_name)
            .file_stem()
            .map_or_else(|| self.final_name.to_string(), |s| s.to_string_lossy().to_string());
        format!("{stem}_NOTE.txt")
    }

    #[must_use]
    pub fn render(&self, timestamp: &str) -> String {
        format!(
            "Fichier: {}\nCategorie suggeree: {}\nConfiance: {}\nRaison de verification: Confiance inferieure au seuil ({})\nRaisonnement du modele: {}\nDate: {timestamp}\n",
            self.original_name,
            self.suggested_category,
            self.confidence,
            self.threshold,
            self.reasoning,
        )
    }
}

/// 建立輸出目錄並放置檔案
#[derive(Debug, Default, Clone, Copy)]
pub struct FileOrganizer;

impl FileOrganizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// 建立八個分類資料夾與覆核資料夾，可重複呼叫
    pub fn setup_output_dirs(&self, output_base: &Path) -> Result<()> {
        let destinations = Category::all_categories()
            .iter()
            .map(|c| Destination::Category(*c))
            .chain(std::iter::once(Destination::Review));

        for destination in destinations {
            ensure_directory_exists(&output_base.join(destination.folder_name()))?;
        }

        info!("Output directories created under {}", output_base.display());
        Ok(())
    }

    /// 複製或移動檔案到 `output_base/<folder>/<name>`，回傳最終路徑
    pub fn place_file(
        &self,
        source: &Path,
        output_base: &Path,
        destination: Destination,
        new_name: &str,
        move_files: bool,
    ) -> Result<PathBuf> {
        let dest_path = output_base.join(destination.folder_name()).join(new_name);

        if move_files {
            if let Err(e) = fs::rename(source, &dest_path) {
                debug!("rename 失敗，改用複製後刪除: {e}");
                copy_and_delete(source, &dest_path)?;
            }
            info!("Moved: {} -> {}", source.display(), dest_path.display());
        } else {
            copy_with_times(source, &dest_path)?;
            info!("Copied: {} -> {}", source.display(), dest_path.display());
        }

        Ok(dest_path)
    }

    /// 在檔案旁寫入說明檔，回傳說明檔路徑
    pub fn write_ambiguity_note(&self, dest_folder: &Path, note: &AmbiguityNote) -> Result<PathBuf> {
        let note_path = dest_folder.join(note.file_name());
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        fs::write(&note_path, note.render(&timestamp))
            .with_context(|| format!("Failed to write note: {}", note_path.display()))?;

        info!("Ambiguity note written: {}", note_path.display());
        Ok(note_path)
    }
}

/// 複製內容與權限，並保留存取/修改時間
fn copy_with_times(source: &Path, target: &Path) -> Result<()> {
    fs::copy(source, target).with_context(|| {
        format!("Failed to copy file: {} -> {}", source.display(), target.display())
    })?;

    let metadata = fs::metadata(source)
        .with_context(|| format!("Failed to read metadata: {}", source.display()))?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    if let Err(e) = filetime::set_file_times(target, atime, mtime) {
        warn!("無法保留檔案時間 {}: {e}", target.display());
    }

    Ok(())
}

/// 跨檔案系統時 rename 會失敗
fn copy_and_delete(source: &Path, target: &Path) -> Result<()> {
    copy_with_times(source, target)?;
    fs::remove_file(source)
        .with_context(|| format!("Failed to remove source file: {}", source.display()))?;
    Ok(())
}
