use crate::config::Category;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// 單一檔案的處理狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProcessingStatus {
    #[serde(rename = "succes")]
    Success,
    #[serde(rename = "ambigu")]
    Ambiguous,
}

/// 成功處理的檔案紀錄
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingResult {
    #[serde(rename = "nom_original")]
    pub original_name: String,
    #[serde(rename = "nom_final")]
    pub final_name: String,
    /// 模型建議的分類，即使檔案被放到覆核資料夾也不會改變
    #[serde(rename = "categorie")]
    pub category: Category,
    #[serde(rename = "confiance")]
    pub confidence: f64,
    #[serde(rename = "statut")]
    pub status: ProcessingStatus,
    #[serde(rename = "doublon")]
    pub duplicate: bool,
}

/// 無法處理的檔案
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingError {
    #[serde(rename = "nom_original")]
    pub original_name: String,
    #[serde(rename = "erreur")]
    pub error: String,
}

impl ProcessingError {
    pub fn new(original_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            original_name: original_name.into(),
            error: error.into(),
        }
    }
}

/// 各分類的檔案數，八個分類永遠都在
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts([usize; 8]);

impl CategoryCounts {
    pub fn increment(&mut self, category: Category) {
        self.0[category.index()] += 1;
    }

    #[must_use]
    pub fn get(&self, category: Category) -> usize {
        self.0[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, usize)> + '_ {
        Category::all_categories()
            .iter()
            .map(|category| (*category, self.get(*category)))
    }
}

impl Serialize for CategoryCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (category, count) in self.iter() {
            map.serialize_entry(category.folder_name(), &count)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportStatistics {
    #[serde(rename = "confiance_moyenne")]
    pub average_confidence: f64,
    #[serde(rename = "fichiers_ambigus")]
    pub ambiguous_files: usize,
    #[serde(rename = "fichiers_en_erreur")]
    pub error_files: usize,
    #[serde(rename = "doublons_detectes")]
    pub duplicates_detected: usize,
}

/// 一次執行的完整報告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingReport {
    #[serde(rename = "date_execution")]
    pub executed_at: String,
    #[serde(rename = "total_fichiers")]
    pub total_files: usize,
    #[serde(rename = "classes")]
    pub category_counts: CategoryCounts,
    #[serde(rename = "fichiers")]
    pub files: Vec<ProcessingResult>,
    #[serde(rename = "erreurs")]
    pub errors: Vec<ProcessingError>,
    #[serde(rename = "statistiques")]
    pub statistics: ReportStatistics,
}

impl ProcessingReport {
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Pipeline complete. {} files processed, {} errors, {} ambiguous.",
            self.files.len(),
            self.errors.len(),
            self.statistics.ambiguous_files
        )
    }
}
