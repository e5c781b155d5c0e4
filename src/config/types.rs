use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 低信心度分類的人工覆核資料夾
pub const REVIEW_FOLDER: &str = "A_verifier";

/// 預設信心度門檻
pub const DEFAULT_THRESHOLD: f64 = 0.70;

/// 報告檔名（寫在輸出資料夾的上一層）
pub const REPORT_FILE_NAME: &str = "rapport_traitement.json";

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_PACING_MS: u64 = 500;

/// 固定的八個文件分類，`Other` 為兜底分類
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Category {
    #[serde(rename = "Contrats")]
    Contracts,
    #[serde(rename = "Factures")]
    Invoices,
    #[serde(rename = "Photos")]
    Photos,
    #[serde(rename = "Rapports")]
    Reports,
    #[serde(rename = "Exports_donnees")]
    DataExports,
    #[serde(rename = "Documents_identite")]
    IdentityDocuments,
    #[serde(rename = "Maintenance")]
    Maintenance,
    #[default]
    #[serde(rename = "Autre")]
    Other,
}

impl Category {
    const ALL: [Self; 8] = [
        Self::Contracts,
        Self::Invoices,
        Self::Photos,
        Self::Reports,
        Self::DataExports,
        Self::IdentityDocuments,
        Self::Maintenance,
        Self::Other,
    ];

    #[must_use]
    pub const fn all_categories() -> &'static [Self] {
        &Self::ALL
    }

    /// 分類標籤，同時作為輸出資料夾名稱與報告中的值
    #[must_use]
    pub const fn folder_name(self) -> &'static str {
        match self {
            Self::Contracts => "Contrats",
            Self::Invoices => "Factures",
            Self::Photos => "Photos",
            Self::Reports => "Rapports",
            Self::DataExports => "Exports_donnees",
            Self::IdentityDocuments => "Documents_identite",
            Self::Maintenance => "Maintenance",
            Self::Other => "Autre",
        }
    }

    /// 給分類模型看的說明
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Contracts => "Contracts, lease agreements, partnership agreements",
            Self::Invoices => "Invoices, receipts, payment documents",
            Self::Photos => "Photographs of stations, equipment, installations",
            Self::Reports => "Monthly reports, activity reports, analysis documents",
            Self::DataExports => "CSV exports, data dumps, transaction logs",
            Self::IdentityDocuments => {
                "ID cards, driver's licenses, personal identity documents"
            }
            Self::Maintenance => {
                "Battery maintenance reports, technical intervention logs, equipment status"
            }
            Self::Other => {
                "Anything that doesn't fit the above categories (screenshots, planning, purchase orders, internal docs)"
            }
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 以標籤精確比對，不在集合內回傳 `None`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.folder_name() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder_name())
    }
}

/// 檔案實際放置的位置：某個分類，或人工覆核資料夾
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Category(Category),
    Review,
}

impl Destination {
    #[must_use]
    pub const fn folder_name(self) -> &'static str {
        match self {
            Self::Category(category) => category.folder_name(),
            Self::Review => REVIEW_FOLDER,
        }
    }
}

/// 單次執行的管線設定
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report_path: PathBuf,
    pub threshold: f64,
    pub move_files: bool,
    pub dry_run: bool,
    pub check_duplicates: bool,
    pub show_progress: bool,
}

impl PipelineConfig {
    /// 以預設值建立設定，報告路徑放在輸出資料夾旁邊
    #[must_use]
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let output_dir = output_dir.into();
        let report_path = sibling_dir(&output_dir).join(REPORT_FILE_NAME);
        Self {
            input_dir: input_dir.into(),
            output_dir,
            report_path,
            threshold: DEFAULT_THRESHOLD,
            move_files: false,
            dry_run: false,
            check_duplicates: false,
            show_progress: false,
        }
    }

    /// 日誌資料夾，與報告同層
    #[must_use]
    pub fn log_dir(&self) -> PathBuf {
        sibling_dir(&self.output_dir).join("logs")
    }
}

fn sibling_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// 分類服務連線設定
#[derive(Debug, Clone)]
pub struct OracleSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub pacing: Duration,
}

/// `settings.json` 中可選的使用者預設值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub threshold: Option<f64>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub pacing_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_round_trip() {
        for category in Category::all_categories() {
            assert_eq!(Category::from_label(category.folder_name()), Some(*category));
        }
        assert_eq!(Category::from_label("contrats"), None);
        assert_eq!(Category::from_label("A_verifier"), None);
    }

    #[test]
    fn test_category_index_matches_order() {
        for (i, category) in Category::all_categories().iter().enumerate() {
            assert_eq!(category.index(), i);
        }
        assert_eq!(Category::default(), Category::Other);
    }

    #[test]
    fn test_category_serializes_as_label() {
        let json = serde_json::to_string(&Category::DataExports).unwrap();
        assert_eq!(json, "\"Exports_donnees\"");
    }

    #[test]
    fn test_destination_folder_name() {
        assert_eq!(Destination::Review.folder_name(), "A_verifier");
        assert_eq!(
            Destination::Category(Category::Invoices).folder_name(),
            "Factures"
        );
    }

    #[test]
    fn test_report_path_next_to_output() {
        let config = PipelineConfig::new("/data/inbox", "/data/organised");
        assert_eq!(
            config.report_path,
            PathBuf::from("/data/rapport_traitement.json")
        );
        assert_eq!(config.log_dir(), PathBuf::from("/data/logs"));
    }

    #[test]
    fn test_report_path_for_bare_output_name() {
        let config = PipelineConfig::new("inbox", "organised");
        assert_eq!(config.report_path, PathBuf::from("./rapport_traitement.json"));
        assert!((config.threshold - 0.70).abs() < f64::EPSILON);
    }
}
