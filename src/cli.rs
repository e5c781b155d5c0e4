use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fanga-classifier")]
#[command(about = "Classify, rename and route inbox documents", long_about = None)]
pub struct Cli {
    /// 輸入資料夾
    #[arg(long, default_value = "./fanga_inbox")]
    pub input: PathBuf,

    /// 輸出資料夾
    #[arg(long, default_value = "./fanga_organised")]
    pub output: PathBuf,

    /// 移動檔案而非複製
    #[arg(long = "move")]
    pub move_files: bool,

    /// 信心度門檻 (0.0 - 1.0)，未指定時使用 settings.json 或 0.70
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// 只記錄決策，不動任何檔案
    #[arg(long)]
    pub dry_run: bool,

    /// 啟用重複內容偵測
    #[arg(long)]
    pub check_duplicates: bool,

    /// 不顯示進度條
    #[arg(long)]
    pub no_progress: bool,
}

/// 門檻必須落在 [0, 1]
pub fn parse_threshold(value: &str) -> Result<f64, String> {
    let threshold: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("threshold must be between 0.0 and 1.0, got {threshold}"))
    }
}
