//! 從檔名與描述推測文件日期

use super::filename_cleaner::fold_diacritics;
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

const FRENCH_MONTHS: [(&str, u32); 12] = [
    ("janvier", 1),
    ("fevrier", 2),
    ("mars", 3),
    ("avril", 4),
    ("mai", 5),
    ("juin", 6),
    ("juillet", 7),
    ("aout", 8),
    ("septembre", 9),
    ("octobre", 10),
    ("novembre", 11),
    ("decembre", 12),
];

/// 取最左邊的 `20xx`，也涵蓋 `20240315` 這類緊湊時間戳
static REGEX_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20[0-9]{2}").expect("Invalid regex"));

fn find_year(text: &str) -> Option<&str> {
    REGEX_YEAR.find(text).map(|m| m.as_str())
}

/// 只比對完整的字母 token，避免 "maintenance" 被當成 "mai"
fn find_month(text: &str) -> Option<u32> {
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|token| !token.is_empty())
        .find_map(|token| {
            FRENCH_MONTHS
                .iter()
                .find(|(name, _)| *name == token)
                .map(|(_, month)| *month)
        })
}

/// 推測日期，格式 `YYYY-MM-DD`
///
/// 年月都有 → 該月一日；只有年 → 一月一日；只有月 → 今年該月一日；都沒有 → 今天
#[must_use]
pub fn derive_date(filename: &str, description: &str, today: NaiveDate) -> String {
    let combined = fold_diacritics(&format!("{filename} {description}")).to_lowercase();

    match (find_year(&combined), find_month(&combined)) {
        (Some(year), Some(month)) => format!("{year}-{month:02}-01"),
        (Some(year), None) => format!("{year}-01-01"),
        (None, Some(month)) => format!("{}-{month:02}-01", today.year()),
        (None, None) => today.format("%Y-%m-%d").to_string(),
    }
}
