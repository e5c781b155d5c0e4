use super::types::{
    CategoryCounts, ProcessingError, ProcessingReport, ProcessingResult, ProcessingStatus,
    ReportStatistics,
};
use crate::tools::ensure_directory_exists;
use anyhow::{Context, Result};
use chrono::Local;
use log::info;
use std::fs;
use std::path::Path;

/// 報告時間格式
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// 彙整處理結果並寫出 JSON 報告
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportGenerator;

impl ReportGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn generate(
        &self,
        results: Vec<ProcessingResult>,
        errors: Vec<ProcessingError>,
    ) -> ProcessingReport {
        let timestamp = Local::now().format(REPORT_TIMESTAMP_FORMAT).to_string();
        self.generate_at(timestamp, results, errors)
    }

    /// 純彙整，不做任何 I/O
    #[must_use]
    pub fn generate_at(
        &self,
        executed_at: String,
        results: Vec<ProcessingResult>,
        errors: Vec<ProcessingError>,
    ) -> ProcessingReport {
        let mut category_counts = CategoryCounts::default();
        for result in &results {
            category_counts.increment(result.category);
        }

        let average_confidence = if results.is_empty() {
            0.0
        } else {
            let sum: f64 = results.iter().map(|r| r.confidence).sum();
            round2(sum / results.len() as f64)
        };

        let statistics = ReportStatistics {
            average_confidence,
            ambiguous_files: results
                .iter()
                .filter(|r| r.status == ProcessingStatus::Ambiguous)
                .count(),
            error_files: errors.len(),
            duplicates_detected: results.iter().filter(|r| r.duplicate).count(),
        };

        ProcessingReport {
            executed_at,
            total_files: results.len() + errors.len(),
            category_counts,
            files: results,
            errors,
            statistics,
        }
    }

    /// 寫出縮排過的 JSON（保留非 ASCII 字元）
    pub fn save(&self, report: &ProcessingReport, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_directory_exists(parent)?;
        }

        let json =
            serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write report: {}", output_path.display()))?;

        info!("Report saved to {}", output_path.display());
        Ok(())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
