//! 管線主模組
//!
//! 逐一處理輸入資料夾中的檔案：抽取、分類、分流、命名、放置，最後產生報告

use super::duplicate_index::DuplicateIndex;
use crate::component::classifier::{ClassificationOracle, FileClassifier};
use crate::component::extractor::{ExtractedContent, FileExtractor};
use crate::component::organizer::{AmbiguityNote, FileOrganizer};
use crate::component::renamer::FileRenamer;
use crate::component::reporter::{
    ProcessingError, ProcessingReport, ProcessingResult, ProcessingStatus, ReportGenerator,
};
use crate::config::{Category, Destination, PipelineConfig};
use crate::tools::{scan_input_files, validate_directory_exists};
use anyhow::{Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::{Path, PathBuf};

/// 信心度嚴格低於門檻時改送覆核資料夾；回報的分類維持模型建議
#[must_use]
pub fn route(
    confidence: f64,
    threshold: f64,
    category: Category,
) -> (Destination, ProcessingStatus) {
    if confidence < threshold {
        (Destination::Review, ProcessingStatus::Ambiguous)
    } else {
        (Destination::Category(category), ProcessingStatus::Success)
    }
}

pub struct Pipeline<O> {
    config: PipelineConfig,
    extractor: FileExtractor,
    classifier: FileClassifier<O>,
    renamer: FileRenamer,
    organizer: FileOrganizer,
    reporter: ReportGenerator,
}

impl<O: ClassificationOracle> Pipeline<O> {
    pub fn new(config: PipelineConfig, classifier: FileClassifier<O>) -> Self {
        Self {
            config,
            extractor: FileExtractor::new(),
            classifier,
            renamer: FileRenamer::new(),
            organizer: FileOrganizer::new(),
            reporter: ReportGenerator::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// 執行整個批次並寫出報告
    ///
    /// 單一檔案的失敗只會記錄在報告中；只有建立輸出目錄或寫報告失敗才會回傳錯誤
    pub fn run(&self) -> Result<ProcessingReport> {
        let config = &self.config;

        if let Err(e) = validate_directory_exists(&config.input_dir) {
            error!("{e}");
            let report = self.reporter.generate(
                Vec::new(),
                vec![ProcessingError::new(
                    config.input_dir.display().to_string(),
                    e.to_string(),
                )],
            );
            self.reporter.save(&report, &config.report_path)?;
            return Ok(report);
        }

        if config.dry_run {
            info!("[DRY-RUN] 不會建立目錄或放置任何檔案");
        } else {
            self.organizer.setup_output_dirs(&config.output_dir)?;
        }

        let files = scan_input_files(&config.input_dir);
        if files.is_empty() {
            warn!("No files found in input directory");
        } else {
            info!("Found {} files to process", files.len());
        }

        let duplicates = if config.check_duplicates {
            DuplicateIndex::build(&files)
        } else {
            DuplicateIndex::default()
        };

        let (results, errors) = self.process_all(&files, &duplicates);

        let report = self.reporter.generate(results, errors);
        self.reporter.save(&report, &config.report_path)?;
        info!("{}", report.summary_line());

        Ok(report)
    }

    fn process_all(
        &self,
        files: &[PathBuf],
        duplicates: &DuplicateIndex,
    ) -> (Vec<ProcessingResult>, Vec<ProcessingError>) {
        let progress_bar = self.progress_bar(files.len());
        let mut results = Vec::new();
        let mut errors = Vec::new();

        for (i, path) in files.iter().enumerate() {
            let filename = file_name(path);
            info!("Processing file {} of {}: {filename}", i + 1, files.len());
            progress_bar.set_message(filename.clone());

            match self.process_file(path, &filename, duplicates.is_duplicate(path)) {
                Ok(result) => {
                    info!(
                        "{filename} -> {}/{} (confidence: {})",
                        result.category, result.final_name, result.confidence
                    );
                    results.push(result);
                }
                Err(e) => {
                    error!("Failed to process {filename}: {e:#}");
                    errors.push(ProcessingError::new(filename, format!("{e:#}")));
                }
            }

            progress_bar.inc(1);
        }

        progress_bar.finish_with_message("完成");
        (results, errors)
    }

    /// 處理單一檔案；任何錯誤都由呼叫端記錄為該檔案的錯誤
    pub fn process_file(
        &self,
        path: &Path,
        filename: &str,
        is_duplicate: bool,
    ) -> Result<ProcessingResult> {
        let metadata = self.extractor.extract_metadata(path)?;
        let content = self.extractor.extract_content(path);
        if let ExtractedContent::Error { message } = &content {
            bail!("Extraction error: {message}");
        }

        let classification = self.classifier.classify(&metadata, &content);
        let (destination, status) = route(
            classification.confidence,
            self.config.threshold,
            classification.category,
        );

        let mut new_name = self.renamer.generate_name(&metadata, &classification);
        if is_duplicate {
            new_name = self.renamer.mark_duplicate(&new_name);
        }

        if self.config.dry_run {
            info!(
                "[DRY-RUN] Would place {filename} -> {}/{new_name}",
                destination.folder_name()
            );
        } else {
            let dest_dir = self.config.output_dir.join(destination.folder_name());
            let resolved = self.renamer.resolve_collision(&dest_dir.join(&new_name));
            if let Some(name) = resolved.file_name() {
                new_name = name.to_string_lossy().to_string();
            }

            self.organizer.place_file(
                path,
                &self.config.output_dir,
                destination,
                &new_name,
                self.config.move_files,
            )?;

            if destination == Destination::Review {
                self.organizer.write_ambiguity_note(
                    &dest_dir,
                    &AmbiguityNote {
                        final_name: &new_name,
                        original_name: filename,
                        suggested_category: classification.category,
                        confidence: classification.confidence,
                        threshold: self.config.threshold,
                        reasoning: &classification.reasoning,
                    },
                )?;
            }
        }

        Ok(ProcessingResult {
            original_name: filename.to_string(),
            final_name: new_name,
            category: classification.category,
            confidence: classification.confidence,
            status,
            duplicate: is_duplicate,
        })
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        progress_bar.set_style(style);
        progress_bar
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}
