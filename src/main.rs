use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use fanga_classifier::cli::Cli;
use fanga_classifier::component::reporter::ProcessingReport;
use fanga_classifier::component::{FileClassifier, OpenAiOracle, Pipeline};
use fanga_classifier::config::{DEFAULT_THRESHOLD, OracleSettings, PipelineConfig, UserSettings};
use fanga_classifier::init;
use log::{info, warn};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("錯誤:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("{} {e}", style("無法讀取 .env:").yellow());
        }
    }

    let settings = UserSettings::load().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", style("settings.json 無效，使用預設值:").yellow());
        UserSettings::default()
    });

    let threshold = cli
        .threshold
        .or(settings.threshold)
        .unwrap_or(DEFAULT_THRESHOLD);
    if !(0.0..=1.0).contains(&threshold) {
        bail!("threshold must be between 0.0 and 1.0, got {threshold}");
    }

    let mut config = PipelineConfig::new(&cli.input, &cli.output);
    config.threshold = threshold;
    config.move_files = cli.move_files;
    config.dry_run = cli.dry_run;
    config.check_duplicates = cli.check_duplicates;
    config.show_progress = !cli.no_progress;

    init::init_logging(Some(&config.log_dir()));

    let oracle_settings = OracleSettings::from_env(&settings)?;
    info!(
        "Starting pipeline: input={}, output={}, threshold={}, model={}",
        config.input_dir.display(),
        config.output_dir.display(),
        config.threshold,
        oracle_settings.model
    );
    if config.dry_run {
        warn!("Dry-run mode: no files will be placed");
    }

    let pacing = oracle_settings.pacing;
    let classifier = FileClassifier::new(OpenAiOracle::new(oracle_settings)?).with_pacing(pacing);
    let pipeline = Pipeline::new(config, classifier);
    let report = pipeline.run()?;

    print_summary(&report, &pipeline.config().report_path.display().to_string());
    Ok(())
}

fn print_summary(report: &ProcessingReport, report_path: &str) {
    let stats = &report.statistics;

    println!();
    println!("{}", style("=== 處理結果 ===").cyan().bold());
    println!("  檔案總數: {}", report.total_files);
    println!("  成功: {} 個", style(report.files.len()).green());
    if stats.ambiguous_files > 0 {
        println!("  待人工確認: {} 個", style(stats.ambiguous_files).yellow());
    }
    if stats.duplicates_detected > 0 {
        println!("  重複檔案: {} 個", style(stats.duplicates_detected).yellow());
    }
    if stats.error_files > 0 {
        println!("  失敗: {} 個", style(stats.error_files).red());
    }
    println!("  平均信心度: {:.2}", stats.average_confidence);

    println!();
    println!("{}", style("=== 各分類數量 ===").cyan().bold());
    for (category, count) in report.category_counts.iter() {
        println!("  {category}: {count}");
    }

    println!();
    println!("報告: {}", style(report_path).dim());
}
