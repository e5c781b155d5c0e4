//! 各種文件格式的文字讀取
//!
//! 每個函式只讀取前面有限的內容（頁數或列數），避免處理大型檔案時耗費過多時間

use anyhow::{Context, Result, anyhow};
use calamine::{Reader, Xlsx, open_workbook};
use log::debug;
use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

/// 讀取 PDF 前 `max_pages` 頁的文字
///
/// pdf-extract 遇到損壞的字型可能 panic，這裡攔截並轉成錯誤
pub fn read_pdf_text(path: &Path, max_pages: usize) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("無法讀取 PDF: {}", path.display()))?;

    let pages = catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    }))
    .map_err(|_| anyhow!("PDF 解析時發生 panic（可能是字型損壞）: {}", path.display()))?
    .map_err(|e| anyhow!("無法解析 PDF {}: {e}", path.display()))?;

    debug!("PDF {} 共 {} 頁", path.display(), pages.len());

    let mut text = String::new();
    for page in pages.iter().take(max_pages) {
        text.push_str(page);
        text.push('\n');
    }

    Ok(text.trim().to_string())
}

/// 讀取 DOCX 所有段落，以換行連接
pub fn read_docx_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("無法讀取 DOCX: {}", path.display()))?;
    let doc = docx_rs::read_docx(&bytes)
        .map_err(|e| anyhow!("無法解析 DOCX {}: {e}", path.display()))?;

    let paragraphs: Vec<String> = doc
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            docx_rs::DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut output = String::new();
    for child in &paragraph.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut output),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for link_child in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = link_child {
                        push_run_text(run, &mut output);
                    }
                }
            }
            _ => {}
        }
    }
    output
}

fn push_run_text(run: &docx_rs::Run, output: &mut String) {
    for run_child in &run.children {
        if let docx_rs::RunChild::Text(text) = run_child {
            output.push_str(&text.text);
        }
    }
}

/// 讀取 XLSX：第一行列出所有工作表名稱，接著是第一個工作表的前 `max_rows` 列
pub fn read_xlsx_text(path: &Path, max_rows: usize) -> Result<String> {
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e| anyhow!("無法開啟 XLSX {}: {e}", path.display()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut lines = vec![format!("Sheets: {}", sheet_names.join(", "))];

    if let Some(first_sheet) = sheet_names.first() {
        let range = workbook
            .worksheet_range(first_sheet)
            .map_err(|e| anyhow!("無法讀取工作表 {first_sheet}: {e}"))?;

        for row in range.rows().take(max_rows) {
            let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
            lines.push(cells.join(" | "));
        }
    }

    Ok(lines.join("\n"))
}

/// 讀取 CSV 前 `max_rows` 筆紀錄（含標題列）
pub fn read_csv_text(path: &Path, max_rows: usize) -> Result<String> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("無法開啟 CSV: {}", path.display()))?;

    let mut lines = Vec::new();
    for record in reader.records().take(max_rows) {
        let record = record.with_context(|| format!("CSV 格式錯誤: {}", path.display()))?;
        lines.push(record.iter().collect::<Vec<_>>().join(" | "));
    }

    Ok(lines.join("\n"))
}

pub fn read_plain_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("無法讀取文字檔: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::extractor::fixtures::{write_docx, write_text_pdf, write_xlsx};
    use tempfile::TempDir;

    #[test]
    fn test_read_pdf_first_two_pages() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("facture_cocody.pdf");
        write_text_pdf(
            &path,
            &[
                "Page one facture station Cocody",
                "Page two montant total FCFA",
                "Page three annexe signature",
            ],
        );

        let text = read_pdf_text(&path, 2).unwrap();
        assert!(text.contains("facture station Cocody"), "got {text:?}");
        assert!(text.contains("montant total"), "got {text:?}");
        assert!(!text.contains("annexe"), "got {text:?}");
    }

    #[test]
    fn test_read_docx_joins_paragraphs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("contrat.docx");
        write_docx(&path, &["Contrat de location", "Moto electrique"]);

        let text = read_docx_text(&path).unwrap();
        assert_eq!(text, "Contrat de location\nMoto electrique");
    }

    #[test]
    fn test_read_xlsx_sheet_names_and_row_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.xlsx");
        let labels: Vec<String> = (1..=12).map(|i| format!("ligne {i}")).collect();
        let rows: Vec<Vec<&str>> = labels.iter().map(|label| vec![label.as_str(), "cocody"]).collect();
        write_xlsx(&path, &[("Transactions", rows), ("Resume", vec![vec!["total"]])]);

        let text = read_xlsx_text(&path, 10).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Sheets: Transactions, Resume");
        assert_eq!(lines[1], "ligne 1 | cocody");
        assert_eq!(lines[10], "ligne 10 | cocody");
        assert!(!text.contains("ligne 11"));
        assert!(!text.contains("total"));
    }

    #[test]
    fn test_read_csv_limits_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        let mut content = String::from("date,station,montant\n");
        for i in 0..30 {
            content.push_str(&format!("2024-03-{:02},cocody,{}\n", i % 28 + 1, i * 100));
        }
        fs::write(&path, content).unwrap();

        let text = read_csv_text(&path, 11).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "date | station | montant");
        assert_eq!(lines[1], "2024-03-01 | cocody | 0");
    }

    #[test]
    fn test_read_csv_flexible_rows() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ragged.csv");
        fs::write(&path, "a,b,c\nd\n").unwrap();

        let text = read_csv_text(&path, 11).unwrap();
        assert_eq!(text, "a | b | c\nd");
    }

    #[test]
    fn test_read_pdf_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.pdf");
        fs::write(&path, "this is not a pdf").unwrap();
        assert!(read_pdf_text(&path, 2).is_err());
    }

    #[test]
    fn test_read_docx_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.docx");
        fs::write(&path, "not a zip").unwrap();
        assert!(read_docx_text(&path).is_err());
    }

    #[test]
    fn test_read_xlsx_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.xlsx");
        fs::write(&path, "not a workbook").unwrap();
        assert!(read_xlsx_text(&path, 10).is_err());
    }
}
