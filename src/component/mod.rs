//! 功能元件模組
//!
//! 依相依順序：抽取 → 分類 → 命名 → 放置 → 報告，由管線串起來

pub mod classifier;
pub mod extractor;
pub mod organizer;
pub mod pipeline;
pub mod renamer;
pub mod reporter;

pub use classifier::{ClassificationOracle, FileClassifier, OpenAiOracle};
pub use extractor::FileExtractor;
pub use organizer::FileOrganizer;
pub use pipeline::Pipeline;
pub use renamer::FileRenamer;
pub use reporter::ReportGenerator;
