//! 處理報告

mod main;
mod types;

pub use main::{REPORT_TIMESTAMP_FORMAT, ReportGenerator};
pub use types::{
    CategoryCounts, ProcessingError, ProcessingReport, ProcessingResult, ProcessingStatus,
    ReportStatistics,
};
