pub mod load;
pub mod types;

pub use types::{
    Category, DEFAULT_THRESHOLD, Destination, OracleSettings, PipelineConfig, REPORT_FILE_NAME,
    REVIEW_FOLDER, UserSettings,
};
