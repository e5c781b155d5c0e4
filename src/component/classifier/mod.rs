//! 檔案分類元件
//!
//! 把抽取出的內容送到外部分類服務，驗證並正規化回應

mod main;
mod oracle;
mod prompt;
mod response;
mod types;

pub use main::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PACING, FileClassifier};
pub use oracle::{ClassificationOracle, OpenAiOracle, OracleError, OracleRequest, RequestContent};
pub use prompt::{build_chat_body, system_prompt};
pub use response::{ResponseError, extract_json_object, parse_response};
pub use types::ClassificationResult;
