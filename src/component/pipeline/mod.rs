//! 分類與分流管線

mod duplicate_index;
mod main;

pub use duplicate_index::DuplicateIndex;
pub use main::{Pipeline, route};
