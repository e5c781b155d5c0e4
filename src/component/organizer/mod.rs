//! 輸出目錄與檔案放置

mod main;

pub use main::{AmbiguityNote, FileOrganizer};
