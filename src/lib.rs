//! frlens - 終端法語句構透視工具
//!
//! 把法語句子交給分析服務，依回傳的關鍵詞在原句上標出高亮片段，
//! 並提供互動式 TUI 與純文字報告兩種輸出。

pub mod analysis;
pub mod app;
pub mod config;
pub mod dialog;
pub mod highlight;
pub mod input;
pub mod model;
pub mod report;
pub mod style;
pub mod terminal;
pub mod utils;
pub mod view;

// 重新導出常用類型
pub use analysis::{AnalysisError, Analyzer};
pub use app::{App, AppState};
pub use config::Config;
pub use highlight::{compose, Segment};
pub use model::{AnalysisResponse, AnalysisResult, KeywordAnnotation, KeywordType};
