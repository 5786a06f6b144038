use std::fs;
use std::path::{Path, PathBuf};

use super::{into_result, AnalysisError, Analyzer};
use crate::model::{AnalysisResponse, AnalysisResult};

/// 從檔案讀取已存檔的服務回應，不連網
///
/// 檔案內容是 `AnalysisResponse` JSON（與服務輸出格式相同）。
/// 每次分析都重新讀檔，方便邊改檔邊看結果。
pub struct ReplayAnalyzer {
    path: PathBuf,
}

impl ReplayAnalyzer {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Analyzer for ReplayAnalyzer {
    fn analyze(&self, sentence: &str) -> Result<AnalysisResult, AnalysisError> {
        log::debug!("replaying analysis from {}", self.path.display());
        let content = fs::read_to_string(&self.path)?;
        let response: AnalysisResponse = serde_json::from_str(&content)?;
        into_result(response, sentence.trim())
    }
}
