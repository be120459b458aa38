//! Analysis results and the services that produce them.

mod directory;

use std::{
    collections::BTreeMap,
    future::Future,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use directory::{ReportDirectoryService, individual_placeholder};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("reports directory does not exist: {0}")]
    MissingRoot(PathBuf),
    #[error("reports path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("no analysis directory found under {0}")]
    NoAnalysis(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid analysis response: {0}")]
    Json(#[from] serde_json::Error),
}

/// A filing the analysis drew on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub company: String,
    pub year: String,
    pub filename: String,
}

/// Response of one analysis run.
///
/// Only `combined_analysis` is rendered by the markup pipeline; the other
/// fields pass through to display code untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub query: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub analysis_directory: Option<String>,
    #[serde(default)]
    pub combined_analysis: String,
    /// Keyed by analysis type: `10k`, `8k`, `form4`.
    #[serde(default)]
    pub individual_analyses: BTreeMap<String, String>,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
    #[serde(default)]
    pub analysis_files: Vec<String>,
}

impl AnalysisResult {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The text fed to the markup transformer.
    pub fn report_body(&self) -> &str {
        &self.combined_analysis
    }
}

/// The remote analysis call, awaited exactly once per query.
pub trait AnalysisService {
    type Error: std::error::Error + Send + Sync + 'static;

    fn analyze(&self, query: &str) -> impl Future<Output = Result<AnalysisResult, Self::Error>>;
}

/// Reads a report file: raw text as-is, or the `combined_analysis` of a
/// saved `.json` response.
pub fn load_report_text(path: &Path) -> Result<String, ReportError> {
    let text = std::fs::read_to_string(path).map_err(|source| ReportError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if path.extension().is_some_and(|ext| ext == "json") {
        Ok(AnalysisResult::from_json(&text)?.combined_analysis)
    } else {
        Ok(text)
    }
}

/// Checks that the reports root exists and is a directory.
pub fn validate_reports_dir(path: &Path) -> Result<(), ReportError> {
    if !path.exists() {
        return Err(ReportError::MissingRoot(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ReportError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}
