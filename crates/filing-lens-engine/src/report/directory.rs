use std::{
    path::{Path, PathBuf},
    time::SystemTime,
};

use tokio::fs;

use super::{AnalysisResult, AnalysisService, ReportError};

const ANALYSIS_PREFIX: &str = "comprehensive_analysis_";

/// Filename prefixes per individual analysis type, in lookup order.
const INDIVIDUAL_PREFIXES: &[(&str, &[&str])] = &[
    ("10k", &["query_answer_", "sec_tools_"]),
    ("8k", &["sec_8k_analyzer_"]),
    ("form4", &["sec_insider_analyzer_", "insider_analysis_"]),
];

/// Text used for an individual analysis type with no file on disk.
pub fn individual_placeholder(kind: &str) -> String {
    let upper = kind.to_uppercase();
    format!("# {upper} Analysis\n\nNo specific {upper} analysis available for this query.")
}

/// Serves the newest analysis found under a reports directory.
///
/// Each analysis run writes a `comprehensive_analysis_<timestamp>/`
/// directory holding the combined report and per-tool reports.
#[derive(Debug, Clone)]
pub struct ReportDirectoryService {
    root: PathBuf,
}

impl ReportDirectoryService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Most recently modified analysis directory; ties go to the later name.
    pub async fn latest_analysis_dir(&self) -> Result<PathBuf, ReportError> {
        let mut entries = fs::read_dir(&self.root)
            .await
            .map_err(|source| read_error(&self.root, source))?;
        let mut newest: Option<(SystemTime, String, PathBuf)> = None;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| read_error(&self.root, source))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(ANALYSIS_PREFIX) {
                continue;
            }
            let Ok(metadata) = entry.metadata().await else {
                continue;
            };
            if !metadata.is_dir() {
                continue;
            }
            let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            let candidate = (modified, name, entry.path());
            if newest
                .as_ref()
                .is_none_or(|best| (&candidate.0, &candidate.1) > (&best.0, &best.1))
            {
                newest = Some(candidate);
            }
        }

        newest
            .map(|(_, _, path)| path)
            .ok_or_else(|| ReportError::NoAnalysis(self.root.clone()))
    }

    /// Loads every report in `dir` into an [`AnalysisResult`].
    pub async fn load_analysis(
        &self,
        dir: &Path,
        query: &str,
    ) -> Result<AnalysisResult, ReportError> {
        let files = text_files(dir).await?;
        let mut result = AnalysisResult {
            query: query.to_string(),
            timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            analysis_directory: dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            ..Default::default()
        };

        if let Some(name) = first_with_prefix(&files, ANALYSIS_PREFIX) {
            result.combined_analysis = read_text(&dir.join(name)).await?;
            result.analysis_files.push(name.to_string());
            log::info!("loaded comprehensive analysis {name}");
        }

        for (kind, prefixes) in INDIVIDUAL_PREFIXES {
            let found = prefixes
                .iter()
                .find_map(|prefix| first_with_prefix(&files, prefix));
            let text = match found {
                Some(name) => {
                    result.analysis_files.push(name.to_string());
                    log::debug!("loaded {kind} analysis {name}");
                    read_text(&dir.join(name)).await?
                }
                None => individual_placeholder(kind),
            };
            result.individual_analyses.insert(kind.to_string(), text);
        }

        Ok(result)
    }
}

impl AnalysisService for ReportDirectoryService {
    type Error = ReportError;

    async fn analyze(&self, query: &str) -> Result<AnalysisResult, ReportError> {
        let dir = self.latest_analysis_dir().await?;
        log::info!("using analysis directory {}", dir.display());
        self.load_analysis(&dir, query).await
    }
}

fn read_error(path: &Path, source: std::io::Error) -> ReportError {
    ReportError::Read {
        path: path.to_path_buf(),
        source,
    }
}

async fn read_text(path: &Path) -> Result<String, ReportError> {
    fs::read_to_string(path)
        .await
        .map_err(|source| read_error(path, source))
}

/// Sorted names of the `.txt` files directly inside `dir`.
async fn text_files(dir: &Path) -> Result<Vec<String>, ReportError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|source| read_error(dir, source))?;
    let mut names = Vec::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|source| read_error(dir, source))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".txt") {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

fn first_with_prefix<'a>(files: &'a [String], prefix: &str) -> Option<&'a str> {
    files
        .iter()
        .find(|name| name.starts_with(prefix))
        .map(String::as_str)
}
