use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Hold times for the progress steps, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub parse_query_ms: u64,
    pub search_filings_ms: u64,
    pub run_analysis_ms: u64,
    pub completion_pause_ms: u64,
    pub final_hold_ms: u64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            parse_query_ms: 800,
            search_filings_ms: 1200,
            run_analysis_ms: 1500,
            completion_pause_ms: 300,
            final_hold_ms: 600,
        }
    }
}

impl ProgressConfig {
    pub fn lead_in(&self) -> [Duration; 3] {
        [
            Duration::from_millis(self.parse_query_ms),
            Duration::from_millis(self.search_filings_ms),
            Duration::from_millis(self.run_analysis_ms),
        ]
    }

    pub fn completion_pause(&self) -> Duration {
        Duration::from_millis(self.completion_pause_ms)
    }

    pub fn final_hold(&self) -> Duration {
        Duration::from_millis(self.final_hold_ms)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub reports_path: PathBuf,
    #[serde(default)]
    pub progress: ProgressConfig,
}

impl Config {
    pub fn new(reports_path: impl Into<PathBuf>) -> Self {
        Self {
            reports_path: reports_path.into(),
            progress: ProgressConfig::default(),
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the reports path
        config.reports_path =
            Self::expand_path(&config.reports_path).unwrap_or(config.reports_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/filing-lens");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        shellexpand::full(&path_str)
            .ok()
            .map(|expanded| PathBuf::from(expanded.as_ref()))
    }
}
