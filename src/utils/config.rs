use crate::utils::errors::{LogSyncError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CHUNK_SIZE: usize = 10_000;
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub processing: ProcessingConfig,
    pub progress: ProgressConfig,
    pub logging: LoggingConfig,
    pub extract: Vec<ExtractJob>,
    pub sync: Vec<SyncJob>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub chunk_size: usize,
    pub preview_rows: usize,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub log_every_percent: u8,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            log_every_percent: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// One column extraction, e.g. trimming a raw per-subject log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractJob {
    pub input: PathBuf,
    /// Defaults to `<input>-mod.csv`.
    pub output: Option<PathBuf>,
    pub columns: Vec<String>,
}

/// One alignment of two logs on a shared column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncJob {
    pub file_a: PathBuf,
    pub file_b: PathBuf,
    pub column: String,
}

impl AppConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LogSyncError::ConfigError(e.to_string()))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| LogSyncError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when `path` does not exist; a present but invalid file is an error.
    pub fn load_if_present(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.processing.chunk_size == 0 {
            return Err(LogSyncError::ConfigError(
                "processing.chunk_size must be greater than zero".to_string(),
            ));
        }
        if let Some(job) = self.extract.iter().find(|job| job.columns.is_empty()) {
            return Err(LogSyncError::ConfigError(format!(
                "extract job for {} lists no columns",
                job.input.display()
            )));
        }
        Ok(())
    }
}
