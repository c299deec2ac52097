//! Batch run configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "modified_excel_workbooks";
pub const DEFAULT_ARCHIVE_DIR: &str = "archived_data";

/// Configuration for one batch run.
///
/// The two destination directories are always threaded explicitly through
/// the pipeline; nothing reads them as ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Directory scanned for workbook files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Directory receiving the date-prefixed, all-sheets-visible copies
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Directory receiving the untouched originals
    #[serde(default = "default_archive_dir")]
    pub archive_dir: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            output_dir: default_output_dir(),
            archive_dir: default_archive_dir(),
        }
    }
}

impl BatchConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: BatchConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_archive_dir() -> PathBuf {
    PathBuf::from(DEFAULT_ARCHIVE_DIR)
}
