//! Per-file batch results

use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome for one source file. Exactly one of `output` / `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// Source path as discovered
    pub source: PathBuf,
    pub success: bool,
    /// Path of the republished copy, when processing succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Captured failure message, when processing failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn ok(source: PathBuf, output: PathBuf) -> Self {
        Self {
            source,
            success: true,
            output: Some(output),
            error: None,
        }
    }

    pub fn err(source: PathBuf, error: String) -> Self {
        Self {
            source,
            success: false,
            output: None,
            error: Some(error),
        }
    }
}

/// Results for a whole batch, in discovery order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn push(&mut self, entry: FileReport) {
        self.files.push(entry);
    }

    /// Look up the entry for a source path
    pub fn get(&self, source: &Path) -> Option<&FileReport> {
        self.files.iter().find(|f| f.source == source)
    }

    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.success).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.succeeded()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
