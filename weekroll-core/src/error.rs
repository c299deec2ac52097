//! Error taxonomy for per-file processing failures

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure while processing a single workbook file.
///
/// Both variants are captured at the batch boundary and recorded as a
/// per-file error string; neither aborts the rest of the batch.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The file could not be opened or parsed as a workbook
    #[error("cannot load workbook {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A filesystem step failed: directory creation, save, or archive move
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl ProcessError {
    pub(crate) fn load(path: &Path, source: impl Into<anyhow::Error>) -> Self {
        Self::Load {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn io(action: &'static str, path: &Path, source: impl Into<anyhow::Error>) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
