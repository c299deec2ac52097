//! weekroll-core: batch republishing of weekly Excel workbooks
//!
//! Scans a directory for workbook files, prefixes each with the reporting
//! date taken from its filename (or the most recent Sunday), forces every
//! worksheet visible, and moves the untouched original into an archive
//! directory.

pub mod config;
pub mod date;
pub mod discovery;
pub mod error;
pub mod paths;
pub mod report;
pub mod writer;

use std::fs;
use std::path::{Path, PathBuf};

pub use config::BatchConfig;
pub use date::{Clock, ReportDate, SystemClock, extract_report_date};
pub use error::ProcessError;
pub use report::{BatchReport, FileReport};

/// Main batch interface
pub struct BatchProcessor {
    config: BatchConfig,
    clock: Box<dyn Clock>,
}

impl BatchProcessor {
    /// Create a processor with default configuration
    pub fn new() -> Self {
        Self::with_config(BatchConfig::default())
    }

    /// Create a processor with custom configuration
    pub fn with_config(config: BatchConfig) -> Self {
        Self {
            config,
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the wall clock, for deterministic fallback dates in tests
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// List the workbook files a run would pick up, in processing order.
    pub fn discover(&self) -> std::io::Result<Vec<PathBuf>> {
        let output_name = self.config.output_dir.to_string_lossy();
        let archive_name = self.config.archive_dir.to_string_lossy();
        discovery::find_workbook_files(
            &self.config.directory,
            &[output_name.as_ref(), archive_name.as_ref()],
        )
    }

    /// Destination a source file would be republished to, computed without
    /// touching the filesystem.
    pub fn planned_output(&self, source: &Path) -> PathBuf {
        let name = basename(source);
        self.config
            .output_dir
            .join(paths::prefixed_filename(&name, self.clock.as_ref()))
    }

    /// Republish one workbook and archive the original.
    ///
    /// The date-prefixed, all-sheets-visible copy lands in the output
    /// directory; the original is then moved (not copied) into the archive
    /// directory under its unmodified basename. Returns the output path.
    pub fn process_file(&self, source: &Path) -> Result<PathBuf, ProcessError> {
        let name = basename(source);
        let new_name = paths::prefixed_filename(&name, self.clock.as_ref());

        let output_path = paths::dest_path(&self.config.output_dir, &new_name)
            .map_err(|e| ProcessError::io("cannot create", &self.config.output_dir, e))?;
        let archive_path = paths::dest_path(&self.config.archive_dir, &name)
            .map_err(|e| ProcessError::io("cannot create", &self.config.archive_dir, e))?;

        writer::unhide_all_sheets(source, Some(&output_path))?;
        move_file(source, &archive_path)?;

        Ok(output_path)
    }

    /// Process every discovered workbook.
    ///
    /// Each file runs inside a failure boundary: an error is recorded as
    /// that file's result and the batch moves on. Only a failure to scan
    /// the source directory itself is returned as an error.
    pub fn process_directory(&self) -> Result<BatchReport, ProcessError> {
        let files = self
            .discover()
            .map_err(|e| ProcessError::io("cannot scan", &self.config.directory, e))?;

        let mut report = BatchReport::default();
        for file in files {
            match self.process_file(&file) {
                Ok(output) => report.push(FileReport::ok(file, output)),
                Err(e) => report.push(FileReport::err(file, e.to_string())),
            }
        }

        Ok(report)
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Move `source` to `dest`, falling back to copy + remove when a plain
/// rename fails (typically a cross-device move).
fn move_file(source: &Path, dest: &Path) -> Result<(), ProcessError> {
    if fs::rename(source, dest).is_ok() {
        return Ok(());
    }
    fs::copy(source, dest).map_err(|e| ProcessError::io("cannot archive", source, e))?;
    fs::remove_file(source).map_err(|e| ProcessError::io("cannot archive", source, e))?;
    Ok(())
}
