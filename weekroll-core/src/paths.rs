//! Destination filename and directory construction

use crate::date::{Clock, extract_report_date};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Build the republished filename: the formatted reporting date, an
/// underscore, then the original name unchanged. The original name is
/// always recoverable as the suffix after the first underscore.
pub fn prefixed_filename(original: &str, clock: &dyn Clock) -> String {
    format!("{}_{}", extract_report_date(original, clock), original)
}

/// Join `filename` onto `dir`, creating `dir` first if needed.
/// Creation is idempotent; an existing directory is not an error.
pub fn dest_path(dir: &Path, filename: &str) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.join(filename))
}
