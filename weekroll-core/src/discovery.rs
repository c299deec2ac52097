//! Workbook discovery in the source directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Recognized workbook extensions, in scan order.
const WORKBOOK_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// List workbook files directly inside `directory`.
///
/// The scan is non-recursive. All `.xlsx` matches come before all `.xls`
/// matches; within each extension the order is whatever the directory
/// iteration yields. Any path whose string form contains one of the
/// `exclude` names anywhere is skipped, which keeps the output and archive
/// directories (and anything named after them) out of the batch.
pub fn find_workbook_files(directory: &Path, exclude: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            entries.push(entry.path());
        }
    }

    let mut found = Vec::new();
    for ext in WORKBOOK_EXTENSIONS {
        for path in &entries {
            if path.extension().and_then(|s| s.to_str()) != Some(ext) {
                continue;
            }
            let display = path.to_string_lossy();
            if exclude.iter().any(|name| display.contains(name)) {
                continue;
            }
            found.push(path.clone());
        }
    }

    Ok(found)
}
