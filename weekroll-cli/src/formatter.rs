//! Output formatters for batch reports

use anyhow::Result;
use colored::*;
use std::path::{Path, PathBuf};
use weekroll_core::{BatchProcessor, BatchReport};

/// Print a report in human-readable format with colors
pub fn print_human(report: &BatchReport) {
    if report.is_empty() {
        println!("{}", "No workbook files found.".yellow());
        return;
    }

    println!("{}", "Processing complete!".bold());
    println!(
        "Files processed successfully: {}",
        report.succeeded().to_string().green()
    );
    if report.failed() > 0 {
        println!("Files failed: {}", report.failed().to_string().red());
    } else {
        println!("Files failed: {}", report.failed());
    }

    println!();
    println!("{}", "Detailed results:".bold().underline());
    for entry in &report.files {
        let source = basename(&entry.source);
        match (&entry.output, &entry.error) {
            (Some(output), _) => {
                println!("{} {} -> {}", "✓".green().bold(), source, basename(output));
            }
            (None, Some(error)) => {
                println!("{} {}: {}", "✗".red().bold(), source, error);
            }
            (None, None) => {}
        }
    }
}

/// Print a report in JSON format
pub fn print_json(report: &BatchReport) -> Result<()> {
    let output = serde_json::json!({
        "files": report.files,
        "summary": {
            "total": report.len(),
            "succeeded": report.succeeded(),
            "failed": report.failed(),
        }
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print what a run would do, without touching anything
pub fn print_dry_run(processor: &BatchProcessor, files: &[PathBuf]) {
    if files.is_empty() {
        println!("[DRY RUN] No workbook files found.");
        return;
    }

    println!("[DRY RUN] {} workbook file(s) found:", files.len());
    for file in files {
        println!(
            "  {} -> {}",
            file.display(),
            processor.planned_output(file).display()
        );
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
