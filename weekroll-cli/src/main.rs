use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use weekroll_core::{BatchConfig, BatchProcessor};

mod formatter;

#[derive(Parser)]
#[command(name = "weekroll")]
#[command(about = "Batch republisher for weekly Excel workbooks", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory to scan for workbook files (default: current directory)
    #[arg(value_name = "DIRECTORY")]
    directory: Option<PathBuf>,

    /// Directory receiving the date-prefixed copies
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory receiving the archived originals
    #[arg(long, value_name = "DIR")]
    archive_dir: Option<PathBuf>,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Show what would be processed without making changes
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        BatchConfig::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("weekroll.toml");
        if default_config_path.exists() {
            BatchConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "Failed to load config from {}",
                    default_config_path.display()
                )
            })?
        } else {
            BatchConfig::default()
        }
    };

    // Flags override the config file
    if let Some(directory) = cli.directory {
        config.directory = directory;
    }
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(archive_dir) = cli.archive_dir {
        config.archive_dir = archive_dir;
    }

    let processor = BatchProcessor::with_config(config);

    if cli.dry_run {
        let files = processor.discover().with_context(|| {
            format!(
                "Failed to scan directory: {}",
                processor.config().directory.display()
            )
        })?;
        formatter::print_dry_run(&processor, &files);
        return Ok(());
    }

    let report = processor.process_directory().with_context(|| {
        format!(
            "Failed to process directory: {}",
            processor.config().directory.display()
        )
    })?;

    match cli.format {
        OutputFormat::Human => formatter::print_human(&report),
        OutputFormat::Json => formatter::print_json(&report)?,
    }

    // Per-file failures live in the printed report, not the exit code
    Ok(())
}
