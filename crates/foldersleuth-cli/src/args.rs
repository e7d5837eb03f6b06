/// Command-line arguments.
use clap::{ArgAction, Parser};
use foldersleuth_core::export::ExportFormat;
use foldersleuth_core::scanner::ScanOptions;
use std::path::PathBuf;
use tracing::Level;

/// Number of entries shown when `--top` is not given.
pub const DEFAULT_TOP: usize = 40;

#[derive(Debug, Parser)]
#[command(name = "foldersleuth")]
#[command(version)]
#[command(about = "Find what is taking up space in a folder")]
#[command(long_about = "FolderSleuth scans a directory tree in parallel and lists the largest \
    files and folders directly inside it. Unreadable entries are skipped and counted.\n\n\
    Examples:\n  \
    foldersleuth ~/Downloads                 # Analyse a folder\n  \
    foldersleuth /var -n 10 --once           # Top 10, no follow-up prompt\n  \
    foldersleuth . --export report.csv       # Also write the full result as CSV")]
pub struct Cli {
    /// Directory to analyse (prompted for when omitted or invalid)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Number of entries to show
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_TOP)]
    pub top: usize,

    /// Worker threads for the scan (default: one per CPU)
    #[arg(short = 'j', long, value_name = "N", env = "FOLDERSLEUTH_THREADS")]
    pub threads: Option<usize>,

    /// Do not show the live "Scanning:" line
    #[arg(long)]
    pub no_progress: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write the full result to FILE
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Export format (default: from the FILE extension, else json)
    #[arg(long, value_name = "FORMAT", requires = "export")]
    pub format: Option<ExportFormat>,

    /// Analyse one directory and exit without asking for another
    #[arg(long)]
    pub once: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            threads: self.threads,
            ..ScanOptions::default()
        }
    }

    /// Resolved export format, if exporting at all.
    pub fn export_format(&self) -> Option<ExportFormat> {
        let path = self.export.as_deref()?;
        Some(self.format.unwrap_or_else(|| ExportFormat::from_path(path)))
    }

    /// Log level for the subscriber: warnings by default, `-v` for info,
    /// `-vv` and up for debug.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }
}
