/// Export of a finished scan to JSON or CSV.
///
/// JSON carries the whole report (root, timing, skip breakdown, entries);
/// CSV carries one row per entry for spreadsheets.
use crate::model::entry::serialize_path_lossy;
use crate::model::{FileSystemEntry, ScanResult};
use crate::scanner::SkipSummary;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown export format '{0}' (expected json or csv)")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Guess from a file extension; anything but `.csv` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(serialize_with = "serialize_path_lossy")]
    root: &'a Path,
    scanned_at: DateTime<Local>,
    duration_ms: u128,
    total_size: u64,
    skipped: u64,
    skip_summary: SkipSummary,
    entries: &'a [FileSystemEntry],
}

/// Write `result` in the requested format.
pub fn write_report<W: Write>(
    result: &ScanResult,
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => write_json(result, writer),
        ExportFormat::Csv => write_csv(result, writer),
    }
}

pub fn write_json<W: Write>(result: &ScanResult, writer: W) -> Result<(), ExportError> {
    let report = JsonReport {
        root: &result.root,
        scanned_at: result.finished_at,
        duration_ms: result.duration.as_millis(),
        total_size: result.total_size,
        skipped: result.skipped(),
        skip_summary: result.skips,
        entries: &result.entries,
    };
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

pub fn write_csv<W: Write>(result: &ScanResult, writer: W) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for entry in &result.entries {
        wtr.serialize(entry)?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}
