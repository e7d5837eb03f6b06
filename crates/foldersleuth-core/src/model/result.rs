/// The finished product of a scan, owned by the caller.
///
/// Holds every top-level entry (sorted largest first), the aggregate size,
/// and a breakdown of the entries that had to be skipped.
use super::entry::FileSystemEntry;
use crate::scanner::skip::SkipSummary;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScanResult {
    /// The directory that was scanned.
    pub root: PathBuf,

    /// Direct children of `root`, sorted descending by size.
    pub entries: Vec<FileSystemEntry>,

    /// Sum of all entry sizes.
    pub total_size: u64,

    /// Entries excluded because they could not be read, by reason.
    pub skips: SkipSummary,

    /// Wall time spent walking.
    pub duration: Duration,

    /// Local time at which the walk finished.
    pub finished_at: DateTime<Local>,
}

impl ScanResult {
    /// Assemble a result from unordered entries.
    ///
    /// Sorting is stable, so entries of equal size keep the order in which
    /// they were merged.
    pub fn new(
        root: PathBuf,
        mut entries: Vec<FileSystemEntry>,
        skips: SkipSummary,
        duration: Duration,
    ) -> Self {
        entries.sort_by(FileSystemEntry::cmp_by_size_desc);
        let total_size = entries.iter().map(|e| e.size).sum();
        Self {
            root,
            entries,
            total_size,
            skips,
            duration,
            finished_at: Local::now(),
        }
    }

    /// Total number of skipped entries across all reasons.
    pub fn skipped(&self) -> u64 {
        self.skips.total()
    }

    /// The `n` largest entries (fewer if the result is smaller).
    pub fn top(&self, n: usize) -> &[FileSystemEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_dir).count()
    }

    pub fn dir_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_dir).count()
    }
}
