/// Skip accounting — entries that could not be read.
///
/// Workers increment the counter concurrently; one atomic per reason means
/// no lock and no lost updates. `Relaxed` is enough because the counts are
/// only read after every worker has joined.
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Why an entry was left out of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkipReason {
    AccessDenied,
    PathTooLong,
    Io,
}

/// Shared, per-scan counter of skipped entries.
#[derive(Debug, Default)]
pub struct SkipCounter {
    access_denied: AtomicU64,
    path_too_long: AtomicU64,
    io: AtomicU64,
}

impl SkipCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, reason: SkipReason) {
        let slot = match reason {
            SkipReason::AccessDenied => &self.access_denied,
            SkipReason::PathTooLong => &self.path_too_long,
            SkipReason::Io => &self.io,
        };
        slot.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current counts into a plain value.
    pub fn snapshot(&self) -> SkipSummary {
        SkipSummary {
            access_denied: self.access_denied.load(Ordering::Relaxed),
            path_too_long: self.path_too_long.load(Ordering::Relaxed),
            io: self.io.load(Ordering::Relaxed),
        }
    }
}

/// Skipped-entry counts by reason, as carried in a finished result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipSummary {
    pub access_denied: u64,
    pub path_too_long: u64,
    pub io: u64,
}

impl SkipSummary {
    pub fn total(&self) -> u64 {
        self.access_denied + self.path_too_long + self.io
    }
}
