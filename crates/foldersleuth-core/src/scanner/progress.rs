/// Scan progress reporting — lightweight messages sent from the scan
/// thread to the frontend via a crossbeam channel.
use std::path::PathBuf;
use std::time::Duration;

/// Progress updates sent from the scan thread.
///
/// `Visiting` is already throttled; the frontend can render every one.
/// The finished [`ScanResult`](crate::ScanResult) itself is returned from
/// [`ScanHandle::wait`](super::ScanHandle::wait), not sent over the channel.
#[derive(Debug)]
pub enum ScanProgress {
    /// A path currently being walked.
    Visiting { path: PathBuf },
    /// The walk finished.
    Complete {
        duration: Duration,
        entries: usize,
        skipped: u64,
    },
    /// The walk hit a fatal error.
    Failed { message: String },
}

impl ScanProgress {
    /// `true` for the last message a scan will ever send.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanProgress::Complete { .. } | ScanProgress::Failed { .. })
    }
}
