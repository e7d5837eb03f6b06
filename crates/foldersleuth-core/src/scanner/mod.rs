/// Scanner module — orchestrates a folder-size scan.
///
/// [`Scanner::scan`] is the synchronous entry point: it builds a worker pool,
/// runs the [`walker`] over the root, and returns a sorted [`ScanResult`].
/// [`start_scan`] runs the same thing on a background thread and streams
/// throttled progress over a crossbeam channel, for frontends that want to
/// draw while the walk is in flight.
pub mod error;
pub mod fs;
pub mod progress;
pub mod skip;
pub mod throttle;
pub mod walker;

pub use error::{FsError, ScanError};
pub use fs::{FileSystem, OsFileSystem};
pub use skip::{SkipReason, SkipSummary};
pub use throttle::{ProgressThrottle, DEFAULT_THROTTLE};
pub use walker::VisitSink;

use crate::model::ScanResult;
use crossbeam_channel::Receiver;
use progress::ScanProgress;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walker::TreeWalker;

/// Maximum number of progress messages that may queue up in the channel.
///
/// Visits are throttled to one per [`DEFAULT_THROTTLE`] before they reach
/// the channel, so this is several seconds of headroom for a stalled
/// frontend before the scanner blocks on `send`.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 256;

/// Tunables for a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Worker pool size. `None` (or 0) means one per available CPU.
    pub threads: Option<usize>,
    /// Minimum gap between forwarded progress notifications.
    pub throttle: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            threads: None,
            throttle: DEFAULT_THROTTLE,
        }
    }
}

impl ScanOptions {
    /// Effective number of worker threads.
    pub fn worker_count(&self) -> usize {
        self.threads
            .filter(|&n| n > 0)
            .unwrap_or_else(num_cpus::get)
    }
}

/// A configured scanner over some [`FileSystem`].
#[derive(Debug, Clone, Default)]
pub struct Scanner<F = OsFileSystem> {
    fs: F,
    options: ScanOptions,
}

impl Scanner<OsFileSystem> {
    /// Scanner over the real filesystem with default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ScanOptions) -> Self {
        Self {
            fs: OsFileSystem,
            options,
        }
    }
}

impl<F: FileSystem> Scanner<F> {
    pub fn with_filesystem(fs: F, options: ScanOptions) -> Self {
        Self { fs, options }
    }

    /// Walk `root` and return its direct children sorted largest first.
    ///
    /// `on_visit` receives at most one path per throttle interval, from
    /// whichever worker thread happens to get through. Returns only after
    /// the whole tree has been walked.
    pub fn scan(
        &self,
        root: &Path,
        on_visit: Option<VisitSink<'_>>,
    ) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        let workers = self.options.worker_count();
        debug!("Building worker pool with {workers} threads");
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("foldersleuth-worker-{i}"))
            .build()?;

        info!("Starting scan of {}", root.display());
        let progress = on_visit.map(|sink| ProgressThrottle::new(self.options.throttle, sink));
        let walker = TreeWalker::new(&self.fs, progress);

        let entries = walker.walk_root(root, &pool).inspect_err(|err| {
            warn!("Scan of {} aborted: {err}", root.display());
        })?;

        let result = ScanResult::new(
            root.to_path_buf(),
            entries,
            walker.skips(),
            start.elapsed(),
        );
        info!(
            "Scan of {} complete: {} entries, {} bytes, {} skipped in {:?}",
            root.display(),
            result.len(),
            result.total_size,
            result.skipped(),
            result.duration
        );
        Ok(result)
    }
}

/// Scan `root` on the real filesystem with default options.
pub fn scan(root: &Path, on_visit: Option<VisitSink<'_>>) -> Result<ScanResult, ScanError> {
    Scanner::new().scan(root, on_visit)
}

/// Handle to a scan running on a background thread.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    thread: thread::JoinHandle<Result<ScanResult, ScanError>>,
}

impl ScanHandle {
    /// Block until the scan thread finishes and take its result.
    ///
    /// Progress still queued is discarded. The receiver is dropped before
    /// joining so a scan nobody is draining never blocks on a full channel.
    pub fn wait(self) -> Result<ScanResult, ScanError> {
        let ScanHandle {
            progress_rx,
            thread,
        } = self;
        drop(progress_rx);
        thread.join().unwrap_or(Err(ScanError::WorkerPanicked))
    }
}

/// Start a scan on a background thread.
///
/// Visits are forwarded as [`ScanProgress::Visiting`]; the last message is
/// always [`ScanProgress::Complete`] or [`ScanProgress::Failed`].
pub fn start_scan(root: PathBuf, options: ScanOptions) -> Result<ScanHandle, ScanError> {
    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);

    let thread = thread::Builder::new()
        .name("foldersleuth-scanner".into())
        .spawn(move || {
            let visit_tx = progress_tx.clone();
            let on_visit = move |path: &Path| {
                let _ = visit_tx.send(ScanProgress::Visiting {
                    path: path.to_path_buf(),
                });
            };

            let result =
                Scanner::with_options(options).scan(&root, Some(&on_visit as VisitSink<'_>));
            let last = match &result {
                Ok(done) => ScanProgress::Complete {
                    duration: done.duration,
                    entries: done.len(),
                    skipped: done.skipped(),
                },
                Err(err) => ScanProgress::Failed {
                    message: err.to_string(),
                },
            };
            let _ = progress_tx.send(last);
            result
        })
        .map_err(ScanError::Spawn)?;

    Ok(ScanHandle {
        progress_rx,
        thread,
    })
}
