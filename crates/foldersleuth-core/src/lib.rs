/// FolderSleuth Core — scanning engine, data model, and export.
///
/// This crate contains all business logic with zero terminal dependencies.
/// Any frontend (the bundled CLI, a TUI, a test harness) drives it through
/// [`scanner::scan`] or [`scanner::start_scan`].
///
/// # Modules
///
/// - [`model`] — Scan entries, results, and size formatting.
/// - [`scanner`] — Parallel tree walk, skip accounting, and throttled progress.
/// - [`export`] — JSON and CSV serialisation of a finished scan.
pub mod export;
pub mod model;
pub mod scanner;

pub use model::{FileSystemEntry, ScanResult};
pub use scanner::{scan, ScanError, ScanOptions, Scanner};
