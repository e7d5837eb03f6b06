/// Data model for FolderSleuth scan results.
///
/// Re-exports the entry/result types and size formatting helpers.
pub mod entry;
pub mod result;
pub mod size;

pub use entry::FileSystemEntry;
pub use result::ScanResult;
pub use size::{format_count, format_size, SizeUnit};
