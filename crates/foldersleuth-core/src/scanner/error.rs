/// Error taxonomy for the tree walk.
///
/// [`FsError`] is what a single filesystem query can fail with. Three of
/// its classes are absorbed into the skip counter; anything else aborts the
/// scan as a [`ScanError::Fatal`].
use super::skip::SkipReason;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// OS error code for "file name too long" on this platform.
#[cfg(windows)]
const NAME_TOO_LONG: i32 = 206; // ERROR_FILENAME_EXCED_RANGE
#[cfg(target_os = "linux")]
const NAME_TOO_LONG: i32 = 36; // ENAMETOOLONG
#[cfg(all(unix, not(target_os = "linux")))]
const NAME_TOO_LONG: i32 = 63; // ENAMETOOLONG on BSD-derived systems
#[cfg(not(any(unix, windows)))]
const NAME_TOO_LONG: i32 = i32::MIN;

/// Failure of one filesystem query (listing a directory or sizing a file).
#[derive(Debug, Error)]
pub enum FsError {
    #[error("access denied: {}", .path.display())]
    AccessDenied { path: PathBuf },

    #[error("path too long: {}", .path.display())]
    PathTooLong { path: PathBuf },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected failure at {}: {source}", .path.display())]
    Unexpected {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Classify an `io::Error` raised while touching `path`.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::PermissionDenied => FsError::AccessDenied { path },
            io::ErrorKind::InvalidFilename => FsError::PathTooLong { path },
            io::ErrorKind::OutOfMemory => FsError::Unexpected { path, source: err },
            _ if err.raw_os_error() == Some(NAME_TOO_LONG) => FsError::PathTooLong { path },
            _ => FsError::Io { path, source: err },
        }
    }

    /// The skip bucket this failure belongs to, or `None` if it is fatal.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            FsError::AccessDenied { .. } => Some(SkipReason::AccessDenied),
            FsError::PathTooLong { .. } => Some(SkipReason::PathTooLong),
            FsError::Io { .. } => Some(SkipReason::Io),
            FsError::Unexpected { .. } => None,
        }
    }
}

/// Reasons a scan as a whole can fail.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A filesystem failure outside the recoverable classes.
    #[error("scan aborted: {0}")]
    Fatal(#[source] FsError),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] io::Error),

    #[error("scanner thread panicked")]
    WorkerPanicked,
}
