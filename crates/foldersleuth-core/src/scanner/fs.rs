/// Filesystem query seam used by the walker.
///
/// The walker only ever asks three questions: which files live in a
/// directory, which subdirectories do, and how big is a file. Keeping them
/// behind a trait lets tests replace the OS with an in-memory tree that
/// fails on demand.
use super::error::FsError;
use std::fs;
use std::path::{Path, PathBuf};

/// Children of one directory. Each item is either a path or the failure
/// that prevented reading that single entry.
pub type Listing = Vec<Result<PathBuf, FsError>>;

pub trait FileSystem: Sync {
    /// Non-directory children of `dir`.
    ///
    /// Entries whose type could not be determined are reported here (as
    /// errors) and never by [`list_subdirectories`](Self::list_subdirectories),
    /// so each one is counted once.
    fn list_files(&self, dir: &Path) -> Result<Listing, FsError>;

    /// Directory children of `dir`. Symlinks to directories are not included.
    fn list_subdirectories(&self, dir: &Path) -> Result<Listing, FsError>;

    /// Size in bytes of a single non-directory entry.
    fn file_size(&self, path: &Path) -> Result<u64, FsError>;

    /// Files and subdirectories of `dir` together, as `(files, subdirs)`.
    ///
    /// Fails if either listing fails. Implementations that can produce both
    /// from one directory read should override this.
    fn list_children(&self, dir: &Path) -> Result<(Listing, Listing), FsError> {
        Ok((self.list_files(dir)?, self.list_subdirectories(dir)?))
    }
}

/// The real filesystem via `std::fs`. Symlinks are never followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    /// One `read_dir` pass, split into `(files, subdirs)`. Entries that
    /// cannot be read or typed land in `files` as errors.
    fn read_children(dir: &Path) -> Result<(Listing, Listing), FsError> {
        let iter = fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;
        let mut files = Vec::new();
        let mut subdirs = Vec::new();
        for entry in iter {
            match entry {
                Ok(entry) => match entry.file_type() {
                    Ok(ft) if ft.is_dir() => subdirs.push(Ok(entry.path())),
                    Ok(_) => files.push(Ok(entry.path())),
                    Err(err) => files.push(Err(FsError::from_io(entry.path(), err))),
                },
                Err(err) => files.push(Err(FsError::from_io(dir, err))),
            }
        }
        Ok((files, subdirs))
    }
}

impl FileSystem for OsFileSystem {
    fn list_files(&self, dir: &Path) -> Result<Listing, FsError> {
        Self::read_children(dir).map(|(files, _)| files)
    }

    fn list_subdirectories(&self, dir: &Path) -> Result<Listing, FsError> {
        Self::read_children(dir).map(|(_, subdirs)| subdirs)
    }

    fn list_children(&self, dir: &Path) -> Result<(Listing, Listing), FsError> {
        Self::read_children(dir)
    }

    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        fs::symlink_metadata(path)
            .map(|meta| meta.len())
            .map_err(|e| FsError::from_io(path, e))
    }
}
