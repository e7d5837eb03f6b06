/// The tree walker — sizes every direct child of a root directory.
///
/// Files directly under the root are measured on the calling thread. Each
/// subdirectory of the root becomes one task on the worker pool, and that
/// task walks its whole subtree sequentially. Fan-out happens at the first
/// level only, so the number of threads never depends on tree shape.
///
/// Recoverable failures (see [`FsError::skip_reason`]) are counted and the
/// offending entry dropped; anything else ends the walk with
/// [`ScanError::Fatal`].
use super::error::{FsError, ScanError};
use super::fs::{FileSystem, Listing};
use super::skip::{SkipCounter, SkipSummary};
use super::throttle::ProgressThrottle;
use crate::model::FileSystemEntry;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The optional visit callback as the walker sees it.
pub type VisitSink<'a> = &'a (dyn Fn(&Path) + Sync);

pub(crate) struct TreeWalker<'a, F: FileSystem> {
    fs: &'a F,
    skips: SkipCounter,
    progress: Option<ProgressThrottle<VisitSink<'a>>>,
}

impl<'a, F: FileSystem> TreeWalker<'a, F> {
    pub(crate) fn new(fs: &'a F, progress: Option<ProgressThrottle<VisitSink<'a>>>) -> Self {
        Self {
            fs,
            skips: SkipCounter::new(),
            progress,
        }
    }

    pub(crate) fn skips(&self) -> SkipSummary {
        self.skips.snapshot()
    }

    /// Produce one entry per readable direct child of `root`, unordered.
    pub(crate) fn walk_root(
        &self,
        root: &Path,
        pool: &ThreadPool,
    ) -> Result<Vec<FileSystemEntry>, ScanError> {
        let Some((files, subdirs)) = self.list_children(root)? else {
            return Ok(Vec::new());
        };

        let mut entries = Vec::with_capacity(files.len() + subdirs.len());
        for listed in files {
            if let Some((path, size)) = self.measure_file(listed)? {
                entries.push(FileSystemEntry::new_file(path, size));
            }
        }

        let subdirs = self.readable(subdirs)?;
        debug!(
            "{} files measured, fanning out {} directories",
            entries.len(),
            subdirs.len()
        );

        let dir_entries = pool.install(|| {
            subdirs
                .into_par_iter()
                .map(|dir| {
                    let size = self.size_of(&dir)?;
                    Ok(FileSystemEntry::new_dir(dir, size))
                })
                .collect::<Result<Vec<_>, ScanError>>()
        })?;

        entries.extend(dir_entries);
        Ok(entries)
    }

    /// Total size of everything beneath `dir`, walked depth-first on the
    /// current thread.
    ///
    /// Uses an explicit stack rather than recursion so tree depth is bounded
    /// by heap, not by the worker's stack. A directory whose listing fails
    /// contributes 0 and costs one skip.
    fn size_of(&self, dir: &Path) -> Result<u64, ScanError> {
        let mut total: u64 = 0;
        let mut pending: Vec<PathBuf> = vec![dir.to_path_buf()];

        while let Some(current) = pending.pop() {
            self.visit(&current);
            let Some((files, subdirs)) = self.list_children(&current)? else {
                continue;
            };
            for listed in files {
                if let Some((_, size)) = self.measure_file(listed)? {
                    total = total.saturating_add(size);
                }
            }
            // Reversed so the first listed subdirectory is walked first.
            pending.extend(self.readable(subdirs)?.into_iter().rev());
        }

        Ok(total)
    }

    /// List files and subdirectories of `dir`. `None` means the listing
    /// failed recoverably and has been counted.
    fn list_children(&self, dir: &Path) -> Result<Option<(Listing, Listing)>, ScanError> {
        match self.fs.list_children(dir) {
            Ok(children) => Ok(Some(children)),
            Err(err) => {
                self.absorb(err)?;
                Ok(None)
            }
        }
    }

    /// Size one listed file. `None` means it was skipped.
    fn measure_file(
        &self,
        listed: Result<PathBuf, FsError>,
    ) -> Result<Option<(PathBuf, u64)>, ScanError> {
        let outcome = listed.and_then(|path| {
            let size = self.fs.file_size(&path)?;
            Ok((path, size))
        });
        match outcome {
            Ok((path, size)) => {
                self.visit(&path);
                Ok(Some((path, size)))
            }
            Err(err) => {
                self.absorb(err)?;
                Ok(None)
            }
        }
    }

    /// Drop unreadable items from a listing, counting each one.
    fn readable(&self, listing: Listing) -> Result<Vec<PathBuf>, ScanError> {
        let mut paths = Vec::with_capacity(listing.len());
        for listed in listing {
            match listed {
                Ok(path) => paths.push(path),
                Err(err) => self.absorb(err)?,
            }
        }
        Ok(paths)
    }

    /// Count a recoverable failure, or escalate it.
    fn absorb(&self, err: FsError) -> Result<(), ScanError> {
        match err.skip_reason() {
            Some(reason) => {
                debug!("skipping: {err}");
                self.skips.record(reason);
                Ok(())
            }
            None => Err(ScanError::Fatal(err)),
        }
    }

    fn visit(&self, path: &Path) {
        if let Some(progress) = &self.progress {
            progress.report(path);
        }
    }
}
