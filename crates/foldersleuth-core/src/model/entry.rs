/// A single file or directory found directly under the scan root.
///
/// Entries are created once by the walker and never mutated afterwards.
/// Directory entries carry the aggregated size of their whole subtree.
use compact_str::CompactString;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSystemEntry {
    /// Full path of the entry as discovered under the scan root.
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: PathBuf,

    /// File or directory name only (the last path component).
    pub name: CompactString,

    /// Size in bytes. For directories this is the sum of every readable
    /// file beneath it; 0 when the directory's own listing failed.
    pub size: u64,

    /// `true` if this entry represents a directory.
    pub is_dir: bool,
}

impl FileSystemEntry {
    /// Create a file entry with the given size.
    pub fn new_file(path: PathBuf, size: u64) -> Self {
        Self {
            name: display_name(&path),
            path,
            size,
            is_dir: false,
        }
    }

    /// Create a directory entry with its aggregated subtree size.
    pub fn new_dir(path: PathBuf, size: u64) -> Self {
        Self {
            name: display_name(&path),
            path,
            size,
            is_dir: true,
        }
    }

    /// Ordering used for reports: largest first.
    ///
    /// Ties compare equal so a stable sort keeps discovery order.
    pub fn cmp_by_size_desc(&self, other: &Self) -> Ordering {
        other.size.cmp(&self.size)
    }
}

/// Derive a display name: the final component, or the whole path for
/// roots such as `/` that have none.
fn display_name(path: &Path) -> CompactString {
    match path.file_name() {
        Some(name) => CompactString::new(name.to_string_lossy()),
        None => CompactString::new(path.to_string_lossy()),
    }
}

/// Serialize a path as text, replacing bytes that are not valid UTF-8.
///
/// Unix file names are arbitrary bytes; serde's own `Path` impl rejects them.
pub(crate) fn serialize_path_lossy<P, S>(path: &P, serializer: S) -> Result<S::Ok, S::Error>
where
    P: AsRef<Path>,
    S: Serializer,
{
    serializer.serialize_str(&path.as_ref().to_string_lossy())
}
