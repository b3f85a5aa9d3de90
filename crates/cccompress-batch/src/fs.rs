//! File-system collaborators: raw I/O and the suffix-matching lister.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{BatchError, BatchResult};

/// Suffix appended to an original file when it is kept as a backup
pub const BACKUP_SUFFIX: &str = ".bak";

/// Raw file I/O used by the single-file operations.
///
/// Implementations must be shareable across worker threads.
pub trait FileSystem: Send + Sync {
    /// Read the whole file into memory
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the file's contents, creating missing parent directories.
    ///
    /// Returns the number of bytes written.
    fn write_all(&self, path: &Path, data: &[u8]) -> io::Result<usize>;

    /// Rename `path` to its backup name, replacing any previous backup
    fn rename_to_backup(&self, path: &Path) -> io::Result<PathBuf>;
}

/// [`FileSystem`] backed by the local disk
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileSystem for LocalFs {
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_all(&self, path: &Path, data: &[u8]) -> io::Result<usize> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(data.len())
    }

    fn rename_to_backup(&self, path: &Path) -> io::Result<PathBuf> {
        let backup = backup_path(path);
        fs::rename(path, &backup)?;
        Ok(backup)
    }
}

/// Backup name for `path`: the full file name with [`BACKUP_SUFFIX`] appended
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// List every file under `root` whose name ends with `ext`.
///
/// The walk is recursive and visits entries of each directory in file-name
/// order, so the result is stable between runs. Matching ignores ASCII case
/// and an empty `ext` matches every file. The first traversal error aborts
/// the listing.
pub fn list_files(root: &Path, ext: &str) -> BatchResult<Vec<PathBuf>> {
    let ext = ext.to_ascii_lowercase();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| BatchError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_ascii_lowercase();
        if name.ends_with(&ext) {
            files.push(entry.into_path());
        }
    }

    debug!(
        "Listed {} files under {} matching '{}'",
        files.len(),
        root.display(),
        ext
    );

    Ok(files)
}
