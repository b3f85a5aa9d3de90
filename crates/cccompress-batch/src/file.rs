//! Single-file compress and decompress operations

use std::fmt;
use std::path::Path;

use cccompress_formats::{CompressionMode, FileCodec, ObfuscationKey, StrategyRegistry};
use tracing::debug;

use crate::error::{BatchError, BatchResult};
use crate::fs::{FileSystem, LocalFs};

/// Direction of a file transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Compress, obfuscate and frame with the given mode
    Compress(CompressionMode),
    /// Validate, de-obfuscate and decompress
    Decompress,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compress(mode) => write!(f, "compress ({mode})"),
            Self::Decompress => f.write_str("decompress"),
        }
    }
}

/// Run `operation` on one file in place.
///
/// The original is renamed to its `.bak` name only after the transform has
/// succeeded, so a failed file is left exactly as it was. With `overwrite`
/// set no backup is kept. Returns the number of bytes written.
///
/// # Errors
///
/// If the final write fails after the backup rename, the error is
/// [`BatchError::WriteAfterBackup`] and names the backup holding the
/// original contents.
pub fn process_file<F: FileSystem + ?Sized>(
    fs: &F,
    codec: &FileCodec<'_>,
    key: &ObfuscationKey,
    operation: Operation,
    path: &Path,
    overwrite: bool,
) -> BatchResult<usize> {
    let input = fs.read_all(path).map_err(|e| BatchError::io(path, e))?;

    let output = match operation {
        Operation::Compress(mode) => codec.encode(key, mode, &input),
        Operation::Decompress => codec.decode(key, &input).map(|(_, plain)| plain),
    }
    .map_err(|e| BatchError::codec(path, e))?;

    let backup = if overwrite {
        None
    } else {
        let backup = fs
            .rename_to_backup(path)
            .map_err(|e| BatchError::io(path, e))?;
        debug!("Kept original as {}", backup.display());
        Some(backup)
    };

    let written = fs.write_all(path, &output).map_err(|source| match backup {
        Some(backup) => BatchError::WriteAfterBackup {
            path: path.to_path_buf(),
            backup,
            source,
        },
        None => BatchError::io(path, source),
    })?;

    debug!(
        "{} {}: {} -> {} bytes",
        operation,
        path.display(),
        input.len(),
        written
    );

    Ok(written)
}

/// Compress one file on the local disk.
///
/// `mode` is a raw mode byte; unknown values are stored uncompressed.
pub fn compress_file(path: &Path, key: &str, mode: u8, overwrite: bool) -> BatchResult<usize> {
    let key = ObfuscationKey::parse(key)?;
    let registry = StrategyRegistry::default();
    process_file(
        &LocalFs,
        &FileCodec::new(&registry),
        &key,
        Operation::Compress(CompressionMode::from_byte_lossy(mode)),
        path,
        overwrite,
    )
}

/// Decompress one container file on the local disk
pub fn decompress_file(path: &Path, key: &str, overwrite: bool) -> BatchResult<usize> {
    let key = ObfuscationKey::parse(key)?;
    let registry = StrategyRegistry::default();
    process_file(
        &LocalFs,
        &FileCodec::new(&registry),
        &key,
        Operation::Decompress,
        path,
        overwrite,
    )
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fs::backup_path;
    use cccompress_formats::{CodecError, FormatError, KeyError};
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const KEY: &str = "ab.cd";

    #[test]
    fn test_compress_keeps_backup() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello world").expect("Test operation should succeed");

        let written = compress_file(&path, KEY, 1, false).expect("Test operation should succeed");

        let framed = fs::read(&path).expect("Test operation should succeed");
        assert_eq!(written, framed.len());
        assert_eq!(framed[11], 1);
        assert_eq!(
            fs::read(backup_path(&path)).expect("Test operation should succeed"),
            b"hello world"
        );
    }

    #[test]
    fn test_overwrite_leaves_no_backup() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"hello world").expect("Test operation should succeed");

        compress_file(&path, KEY, 5, true).expect("Test operation should succeed");
        assert!(!backup_path(&path).exists());

        decompress_file(&path, KEY, true).expect("Test operation should succeed");
        assert!(!backup_path(&path).exists());
        assert_eq!(
            fs::read(&path).expect("Test operation should succeed"),
            b"hello world"
        );
    }

    #[test]
    fn test_failed_decode_leaves_original_untouched() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let path = dir.path().join("plain.txt");
        fs::write(&path, b"not a container at all, just text").expect("Test operation should succeed");

        let err = decompress_file(&path, KEY, false).expect_err("plain text must not decode");
        assert!(matches!(
            err,
            BatchError::Codec {
                source: CodecError::Format(FormatError::InvalidMagic(_)),
                ..
            }
        ));
        assert!(!backup_path(&path).exists());
        assert_eq!(
            fs::read(&path).expect("Test operation should succeed"),
            b"not a container at all, just text"
        );
    }

    #[test]
    fn test_compressing_twice_refused() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let path = dir.path().join("twice.bin");
        fs::write(&path, b"payload").expect("Test operation should succeed");

        compress_file(&path, KEY, 2, true).expect("Test operation should succeed");
        let err = compress_file(&path, KEY, 2, true).expect_err("second compress must fail");
        assert!(matches!(
            err,
            BatchError::Codec {
                source: CodecError::Format(FormatError::AlreadyFramed),
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let path = dir.path().join("absent.txt");

        let err = compress_file(&path, KEY, 0, false).expect_err("must fail");
        assert!(matches!(err, BatchError::Io { path: p, .. } if p == path));
    }

    /// Local disk whose writes always fail
    struct ReadOnlyFs;

    impl FileSystem for ReadOnlyFs {
        fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
            LocalFs.read_all(path)
        }

        fn write_all(&self, _path: &Path, _data: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "disk is read-only"))
        }

        fn rename_to_backup(&self, path: &Path) -> io::Result<PathBuf> {
            LocalFs.rename_to_backup(path)
        }
    }

    #[test]
    fn test_write_failure_names_backup() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let path = dir.path().join("report.txt");
        fs::write(&path, b"original contents").expect("Test operation should succeed");
        let registry = StrategyRegistry::default();
        let key = ObfuscationKey::parse(KEY).expect("Test operation should succeed");

        let err = process_file(
            &ReadOnlyFs,
            &FileCodec::new(&registry),
            &key,
            Operation::Compress(CompressionMode::GZip),
            &path,
            false,
        )
        .expect_err("write must fail");

        let expected_backup = backup_path(&path);
        assert!(matches!(
            &err,
            BatchError::WriteAfterBackup { path: p, backup, .. }
                if *p == path && *backup == expected_backup
        ));
        assert!(err.to_string().contains("report.txt.bak"));
        assert!(!path.exists());
        assert_eq!(
            fs::read(&expected_backup).expect("Test operation should succeed"),
            b"original contents"
        );
    }

    #[test]
    fn test_write_failure_without_backup_is_io_error() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let path = dir.path().join("report.txt");
        fs::write(&path, b"original contents").expect("Test operation should succeed");
        let registry = StrategyRegistry::default();
        let key = ObfuscationKey::parse(KEY).expect("Test operation should succeed");

        let err = process_file(
            &ReadOnlyFs,
            &FileCodec::new(&registry),
            &key,
            Operation::Compress(CompressionMode::GZip),
            &path,
            true,
        )
        .expect_err("write must fail");

        assert!(matches!(err, BatchError::Io { path: p, .. } if p == path));
        assert_eq!(
            fs::read(&path).expect("Test operation should succeed"),
            b"original contents"
        );
    }

    #[test]
    fn test_bad_key_rejected() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let path = dir.path().join("file.txt");
        fs::write(&path, b"data").expect("Test operation should succeed");

        let err = compress_file(&path, "nodot", 0, false).expect_err("must fail");
        assert!(matches!(err, BatchError::Key(KeyError::MissingSeparator { .. })));
        assert_eq!(fs::read(&path).expect("Test operation should succeed"), b"data");
    }
}
