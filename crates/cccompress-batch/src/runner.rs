//! Concurrent batch runner
//!
//! A batch transforms a list of files with a fixed pool of scoped OS threads.
//! Per-file failures are logged, recorded and skipped; the batch itself only
//! fails for problems that make every file fail (bad key, bad options,
//! unlistable root) or for a worker panic.

use std::path::{Path, PathBuf};
use std::thread;

use cccompress_formats::{CompressionMode, FileCodec, ObfuscationKey, StrategyRegistry};
use crossbeam_channel::bounded;
use parking_lot::Mutex;
use tracing::{info, warn};

use crate::error::{BatchError, BatchResult};
use crate::file::{Operation, process_file};
use crate::fs::{FileSystem, LocalFs, list_files};
use crate::options::{BatchOptions, Schedule};
use crate::plan::WorkerPlan;

/// One file that could not be processed
#[derive(Debug)]
pub struct FileFailure {
    /// Position of the file in the batch's input list
    pub index: usize,
    /// The file
    pub path: PathBuf,
    /// What went wrong
    pub error: BatchError,
}

/// Outcome of a batch call
#[derive(Debug, Default)]
pub struct BatchReport {
    total: usize,
    succeeded: usize,
    failures: Vec<FileFailure>,
}

impl BatchReport {
    /// Number of files in the batch
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of files transformed successfully
    pub fn success_count(&self) -> usize {
        self.succeeded
    }

    /// Every failure, ordered by file index
    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// The failure of the lowest-indexed file, if any
    pub fn error(&self) -> Option<&BatchError> {
        self.failures.first().map(|f| &f.error)
    }

    /// Whether every file succeeded
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Take ownership of the failures, ordered by file index
    pub fn into_failures(self) -> Vec<FileFailure> {
        self.failures
    }
}

/// Runs single-file operations across many files
#[derive(Debug)]
pub struct BatchRunner<F: FileSystem = LocalFs> {
    fs: F,
    registry: StrategyRegistry,
    options: BatchOptions,
}

impl BatchRunner<LocalFs> {
    /// Runner over the local disk
    pub fn new(options: BatchOptions) -> Self {
        Self::with_fs(LocalFs, options)
    }
}

impl<F: FileSystem> BatchRunner<F> {
    /// Runner over a custom [`FileSystem`]
    pub fn with_fs(fs: F, options: BatchOptions) -> Self {
        Self {
            fs,
            registry: StrategyRegistry::default(),
            options,
        }
    }

    /// Compress every file under `root` whose name ends with `ext`
    ///
    /// # Errors
    ///
    /// A malformed key, invalid options or an unlistable `root` abort the
    /// whole call with `Err` and no [`BatchReport`]; no file is touched.
    /// Per-file failures never surface here, they land in the report.
    pub fn compress_tree(
        &self,
        root: &Path,
        ext: &str,
        key: &str,
        mode: u8,
    ) -> BatchResult<BatchReport> {
        let key = ObfuscationKey::parse(key)?;
        let paths = list_files(root, ext)?;
        self.run_with_key(
            &paths,
            &key,
            Operation::Compress(CompressionMode::from_byte_lossy(mode)),
        )
    }

    /// Decompress every file under `root` whose name ends with `ext`
    ///
    /// # Errors
    ///
    /// A malformed key, invalid options or an unlistable `root` abort the
    /// whole call with `Err` and no [`BatchReport`]; no file is touched.
    /// Per-file failures never surface here, they land in the report.
    pub fn decompress_tree(&self, root: &Path, ext: &str, key: &str) -> BatchResult<BatchReport> {
        let key = ObfuscationKey::parse(key)?;
        let paths = list_files(root, ext)?;
        self.run_with_key(&paths, &key, Operation::Decompress)
    }

    /// Apply `operation` to every path.
    ///
    /// The key and options are checked before any file is touched. Blocks
    /// until every file has been attempted.
    ///
    /// # Errors
    ///
    /// Returns `BatchError::Key` for a malformed key and
    /// `BatchError::InvalidWorkerCount` for zero workers, before any file is
    /// touched and without a [`BatchReport`]. `BatchError::WorkerPanicked`
    /// means a worker died mid-batch. Per-file failures are collected in the
    /// report instead.
    pub fn run(
        &self,
        paths: &[PathBuf],
        key: &str,
        operation: Operation,
    ) -> BatchResult<BatchReport> {
        let key = ObfuscationKey::parse(key)?;
        self.run_with_key(paths, &key, operation)
    }

    fn run_with_key(
        &self,
        paths: &[PathBuf],
        key: &ObfuscationKey,
        operation: Operation,
    ) -> BatchResult<BatchReport> {
        self.options.validate()?;

        let plan = WorkerPlan::new(paths.len(), self.options.workers);
        info!(
            "Starting {} of {} files with {} workers ({} schedule, page size {})",
            operation,
            paths.len(),
            plan.worker_count(),
            self.options.schedule,
            plan.page_size()
        );

        let codec = FileCodec::new(&self.registry);
        let job = Job {
            fs: &self.fs,
            codec: &codec,
            key,
            operation,
            overwrite: self.options.overwrite,
            paths,
            succeeded: Mutex::new(0),
            failures: Mutex::new(Vec::new()),
        };

        match self.options.schedule {
            Schedule::Static => job.run_static(&plan)?,
            Schedule::Queue => job.run_queue(&plan)?,
        }

        let mut failures = job.failures.into_inner();
        failures.sort_by_key(|f| f.index);

        let report = BatchReport {
            total: paths.len(),
            succeeded: job.succeeded.into_inner(),
            failures,
        };

        info!(
            "Finished {}: {} of {} files succeeded, {} failed",
            operation,
            report.success_count(),
            report.total(),
            report.failures().len()
        );

        Ok(report)
    }
}

/// State shared by the workers of one batch call
struct Job<'a, F: FileSystem> {
    fs: &'a F,
    codec: &'a FileCodec<'a>,
    key: &'a ObfuscationKey,
    operation: Operation,
    overwrite: bool,
    paths: &'a [PathBuf],
    succeeded: Mutex<usize>,
    failures: Mutex<Vec<FileFailure>>,
}

impl<F: FileSystem> Job<'_, F> {
    fn process(&self, index: usize) {
        let path = &self.paths[index];
        match process_file(
            self.fs,
            self.codec,
            self.key,
            self.operation,
            path,
            self.overwrite,
        ) {
            Ok(_) => *self.succeeded.lock() += 1,
            Err(error) => {
                warn!("Skipping {}: {}", path.display(), error);
                self.failures.lock().push(FileFailure {
                    index,
                    path: path.clone(),
                    error,
                });
            }
        }
    }

    /// One thread per contiguous page
    fn run_static(&self, plan: &WorkerPlan) -> BatchResult<()> {
        thread::scope(|s| {
            let handles: Vec<_> = plan
                .ranges()
                .iter()
                .cloned()
                .map(|range| {
                    s.spawn(move || {
                        for index in range {
                            self.process(index);
                        }
                    })
                })
                .collect();

            join_all(handles)
        })
    }

    /// Fixed pool draining a bounded queue of indices
    fn run_queue(&self, plan: &WorkerPlan) -> BatchResult<()> {
        let workers = plan.worker_count();
        if workers == 0 {
            return Ok(());
        }

        let (sender, receiver) = bounded::<usize>(workers);

        thread::scope(|s| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let receiver = receiver.clone();
                    s.spawn(move || {
                        for index in receiver {
                            self.process(index);
                        }
                    })
                })
                .collect();
            drop(receiver);

            for index in 0..self.paths.len() {
                // Only fails once every worker has exited
                if sender.send(index).is_err() {
                    break;
                }
            }
            drop(sender);

            join_all(handles)
        })
    }
}

fn join_all(handles: Vec<thread::ScopedJoinHandle<'_, ()>>) -> BatchResult<()> {
    let mut panicked = false;
    for handle in handles {
        panicked |= handle.join().is_err();
    }

    if panicked {
        return Err(BatchError::WorkerPanicked);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fs::backup_path;
    use cccompress_formats::KeyError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const KEY: &str = "ab.cd";

    fn populate(root: &Path, count: usize) -> Vec<PathBuf> {
        (0..count)
            .map(|i| {
                let path = root.join(format!("file{i:03}.txt"));
                fs::write(&path, format!("contents of file {i}\n").repeat(i + 1))
                    .expect("Test operation should succeed");
                path
            })
            .collect()
    }

    fn round_trip(schedule: Schedule, files: usize, workers: usize) {
        let dir = TempDir::new().expect("Test operation should succeed");
        let paths = populate(dir.path(), files);
        let runner = BatchRunner::new(
            BatchOptions::default()
                .with_workers(workers)
                .with_schedule(schedule)
                .with_overwrite(true),
        );

        let report = runner
            .compress_tree(dir.path(), ".txt", KEY, 2)
            .expect("Test operation should succeed");
        assert_eq!(report.success_count(), files);
        assert!(report.is_success());

        for path in &paths {
            let framed = fs::read(path).expect("Test operation should succeed");
            assert_eq!(&framed[0..4], &[0x00, 0x00, 0x43, 0x43]);
        }

        let report = runner
            .decompress_tree(dir.path(), ".txt", KEY)
            .expect("Test operation should succeed");
        assert_eq!(report.success_count(), files);

        for (i, path) in paths.iter().enumerate() {
            assert_eq!(
                fs::read_to_string(path).expect("Test operation should succeed"),
                format!("contents of file {i}\n").repeat(i + 1)
            );
        }
    }

    #[test]
    fn test_queue_round_trip() {
        round_trip(Schedule::Queue, 23, 4);
    }

    #[test]
    fn test_static_round_trip() {
        round_trip(Schedule::Static, 23, 4);
    }

    #[test]
    fn test_more_workers_than_files() {
        round_trip(Schedule::Static, 3, 10);
        round_trip(Schedule::Queue, 3, 10);
    }

    #[test]
    fn test_empty_tree() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let runner = BatchRunner::new(BatchOptions::default());

        let report = runner
            .compress_tree(dir.path(), "", KEY, 1)
            .expect("Test operation should succeed");
        assert_eq!(report.total(), 0);
        assert_eq!(report.success_count(), 0);
        assert!(report.error().is_none());
    }

    #[test]
    fn test_bad_key_fails_before_any_file() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let paths = populate(dir.path(), 3);
        let runner = BatchRunner::new(BatchOptions::default());

        let err = runner
            .compress_tree(dir.path(), "", "no-separator", 1)
            .expect_err("must fail");
        assert!(matches!(err, BatchError::Key(KeyError::MissingSeparator { .. })));

        for path in &paths {
            assert!(!backup_path(path).exists());
        }
    }

    #[test]
    fn test_run_with_bad_key_returns_no_report() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let paths = populate(dir.path(), 2);
        let runner = BatchRunner::new(BatchOptions::default());

        let err = runner
            .run(&paths, "a.", Operation::Decompress)
            .expect_err("must fail");
        assert!(matches!(err, BatchError::Key(KeyError::EmptySubkey { .. })));

        for (i, path) in paths.iter().enumerate() {
            assert_eq!(
                fs::read_to_string(path).expect("Test operation should succeed"),
                format!("contents of file {i}\n").repeat(i + 1)
            );
        }
    }

    #[test]
    fn test_unlistable_root_returns_no_report() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let runner = BatchRunner::new(BatchOptions::default());

        let err = runner
            .decompress_tree(&dir.path().join("absent"), "", KEY)
            .expect_err("must fail");
        assert!(matches!(err, BatchError::Walk { .. }));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let dir = TempDir::new().expect("Test operation should succeed");
        populate(dir.path(), 2);
        let runner = BatchRunner::new(BatchOptions::default().with_workers(0));

        let err = runner
            .compress_tree(dir.path(), "", KEY, 1)
            .expect_err("must fail");
        assert!(matches!(err, BatchError::InvalidWorkerCount));
    }

    #[test]
    fn test_failures_ordered_by_index() {
        let dir = TempDir::new().expect("Test operation should succeed");
        let mut paths = populate(dir.path(), 6);
        paths.insert(1, dir.path().join("missing-a.txt"));
        paths.push(dir.path().join("missing-b.txt"));

        let runner = BatchRunner::new(BatchOptions::default().with_workers(3));
        let report = runner
            .run(&paths, KEY, Operation::Compress(CompressionMode::Lz4))
            .expect("Test operation should succeed");

        assert_eq!(report.total(), 8);
        assert_eq!(report.success_count(), 6);
        let indices: Vec<_> = report.failures().iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![1, 7]);
        assert!(matches!(
            report.error(),
            Some(BatchError::Io { path, .. }) if path.ends_with("missing-a.txt")
        ));
    }
}
