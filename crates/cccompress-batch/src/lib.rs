//! Concurrent compression and decompression of container files on disk
//!
#![allow(clippy::module_name_repetitions)] // Clear naming is preferred
#![allow(clippy::must_use_candidate)] // Accessors
//! This crate wraps the in-memory codec from `cccompress-formats` with file
//! I/O and a batch runner that spreads a directory tree across a fixed pool
//! of worker threads.
//!
//! - [`compress_file`] / [`decompress_file`] transform one file in place
//! - [`BatchRunner`] transforms many files, collecting per-file failures
//!   into a [`BatchReport`] instead of aborting
//!
//! Unless `overwrite` is set, each original is kept next to its result with a
//! `.bak` suffix.
//!
//! # Example
//!
//! ```rust,no_run
//! use cccompress_batch::{BatchOptions, BatchRunner};
//! use std::path::Path;
//!
//! let runner = BatchRunner::new(BatchOptions::default().with_workers(4));
//! let report = runner
//!     .compress_tree(Path::new("assets"), ".json", "left.right", 1)
//!     .expect("batch should start");
//!
//! println!("{} of {} files compressed", report.success_count(), report.total());
//! if let Some(err) = report.error() {
//!     eprintln!("first failure: {err}");
//! }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod file;
pub mod fs;
pub mod options;
pub mod plan;
pub mod runner;

pub use error::{BatchError, BatchResult};
pub use file::{Operation, compress_file, decompress_file, process_file};
pub use fs::{BACKUP_SUFFIX, FileSystem, LocalFs, backup_path, list_files};
pub use options::{BatchOptions, DEFAULT_WORKERS, Schedule};
pub use plan::WorkerPlan;
pub use runner::{BatchReport, BatchRunner, FileFailure};
