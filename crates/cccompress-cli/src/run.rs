//! Dispatch of a validated configuration to the file or tree operation

use std::path::Path;

use cccompress_batch::{BatchError, BatchRunner, Operation, compress_file, decompress_file};
use tracing::info;

use crate::config::CliConfig;
use crate::error::ConfigError;

/// Result of one invocation
#[derive(Debug)]
pub struct Summary {
    /// Bytes written for a file target, files transformed for a directory target
    pub total: usize,
    /// Files that failed (always 0 or 1 for a file target)
    pub failed: usize,
    /// The failure to report: the error of a file target, or the
    /// lowest-indexed failure of a directory target
    pub error: Option<BatchError>,
}

/// Run the operation selected by `config` against its target.
///
/// A directory target runs the whole-tree operation; anything else runs the
/// single-file operation.
///
/// # Errors
///
/// Returns `ConfigError` if the target or key is missing. Failures of the
/// operation itself are reported in the [`Summary`].
pub fn execute(config: &CliConfig) -> Result<Summary, ConfigError> {
    let target = config.target_path()?;
    let key = config.key_str()?;

    if target.is_dir() {
        Ok(run_tree(config, target, key))
    } else {
        Ok(run_file(config, target, key))
    }
}

fn run_file(config: &CliConfig, target: &Path, key: &str) -> Summary {
    info!("{} file {}", config.operation(), target.display());

    let result = match config.operation() {
        Operation::Compress(mode) => compress_file(target, key, mode.as_byte(), config.overwrite),
        Operation::Decompress => decompress_file(target, key, config.overwrite),
    };

    match result {
        Ok(written) => Summary {
            total: written,
            failed: 0,
            error: None,
        },
        Err(error) => Summary {
            total: 0,
            failed: 1,
            error: Some(error),
        },
    }
}

fn run_tree(config: &CliConfig, target: &Path, key: &str) -> Summary {
    info!(
        "{} directory {} (suffix '{}')",
        config.operation(),
        target.display(),
        config.ext
    );

    let runner = BatchRunner::new(config.batch_options());
    let result = match config.operation() {
        Operation::Compress(mode) => {
            runner.compress_tree(target, &config.ext, key, mode.as_byte())
        }
        Operation::Decompress => runner.decompress_tree(target, &config.ext, key),
    };

    match result {
        Ok(report) => {
            let total = report.success_count();
            let failures = report.into_failures();
            Summary {
                total,
                failed: failures.len(),
                error: failures.into_iter().next().map(|f| f.error),
            }
        }
        Err(error) => Summary {
            total: 0,
            failed: 0,
            error: Some(error),
        },
    }
}
