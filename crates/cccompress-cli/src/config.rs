//! Command-line configuration.
//!
//! Configuration can be provided via:
//! - CLI arguments (`-c`, `-t`, `-k`, etc.)
//! - Environment variables (`CCCOMPRESS_TARGET`, `CCCOMPRESS_KEY`,
//!   `CCCOMPRESS_WORKERS`)
//! - Default values
//!
//! # Example
//!
//! ```no_run
//! use cccompress_cli::CliConfig;
//!
//! let config = CliConfig::from_args();
//! config.validate().expect("Invalid configuration");
//!
//! println!("Target: {:?}", config.target);
//! ```

use std::path::{Path, PathBuf};

use cccompress_batch::{BatchOptions, DEFAULT_WORKERS, Operation, Schedule};
use cccompress_formats::{CompressionMode, ObfuscationKey};
use clap::{ArgGroup, Parser, ValueEnum};
use tracing::Level;

use crate::error::ConfigError;

/// Log verbosity
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything, including per-file codec steps
    Trace,
    /// Per-file progress
    Debug,
    /// Batch start and finish
    Info,
    /// Failed files only
    Warn,
    /// Errors only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

/// Configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cccompress",
    about = "Compress and obfuscate files or whole directory trees",
    version
)]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["compress", "decompress"])
))]
pub struct CliConfig {
    /// Compress the target
    #[arg(short = 'c', long)]
    pub compress: bool,

    /// Decompress the target
    #[arg(short = 'd', long)]
    pub decompress: bool,

    /// Target file or directory
    #[arg(short = 't', long, env = "CCCOMPRESS_TARGET")]
    pub target: Option<PathBuf>,

    /// Obfuscation key of the form `a.b`
    #[arg(short = 'k', long, env = "CCCOMPRESS_KEY", hide_env_values = true)]
    pub key: Option<String>,

    /// Compression mode: 0 none, 1 gzip, 2 zlib, 3 bz2, 4 lzw, 5 lz4
    #[arg(short = 'm', long, default_value_t = 0)]
    pub mode: u8,

    /// File name suffix to match inside a directory target (default: all files)
    #[arg(short = 'e', long, default_value = "")]
    pub ext: String,

    /// Number of workers for directory targets
    #[arg(short = 'n', long, env = "CCCOMPRESS_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Overwrite originals instead of keeping `.bak` copies
    #[arg(short = 'w', long)]
    pub overwrite: bool,

    /// Work distribution for directory targets: `queue` or `static`
    #[arg(long, default_value = "queue")]
    pub schedule: Schedule,

    /// Log level, overridden by `RUST_LOG` when set
    #[arg(short = 'l', long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl CliConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Operation selected by `-c` / `-d`
    pub fn operation(&self) -> Operation {
        if self.compress {
            Operation::Compress(CompressionMode::from_byte_lossy(self.mode))
        } else {
            Operation::Decompress
        }
    }

    /// Batch options for directory targets
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::default()
            .with_workers(self.workers)
            .with_overwrite(self.overwrite)
            .with_schedule(self.schedule)
    }

    /// Validated target path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingTarget`] if no target was given.
    pub fn target_path(&self) -> Result<&Path, ConfigError> {
        self.target.as_deref().ok_or(ConfigError::MissingTarget)
    }

    /// Key string as given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingKey`] if no key was given.
    pub fn key_str(&self) -> Result<&str, ConfigError> {
        self.key.as_deref().ok_or(ConfigError::MissingKey)
    }

    /// Validate configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The target is missing or does not exist
    /// - The key is missing or malformed
    /// - The worker count is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        let target = self.target_path()?;
        if !target.exists() {
            return Err(ConfigError::TargetNotFound(target.to_path_buf()));
        }

        self.key_str()?.parse::<ObfuscationKey>()?;

        if self.workers == 0 {
            return Err(ConfigError::InvalidWorkerCount);
        }

        Ok(())
    }
}
