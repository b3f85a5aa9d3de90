//! Command-line front end for cccompress
//!
//! The `cccompress` binary is a thin wrapper around this library: it parses a
//! [`CliConfig`], validates it and hands it to [`execute`], which picks the
//! single-file or whole-tree operation based on the target.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod error;
pub mod run;

pub use config::{CliConfig, LogLevel};
pub use error::ConfigError;
pub use run::{Summary, execute};
