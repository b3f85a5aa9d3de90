//! cccompress binary entry point.
//!
//! Parses arguments, initializes logging, validates the configuration and
//! runs the selected operation. The run always ends with a summary line; the
//! exit status is non-zero if anything failed.

use std::time::Instant;

use anyhow::Result;
use cccompress_cli::CliConfig;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = CliConfig::from_args();

    // RUST_LOG wins over --log-level when set
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::default()
                .add_directive(LevelFilter::from_level(Level::from(config.log_level)).into())
        }))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    config.validate()?;

    let started = Instant::now();
    let summary = cccompress_cli::execute(&config)?;
    let elapsed = started.elapsed().as_secs_f64();

    match &summary.error {
        Some(err) => tracing::error!(
            "Total[{}] finished in {:.3}s with {} failed, first error: {}",
            summary.total,
            elapsed,
            summary.failed,
            err
        ),
        None => tracing::info!("Total[{}] finished in {:.3}s", summary.total, elapsed),
    }

    if let Some(err) = summary.error {
        return Err(err.into());
    }

    Ok(())
}
