//! Batch configuration

use std::fmt;
use std::str::FromStr;

use crate::error::{BatchError, BatchResult};

/// Default number of worker threads
pub const DEFAULT_WORKERS: usize = 10;

/// How files are handed to worker threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Fixed pool draining a bounded queue of file indices
    #[default]
    Queue,
    /// One thread per contiguous page of files
    Static,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queue => f.write_str("queue"),
            Self::Static => f.write_str("static"),
        }
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queue" => Ok(Self::Queue),
            "static" => Ok(Self::Static),
            other => Err(format!("unknown schedule '{other}', expected 'queue' or 'static'")),
        }
    }
}

/// Options shared by every file of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Upper bound on concurrently running workers
    pub workers: usize,
    /// Write results over the originals instead of keeping `.bak` copies
    pub overwrite: bool,
    /// Work distribution strategy
    pub schedule: Schedule,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            overwrite: false,
            schedule: Schedule::default(),
        }
    }
}

impl BatchOptions {
    /// Set the worker count
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set whether originals are overwritten
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the schedule
    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> BatchResult<()> {
        if self.workers == 0 {
            return Err(BatchError::InvalidWorkerCount);
        }
        Ok(())
    }
}
