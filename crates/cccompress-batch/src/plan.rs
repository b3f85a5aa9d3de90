//! Partitioning of a file list across workers

use std::ops::Range;

/// Contiguous assignment of file indices to workers.
///
/// With `T` files and `W` workers: if `T > W` every worker owns a page of
/// `ceil(T / W)` indices (the last page clipped to `T`, empty pages dropped);
/// otherwise each of the `T` files gets its own worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerPlan {
    page_size: usize,
    ranges: Vec<Range<usize>>,
}

impl WorkerPlan {
    /// Plan `total` files over at most `workers` workers
    pub fn new(total: usize, workers: usize) -> Self {
        let workers = workers.max(1);
        let page_size = if total > workers {
            total.div_ceil(workers)
        } else {
            1
        };

        let ranges = (0..workers.min(total))
            .map(|i| (i * page_size).min(total)..((i + 1) * page_size).min(total))
            .filter(|range| !range.is_empty())
            .collect();

        Self { page_size, ranges }
    }

    /// Files per worker, before clipping
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of workers that actually receive files
    pub fn worker_count(&self) -> usize {
        self.ranges.len()
    }

    /// Index range owned by each worker, in order
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }
}
