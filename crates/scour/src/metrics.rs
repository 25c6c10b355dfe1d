//! Per-worker cleaning statistics.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam::utils::CachePadded;

/// Per-worker claim counters for one cleanup task.
///
/// Each worker only ever writes its own cache-line-padded slot during
/// the parallel phase, so updates never contend. Aggregation is
/// meaningful once the caller has joined all workers.
#[derive(Debug)]
pub struct CleaningStats {
    workers: Box<[CachePadded<WorkerCounters>]>,
}

#[derive(Debug, Default)]
struct WorkerCounters {
    batches: AtomicUsize,
    records: AtomicUsize,
    largest_batch: AtomicUsize,
}

impl CleaningStats {
    /// Create zeroed counters for `num_workers` workers.
    #[must_use]
    pub fn new(num_workers: usize) -> Self {
        Self {
            workers: (0..num_workers)
                .map(|_| CachePadded::new(WorkerCounters::default()))
                .collect(),
        }
    }

    /// Record one claimed batch of `records` records for `worker_id`.
    pub fn record_batch(&self, worker_id: usize, records: usize) {
        let counters = &self.workers[worker_id];
        counters.batches.fetch_add(1, Ordering::Relaxed);
        counters.records.fetch_add(records, Ordering::Relaxed);
        counters.largest_batch.fetch_max(records, Ordering::Relaxed);
    }

    /// Records cleaned by one worker so far.
    #[must_use]
    pub fn worker_records(&self, worker_id: usize) -> usize {
        self.workers[worker_id].records.load(Ordering::Relaxed)
    }

    /// Aggregate all workers' counters into one snapshot.
    #[must_use]
    pub fn aggregate(&self) -> CleaningMetrics {
        let mut metrics = CleaningMetrics::default();
        for counters in self.workers.iter() {
            metrics.batches += counters.batches.load(Ordering::Relaxed);
            metrics.records += counters.records.load(Ordering::Relaxed);
            metrics.largest_batch = metrics
                .largest_batch
                .max(counters.largest_batch.load(Ordering::Relaxed));
        }
        metrics
    }
}

/// Aggregated statistics from one cleanup task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningMetrics {
    /// Batches claimed across all workers.
    pub batches: usize,
    /// Records cleaned across all workers.
    pub records: usize,
    /// Largest single batch observed by any worker.
    pub largest_batch: usize,
}

#[cfg(test)]
mod tests {
    use super::CleaningStats;

    #[test]
    fn aggregate_sums_worker_counters() {
        let stats = CleaningStats::new(2);
        stats.record_batch(0, 16);
        stats.record_batch(0, 3);
        stats.record_batch(1, 16);

        assert_eq!(stats.worker_records(0), 19);
        assert_eq!(stats.worker_records(1), 16);

        let metrics = stats.aggregate();
        assert_eq!(metrics.batches, 3);
        assert_eq!(metrics.records, 35);
        assert_eq!(metrics.largest_batch, 16);
    }

    #[test]
    fn zero_workers_aggregate_to_zero() {
        let stats = CleaningStats::new(0);
        let metrics = stats.aggregate();
        assert_eq!(metrics.batches, 0);
        assert_eq!(metrics.records, 0);
        assert_eq!(metrics.largest_batch, 0);
    }
}
