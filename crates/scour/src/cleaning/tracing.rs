//! Cleanup-phase tracing events.

#[cfg(feature = "tracing")]
use crate::metrics::CleaningMetrics;

/// Log one claimed batch of compiled-code records.
#[cfg(feature = "tracing")]
pub(crate) fn log_batch_claimed(worker_id: usize, records: usize) {
    tracing::debug!(worker_id, records, "code_batch_claimed");
}

#[cfg(not(feature = "tracing"))]
pub(crate) const fn log_batch_claimed(_worker_id: usize, _records: usize) {}

/// Log the winning claim of the structural hierarchy cleanup.
#[cfg(feature = "tracing")]
pub(crate) fn log_tree_cleanup_claimed() {
    tracing::debug!("class_tree_cleanup_claimed");
}

#[cfg(not(feature = "tracing"))]
pub(crate) const fn log_tree_cleanup_claimed() {}

/// Log the aggregate claim statistics when a compiled-code task is
/// finalized.
#[cfg(feature = "tracing")]
pub(crate) fn log_code_task_finalized(metrics: &CleaningMetrics) {
    tracing::debug!(
        batches = metrics.batches,
        records = metrics.records,
        largest_batch = metrics.largest_batch,
        "code_cleaning_finalized"
    );
}
