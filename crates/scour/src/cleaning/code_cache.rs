//! Batched claiming over the compiled-code registry.
//!
//! The code cache keeps compiled-code records in a singly linked
//! sequence. During the cleanup phase every worker repeatedly claims a
//! run of consecutive records with a single compare-and-swap on a shared
//! cursor, then cleans the claimed records without further
//! synchronization. Batching amortizes the atomic operation across up to
//! [`MAX_CLAIM_RECORDS`] records; with per-record claiming the cursor
//! contention would dominate on large caches.

use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};

use crossbeam::utils::Backoff;

use crate::metrics::{CleaningMetrics, CleaningStats};

/// Maximum number of consecutive records claimed per cursor advance.
pub const MAX_CLAIM_RECORDS: usize = 16;

/// A link in the code cache's singly linked record sequence.
///
/// Implemented by the code-cache collaborator's record type. The
/// sequence must not be structurally mutated (no insertion or removal)
/// while a cleaning task borrows it. Cleanup routines may mutate record
/// *contents*: the claiming protocol hands every record to exactly one
/// worker, so item-level mutation never races.
pub trait CodeRecordLink: Sync {
    /// The record following `self`, or `None` at the end of the
    /// sequence.
    fn next_record(&self) -> Option<&Self>;
}

/// Parallel cleanup over the compiled-code record sequence.
///
/// Constructed single-threaded before workers are dispatched;
/// [`work`](Self::work) is then called concurrently by every worker in
/// the pool. Records are delivered exactly once across all calls: the
/// cursor only moves forward, and each advance is published with a
/// compare-and-swap, so racing claims that observe the same starting
/// record resolve to one winner while the losers retry from the updated
/// position.
///
/// The task holds only borrowed views into the collaborator-owned
/// sequence; the borrow ties its lifetime to the pause scope, and the
/// caller's join of the workers is the completion barrier.
pub struct CompiledCodeCleaningTask<'a, R> {
    unloading_occurred: bool,
    num_workers: usize,
    first_record: Option<&'a R>,
    /// Next unclaimed record; null once the sequence is exhausted.
    claim_cursor: AtomicPtr<R>,
    stats: CleaningStats,
}

impl<'a, R: CodeRecordLink> CompiledCodeCleaningTask<'a, R> {
    /// Create a task over the sequence headed by `first_record`.
    ///
    /// Single-threaded, pre-dispatch. `num_workers` is the number of
    /// worker threads that will call [`work`](Self::work); it sizes the
    /// per-worker statistics and bounds `worker_id`, but does not affect
    /// partitioning; batches go to whichever worker claims them first.
    #[must_use]
    pub fn new(num_workers: usize, unloading_occurred: bool, first_record: Option<&'a R>) -> Self {
        let head = first_record.map_or(ptr::null_mut(), |r| ptr::from_ref(r).cast_mut());
        Self {
            unloading_occurred,
            num_workers,
            first_record,
            claim_cursor: AtomicPtr::new(head),
            stats: CleaningStats::new(num_workers),
        }
    }

    /// Whether any classes were unloaded this cycle. Delivered verbatim
    /// to every per-record cleanup call.
    #[must_use]
    pub const fn unloading_occurred(&self) -> bool {
        self.unloading_occurred
    }

    /// Worker count supplied at construction.
    #[must_use]
    pub const fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Head of the sequence as captured at construction.
    #[must_use]
    pub const fn first_record(&self) -> Option<&'a R> {
        self.first_record
    }

    /// Aggregated claim statistics.
    ///
    /// Meaningful single-threaded, after the caller has joined all
    /// workers.
    #[must_use]
    pub fn metrics(&self) -> CleaningMetrics {
        self.stats.aggregate()
    }

    /// Records cleaned so far by the worker with the given id.
    #[must_use]
    pub fn worker_records(&self, worker_id: usize) -> usize {
        self.stats.worker_records(worker_id)
    }

    /// Claim up to [`MAX_CLAIM_RECORDS`] consecutive records into
    /// `batch`, leaving it empty once the sequence is exhausted.
    ///
    /// Walks forward from the observed cursor and publishes the position
    /// past the last walked record with a compare-and-swap. On a lost
    /// race the walked run is discarded and the claim restarts from the
    /// updated cursor, so no record is ever delivered twice.
    fn claim_batch(&self, batch: &mut Vec<&'a R>) {
        let backoff = Backoff::new();
        loop {
            batch.clear();
            let first = self.claim_cursor.load(Ordering::Acquire);
            if first.is_null() {
                return;
            }
            // SAFETY: the cursor only ever holds null or pointers
            // derived from `&'a R` borrows captured at construction or
            // walked from them, and the sequence is frozen for 'a.
            let head: &'a R = unsafe { &*first };
            batch.push(head);
            let mut tail = head.next_record();
            while batch.len() < MAX_CLAIM_RECORDS {
                let Some(next) = tail else { break };
                batch.push(next);
                tail = next.next_record();
            }
            let new_cursor = tail.map_or(ptr::null_mut(), |r| ptr::from_ref(r).cast_mut());
            if self
                .claim_cursor
                .compare_exchange(first, new_cursor, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                return;
            }
            backoff.spin();
        }
    }

    /// Claim and clean batches until the sequence is exhausted.
    ///
    /// Called once per worker, concurrently with every other worker's
    /// call on the same task. `clean_record` receives each claimed
    /// record together with the unloading flag; no record is handed to
    /// more than one closure invocation across all workers. A call after
    /// exhaustion claims nothing and returns immediately.
    pub fn work<F>(&self, worker_id: usize, mut clean_record: F)
    where
        F: FnMut(&'a R, bool),
    {
        debug_assert!(
            worker_id < self.num_workers,
            "worker_id {worker_id} out of range for {} workers",
            self.num_workers
        );

        let mut batch = Vec::with_capacity(MAX_CLAIM_RECORDS);
        loop {
            self.claim_batch(&mut batch);
            if batch.is_empty() {
                return;
            }
            self.stats.record_batch(worker_id, batch.len());
            crate::cleaning::tracing::log_batch_claimed(worker_id, batch.len());
            for record in batch.drain(..) {
                clean_record(record, self.unloading_occurred);
            }
        }
    }
}

#[cfg(feature = "tracing")]
impl<'a, R> Drop for CompiledCodeCleaningTask<'a, R> {
    fn drop(&mut self) {
        crate::cleaning::tracing::log_code_task_finalized(&self.stats.aggregate());
    }
}
