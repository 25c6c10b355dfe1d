//! Lock-free work claiming for parallel cleanup of a compiled-code
//! registry and a loaded-class registry during garbage-collection
//! pauses.
//!
//! During the cleanup phase of a collection pause, worker threads
//! cooperatively sweep two shared pools without a central lock:
//!
//! - the **compiled-code registry**, a linked sequence of compiled-code
//!   records claimed in batches of up to 16 by
//!   [`CompiledCodeCleaningTask`];
//! - the **class registry**, claimed one class node at a time by
//!   [`ClassMetadataCleaningTask`] after a one-shot structural cleanup
//!   that exactly one worker wins.
//!
//! Both tasks guarantee exactly-once delivery of every work item using
//! only atomic claim operations. What "cleanup" does to a claimed item
//! belongs to the code-cache and class-registry collaborators and is
//! passed in as a closure.
//!
//! # Quick Start
//!
//! ```ignore
//! use scour::{ClassMetadataCleaningTask, CompiledCodeCleaningTask, SliceClassIter};
//!
//! let code_task = CompiledCodeCleaningTask::new(workers, unloading_occurred, code_cache.first());
//! let class_task = ClassMetadataCleaningTask::new(SliceClassIter::new(&classes));
//!
//! std::thread::scope(|s| {
//!     for worker_id in 0..workers {
//!         s.spawn(move || {
//!             code_task.work(worker_id, |record, unloading| record.clean(unloading));
//!             class_task.work(|| hierarchy.repair(), |class| class.purge_stale_entries());
//!         });
//!     }
//! });
//! // The scope join is the completion barrier; the tasks signal nothing.
//! ```
//!
//! # Thread Safety
//!
//! Construction and destruction are single-threaded and bracket the
//! parallel phase; the `work` entry points are safe to call from any
//! number of workers concurrently. The tasks never block: every claim is
//! an atomic exchange or a bounded compare-and-swap retry loop,
//! lock-free though not wait-free.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod cleaning;
mod metrics;

// Re-export public API
pub use cleaning::claim::{IndexCursor, OnceClaim};
pub use cleaning::class_graph::{
    ClassMetadataCleaningTask, ClassRegistryIter, GroupedClassIter, SliceClassIter,
};
pub use cleaning::code_cache::{CodeRecordLink, CompiledCodeCleaningTask, MAX_CLAIM_RECORDS};
pub use metrics::CleaningMetrics;
