//! Lock-free claiming tasks for the cleanup phase of a collection pause.
//!
//! This module provides the claiming machinery shared by the cleanup
//! tasks:
//! - Atomic one-shot and cursor-based claim primitives
//! - Batched claiming over the linked compiled-code sequence
//! - Per-node claiming over the loaded-class registry

pub mod claim;
pub mod class_graph;
pub mod code_cache;

pub(crate) mod tracing;

pub use claim::{IndexCursor, OnceClaim};
pub use class_graph::{
    ClassMetadataCleaningTask, ClassRegistryIter, GroupedClassIter, SliceClassIter,
};
pub use code_cache::{CodeRecordLink, CompiledCodeCleaningTask, MAX_CLAIM_RECORDS};
