// src/pool/mod.rs
// =============================================================================
// This module runs work items on a fixed number of concurrent workers.
//
// Submodules:
// - counter: countdown of unfinished items that can be awaited
// - worker: the pool itself (intake channel, workers, join)
// =============================================================================

mod counter;
mod worker;

pub use worker::{run_pool, DEFAULT_WORKERS};
