//! Accelerator error model.
//!
//! Every fallible entry point returns one of these instead of panicking, so a
//! host orchestrator can distinguish "the batch cannot run at all" (`Alloc`,
//! `Sync`) from "the caller handed us a buffer of the wrong shape" (`Bounds`).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlignError {
    /// The batched device matrix store could not be allocated. Fatal for the
    /// whole batch.
    #[error("failed to allocate batched matrix store of {batch_bytes} bytes")]
    Alloc { batch_bytes: usize },

    /// A `view`/`view_mut` request, or an `align_batch` buffer, does not fit
    /// the store's capacity or the launch's declared shape.
    #[error(
        "batch {batch_id}: {rows}x{cols} view does not fit capacity {capacity}"
    )]
    Bounds {
        batch_id: usize,
        rows: usize,
        cols: usize,
        capacity: usize,
    },

    /// A simulated accelerator API call (stream synchronization) failed.
    #[error("stream synchronization failed: {0}")]
    Sync(String),
}
