//! Launch configuration.
//!
//! Mirrors the role pa-bitpacking's `BitFrontsTag` config struct plays for the
//! sequential aligner: a small `serde`-serializable knob set that the host
//! passes down to a batch dispatch, instead of the kernel hard-coding its own
//! shape constants.

use serde::{Deserialize, Serialize};

use crate::column::{WARP, WORD_BITS};

/// Parameters a host passes into [`crate::align_batch`] describing the shape of
/// one launch. `word_bits` and `warp_lanes` are fixed by this crate's kernel
/// (32 and 32) and are carried here only so a `LaunchConfig` round-trips
/// through `serde` as a complete, self-describing record rather than a bare
/// `max_path_length` integer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchConfig {
    pub word_bits: u32,
    pub warp_lanes: usize,
    /// Capacity, in operation codes, of each alignment's row in `paths_out`.
    pub max_path_length: usize,
}

impl LaunchConfig {
    pub fn new(max_path_length: usize) -> Self {
        Self {
            word_bits: WORD_BITS,
            warp_lanes: WARP,
            max_path_length,
        }
    }
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
