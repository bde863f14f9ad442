//! Per-base query profile masks (`peq_A/C/G/T` in Myers'99 terms).
//!
//! Grounded on pa-bitpacking's `ScatterProfile::build`, which rank-transforms
//! a DNA alphabet with `bio::alphabets::RankTransform` and scatters each
//! query base into one bit of a per-block `[B; 4]` mask. This crate fixes
//! the alphabet to `ACGT` and keeps the four masks as named fields instead
//! of an indexed array, since callers address them directly by the target
//! base rather than by rank.

use crate::column::{num_words, WORD_BITS};

/// The four `Eq` masks for one `WORD_BITS`-wide block of the query: bit `k`
/// of `a` (resp. `c`, `g`, `t`) is set iff query row `block * WORD_BITS + k`
/// equals that base.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct PeqBlock {
    pub a: u32,
    pub c: u32,
    pub g: u32,
    pub t: u32,
}

/// Builds one `PeqBlock` per `WORD_BITS`-wide chunk of `query`, computed once
/// per alignment and reused across every target column.
pub(crate) fn build_profile(query: &[u8]) -> Vec<PeqBlock> {
    let mut blocks = vec![PeqBlock::default(); num_words(query.len())];
    for (i, &base) in query.iter().enumerate() {
        let block = &mut blocks[i / WORD_BITS as usize];
        let bit = 1u32 << (i % WORD_BITS as usize);
        match base {
            b'A' => block.a |= bit,
            b'C' => block.c |= bit,
            b'G' => block.g |= bit,
            b'T' => block.t |= bit,
            _ => {}
        }
    }
    blocks
}

/// Selects the `Eq` mask of `block` for a given target base.
#[inline]
pub(crate) fn eq_mask(block: &PeqBlock, target_base: u8) -> u32 {
    match target_base {
        b'A' => block.a,
        b'C' => block.c,
        b'G' => block.g,
        b'T' => block.t,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_pick_out_matching_positions() {
        let profile = build_profile(b"ACGTA");
        assert_eq!(profile.len(), 1);
        let block = profile[0];
        assert_eq!(block.a, 0b10001);
        assert_eq!(block.c, 0b00010);
        assert_eq!(block.g, 0b00100);
        assert_eq!(block.t, 0b01000);
        assert_eq!(eq_mask(&block, b'A'), 0b10001);
        assert_eq!(eq_mask(&block, b'T'), 0b01000);
    }

    #[test]
    fn spans_multiple_blocks() {
        let query = vec![b'A'; 40];
        let profile = build_profile(&query);
        assert_eq!(profile.len(), 2);
        assert_eq!(profile[0].a, u32::MAX);
        assert_eq!(profile[1].a, (1u32 << 8) - 1);
    }
}
