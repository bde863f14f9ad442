//! Bit-packed DP column representation and full-matrix accessor.
//!
//! A column of the edit-distance matrix for a query of length `n` is packed
//! into `n_words = ceil(n / WORD_BITS)` machine words of plus/minus deltas
//! (`Pv`/`Mv`, Myers '99) plus one running absolute score per word. This
//! mirrors the block encoding pa-bitpacking's `myers.rs`/`encoding.rs` build
//! around `HEncoding`/`V`, generalized from that crate's 64-bit blocks to the
//! 32-bit blocks this crate's warp model (`crate::warp`) advances one SIMD
//! lane at a time.

/// Bits per packed word. Chosen to match one GPU warp lane register, per the
/// cooperative-group model in `crate::warp`.
pub const WORD_BITS: u32 = 32;

/// Lanes in one simulated SIMD group (warp).
pub const WARP: usize = 32;

/// Number of `WORD_BITS`-wide blocks needed to cover a query of length `len`.
pub(crate) fn num_words(len: usize) -> usize {
    (len + WORD_BITS as usize - 1) / WORD_BITS as usize
}

/// How many low bits of block `block` hold real query rows, given the block
/// is one of `n_words` total blocks covering a query of length `n`. Every
/// block but the last is fully populated; the last may be partial.
pub(crate) fn valid_bits(block: usize, n_words: usize, n: usize) -> u32 {
    if block + 1 == n_words {
        (n - block * WORD_BITS as usize) as u32
    } else {
        WORD_BITS
    }
}

/// Mask selecting the single highest valid bit of a block with `valid_bits`
/// real rows. This is the bit whose horizontal carry exits the block.
pub(crate) fn highest_bit_mask(valid_bits: u32) -> u32 {
    1u32 << (valid_bits - 1)
}

/// Recovers `DP[i][j]` from a column's packed state, for `i >= 1`.
///
/// `pv`/`mv`/`score` are the slices of one column `j` (length `n_words`
/// each); `n` is the query length that column belongs to. Row 0 (`i == 0`) is
/// never encoded in blocks — it is always `j` and callers special-case it
/// before reaching here.
pub(crate) fn cell(pv: &[u32], mv: &[u32], score: &[i32], n: usize, i: usize) -> i64 {
    debug_assert!(i >= 1 && i <= n);
    let n_words = pv.len();
    let block = (i - 1) / WORD_BITS as usize;
    let bit = (i - 1) % WORD_BITS as usize;

    let vbits = valid_bits(block, n_words, n);
    let valid_mask = if vbits == WORD_BITS {
        u32::MAX
    } else {
        (1u32 << vbits) - 1
    };
    // Bits strictly above `bit` within the block's valid range: the rows
    // between `i` (exclusive) and the block's own top row.
    let above_mask = if bit == 31 { 0 } else { !((1u32 << (bit + 1)) - 1) };
    let mask = above_mask & valid_mask;

    score[block] as i64 - (pv[block] & mask).count_ones() as i64
        + (mv[block] & mask).count_ones() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn num_words_rounds_up() {
        assert_eq!(num_words(0), 0);
        assert_eq!(num_words(1), 1);
        assert_eq!(num_words(32), 1);
        assert_eq!(num_words(33), 2);
        assert_eq!(num_words(64), 2);
    }

    #[test]
    fn valid_bits_full_vs_tail() {
        // n = 33 -> 2 blocks, block 0 full, block 1 holds 1 row.
        assert_eq!(valid_bits(0, 2, 33), 32);
        assert_eq!(valid_bits(1, 2, 33), 1);
        assert_eq!(highest_bit_mask(1), 1);
        assert_eq!(highest_bit_mask(32), 1 << 31);
    }

    #[test]
    fn cell_recovers_column0_identity() {
        // Column 0 represents DP[i][0] = i for all i: Pv = all-ones, Mv = 0.
        let n = 40usize;
        let n_words = num_words(n);
        let pv = vec![u32::MAX; n_words];
        let mv = vec![0u32; n_words];
        let score: Vec<i32> = (0..n_words)
            .map(|b| (((b + 1) * WORD_BITS as usize).min(n)) as i32)
            .collect();
        for i in 1..=n {
            assert_eq!(cell(&pv, &mv, &score, n, i), i as i64);
        }
    }
}
