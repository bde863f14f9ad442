//! Warp-cooperative Myers advance.
//!
//! `advance_block` is the per-lane Myers '99 block update: the same 20-ish
//! bit-trick recurrence as pa-bitpacking's `compute_block` (`myers.rs`),
//! generalized to expose the horizontal carry as a signed `{-1,0,+1}` delta
//! instead of a pre-split `(p, m)` pair, since `advance_column` threads it
//! between lanes explicitly rather than letting the caller fold it into the
//! next `compute_block` invocation.
//!
//! `advance_column` simulates one warp (`WARP` lanes in lock-step) advancing
//! every block of a column by one target character. Lanes are grouped into
//! strides of `WARP`; the carry exiting a stride's last active lane is
//! shuffled down to lane 0 of the next stride (the active-lane mask applies
//! when `n_words` isn't a multiple of `WARP`). The shuffle itself is
//! realized as a lock-step loop over lanes — a CPU-side simulation
//! equivalent to a hardware `shfl`, since the carry a lane emits is consumed
//! by exactly the next lane in the same tick.

use crate::column::{highest_bit_mask, valid_bits, WARP};

/// One Myers block update. `carry_in` is the horizontal delta (`-1`, `0`, or
/// `+1`) entering this block from the one before it; the return value is
/// `(pv', mv', carry_out)`.
#[inline]
fn advance_block(pv: u32, mv: u32, carry_in: i8, eq: u32, valid_bits: u32) -> (u32, u32, i8) {
    let mh0 = (carry_in < 0) as u32;
    let xv = eq | mv;
    let eq = eq | mh0;
    let xh = ((eq & pv).wrapping_add(pv)) ^ pv | eq;
    let ph = mv | !(xh | pv);
    let mh = pv & xh;

    let top = highest_bit_mask(valid_bits);
    let carry_out = ((ph & top != 0) as i8) - ((mh & top != 0) as i8);

    let ph = (ph << 1) | (carry_in > 0) as u32;
    let mh = (mh << 1) | mh0;

    let pv_out = mh | !(xv | ph);
    let mv_out = ph & xv;
    (pv_out, mv_out, carry_out)
}

/// Advances a whole column (`pv`/`mv`, `n_words` blocks each) by one target
/// character, writing the resulting score column from `prev_score`.
///
/// `eq` holds this character's `Eq` mask per block (from
/// `crate::profile::eq_mask`); `n` is the query length the column belongs
/// to, used to determine the last block's valid bit count.
pub(crate) fn advance_column(
    pv: &mut [u32],
    mv: &mut [u32],
    eq: &[u32],
    n: usize,
    prev_score: &[i32],
    cur_score: &mut [i32],
) {
    let n_words = pv.len();
    debug_assert_eq!(mv.len(), n_words);
    debug_assert_eq!(eq.len(), n_words);
    debug_assert_eq!(prev_score.len(), n_words);
    debug_assert_eq!(cur_score.len(), n_words);

    // warp_carry seed: lane 0 of the whole column enters with +1, standing
    // in for the implicit row 0 = 0, 1, 2, ...
    let mut carry: i8 = 1;
    for stride_start in (0..n_words).step_by(WARP) {
        let active = WARP.min(n_words - stride_start);
        for k in 0..active {
            let b = stride_start + k;
            let vbits = valid_bits(b, n_words, n);
            let (p, m, c) = advance_block(pv[b], mv[b], carry, eq[b], vbits);
            pv[b] = p;
            mv[b] = m;
            cur_score[b] = prev_score[b] + c as i32;
            carry = c;
        }
    }
}
