//! Score-matrix compute kernel.
//!
//! Drives `crate::warp::advance_column` one target character at a time,
//! writing the packed `Pv`/`Mv`/score columns into the device matrix store
//! views handed in by `crate::driver`/`crate::compute_full_score_matrix`.
//! The query profile (`peq_A/C/G/T`) is built once per alignment and reused
//! across every column, rather than recomputed per target position.

use itertools::Itertools;

use crate::column::{num_words, WORD_BITS};
use crate::matrix_store::MatrixViewMut;
use crate::profile::{build_profile, eq_mask};

/// Fills `pv`/`mv`/`score` (each `n_words x (m+1)`, column-major) for
/// aligning `query` against `target`. `n_words == 0` (empty query) is a
/// no-op: the caller's top-level API special-cases an empty query directly,
/// since row 0 is never represented in blocks at all.
pub(crate) fn compute_score_matrix(
    query: &[u8],
    target: &[u8],
    pv: &mut MatrixViewMut<u32>,
    mv: &mut MatrixViewMut<u32>,
    score: &mut MatrixViewMut<i32>,
) {
    let n = query.len();
    let m = target.len();
    let n_words = num_words(n);
    if n_words == 0 {
        return;
    }

    let profile = build_profile(query);

    // Column 0: Pv = all ones, Mv = 0, score[b, 0] = min((b+1)*W, n),
    // encoding the trivial DP[i][0] = i.
    {
        let pv0 = pv.col_mut(0);
        let mv0 = mv.col_mut(0);
        let sc0 = score.col_mut(0);
        for b in 0..n_words {
            pv0[b] = u32::MAX;
            mv0[b] = 0;
            sc0[b] = (((b + 1) * WORD_BITS as usize).min(n)) as i32;
        }
    }

    for t in 1..=m {
        let target_base = target[t - 1];
        let eq_buf = profile.iter().map(|block| eq_mask(block, target_base)).collect_vec();

        let (prev_pv, cur_pv) = pv.col_pair_mut(t);
        cur_pv.copy_from_slice(prev_pv);
        let (prev_mv, cur_mv) = mv.col_pair_mut(t);
        cur_mv.copy_from_slice(prev_mv);
        let (prev_score, cur_score) = score.col_pair_mut(t);

        crate::warp::advance_column(cur_pv, cur_mv, &eq_buf, n, prev_score, cur_score);
    }
}
