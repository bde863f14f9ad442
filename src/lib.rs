//! Bit-parallel Myers/Needleman-Wunsch edit-distance core for batched,
//! warp-cooperative GPU-style pairwise DNA alignment.
//!
//! The crate is organized the way the kernel itself is laid out: a packed
//! column representation (`column`) and per-base query profile (`profile`)
//! feed a warp-cooperative advance (`warp`), which the compute kernel
//! (`kernel`) drives one target column at a time into a batched device
//! matrix store (`matrix_store`). `backtrace` decodes a finished column set
//! into an edit script; `driver` dispatches a whole batch of alignments.

pub mod backtrace;
mod column;
pub mod config;
pub mod driver;
pub mod error;
mod kernel;
pub mod matrix_store;
mod profile;
mod warp;

pub use config::LaunchConfig;
pub use driver::{align_batch, Stream};
pub use error::AlignError;
pub use matrix_store::DenseMatrix;

use matrix_store::MatrixStore;

/// Computes the edit distance between `query` and `target`.
///
/// Returns `n` (query length) if `target` is empty, `m` (target length) if
/// `query` is empty, otherwise the DP value at `(n, m)`.
pub fn compute_edit_distance(query: &[u8], target: &[u8]) -> Result<i64, AlignError> {
    let n = query.len();
    let m = target.len();
    if m == 0 {
        return Ok(n as i64);
    }
    if n == 0 {
        return Ok(m as i64);
    }

    let n_words = column::num_words(n);
    let cols = m + 1;
    let mut pv = MatrixStore::<u32>::new(1, n_words * cols)?;
    let mut mv = MatrixStore::<u32>::new(1, n_words * cols)?;
    let mut score = MatrixStore::<i32>::new(1, n_words * cols)?;

    {
        let mut pv_view = pv.view_mut(0, n_words, cols)?;
        let mut mv_view = mv.view_mut(0, n_words, cols)?;
        let mut score_view = score.view_mut(0, n_words, cols)?;
        kernel::compute_score_matrix(query, target, &mut pv_view, &mut mv_view, &mut score_view);
    }

    let pv_view = pv.view(0, n_words, cols)?;
    let mv_view = mv.view(0, n_words, cols)?;
    let score_view = score.view(0, n_words, cols)?;
    Ok(column::cell(pv_view.col(m), mv_view.col(m), score_view.col(m), n, n))
}

/// Expands a pairwise alignment's compressed columns into a dense
/// `(n+1) x (m+1)` DP matrix, for diagnostics and testing.
pub fn compute_full_score_matrix(query: &[u8], target: &[u8]) -> Result<DenseMatrix<i64>, AlignError> {
    let n = query.len();
    let m = target.len();
    let mut dense = DenseMatrix::new(n + 1, m + 1);
    for t in 0..=m {
        dense.set(0, t, t as i64);
    }
    if n == 0 {
        return Ok(dense);
    }

    let n_words = column::num_words(n);
    let cols = m + 1;
    let mut pv = MatrixStore::<u32>::new(1, n_words * cols)?;
    let mut mv = MatrixStore::<u32>::new(1, n_words * cols)?;
    let mut score = MatrixStore::<i32>::new(1, n_words * cols)?;

    {
        let mut pv_view = pv.view_mut(0, n_words, cols)?;
        let mut mv_view = mv.view_mut(0, n_words, cols)?;
        let mut score_view = score.view_mut(0, n_words, cols)?;
        kernel::compute_score_matrix(query, target, &mut pv_view, &mut mv_view, &mut score_view);
    }

    let pv_view = pv.view(0, n_words, cols)?;
    let mv_view = mv.view(0, n_words, cols)?;
    let score_view = score.view(0, n_words, cols)?;
    for t in 0..=m {
        let pvc = pv_view.col(t);
        let mvc = mv_view.col(t);
        let scc = score_view.col(t);
        for i in 1..=n {
            dense.set(i, t, column::cell(pvc, mvc, scc, n, i));
        }
    }
    Ok(dense)
}
