//! Backtrace decoder.
//!
//! Walks from `(n, m)` back to `(0, 0)` using the packed columns' full-matrix
//! accessor (`crate::column::cell`), emitting one operation code per step
//! with a left > above > diagonal tie-break priority.
//!
//! Two code choices look inconsistent on first read and are preserved
//! deliberately rather than unified: the main loop emits `3` for an
//! up-move (insert-in-target) but the tail-fill emits `1` for the very same
//! logical move, and `1` also doubles as "diagonal mismatch" inside the main
//! loop. Both overloads come from the source this decoder is modeled on and
//! are kept verbatim.

use crate::error::AlignError;
use crate::matrix_store::MatrixView;

pub const OP_DIAG_MATCH: i8 = 0;
pub const OP_DIAG_MISMATCH: i8 = 1;
pub const OP_LEFT: i8 = 2;
pub const OP_UP: i8 = 3;
/// Same code as `OP_DIAG_MISMATCH`; used only by the tail-fill up-move.
pub const OP_UP_TAIL: i8 = 1;

fn cell_at(pv: &MatrixView<u32>, mv: &MatrixView<u32>, score: &MatrixView<i32>, n: usize, i: usize, j: usize) -> i64 {
    if i == 0 {
        return j as i64;
    }
    crate::column::cell(pv.col(j), mv.col(j), score.col(j), n, i)
}

/// Decodes one alignment's path into `path_out`, returning the number of
/// codes written. Errors if the path would exceed `path_out`'s capacity.
pub(crate) fn backtrace(
    pv: &MatrixView<u32>,
    mv: &MatrixView<u32>,
    score: &MatrixView<i32>,
    n: usize,
    m: usize,
    path_out: &mut [i8],
) -> Result<usize, AlignError> {
    let max_path_length = path_out.len();
    let mut i = n;
    let mut j = m;
    let mut myscore = cell_at(pv, mv, score, n, i, j);
    let mut pos = 0usize;

    macro_rules! push {
        ($code:expr) => {{
            if pos >= max_path_length {
                return Err(AlignError::Bounds {
                    batch_id: 0,
                    rows: pos + 1,
                    cols: 1,
                    capacity: max_path_length,
                });
            }
            path_out[pos] = $code;
            pos += 1;
        }};
    }

    while i > 0 && j > 0 {
        let left = cell_at(pv, mv, score, n, i, j - 1);
        let above = cell_at(pv, mv, score, n, i - 1, j);
        if left + 1 == myscore {
            push!(OP_LEFT);
            j -= 1;
            myscore = left;
        } else if above + 1 == myscore {
            push!(OP_UP);
            i -= 1;
            myscore = above;
        } else {
            let diag = cell_at(pv, mv, score, n, i - 1, j - 1);
            if diag == myscore {
                push!(OP_DIAG_MATCH);
            } else {
                push!(OP_DIAG_MISMATCH);
            }
            i -= 1;
            j -= 1;
            myscore = diag;
        }
    }
    while i > 0 {
        push!(OP_UP_TAIL);
        i -= 1;
    }
    while j > 0 {
        push!(OP_LEFT);
        j -= 1;
    }

    Ok(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::compute_score_matrix;
    use crate::matrix_store::MatrixStore;

    fn run(query: &[u8], target: &[u8], max_path_length: usize) -> (usize, Vec<i8>) {
        let n = query.len();
        let m = target.len();
        let n_words = crate::column::num_words(n);
        let cols = m + 1;
        let mut path = vec![0i8; max_path_length];

        if n_words == 0 {
            let pv = MatrixStore::<u32>::new(1, cols).unwrap();
            let mv = MatrixStore::<u32>::new(1, cols).unwrap();
            let score = MatrixStore::<i32>::new(1, cols).unwrap();
            let pv_view = pv.view(0, 0, cols).unwrap();
            let mv_view = mv.view(0, 0, cols).unwrap();
            let score_view = score.view(0, 0, cols).unwrap();
            let len = backtrace(&pv_view, &mv_view, &score_view, n, m, &mut path).unwrap();
            return (len, path);
        }

        let mut pv = MatrixStore::<u32>::new(1, n_words * cols).unwrap();
        let mut mv = MatrixStore::<u32>::new(1, n_words * cols).unwrap();
        let mut score = MatrixStore::<i32>::new(1, n_words * cols).unwrap();
        {
            let mut pv_view = pv.view_mut(0, n_words, cols).unwrap();
            let mut mv_view = mv.view_mut(0, n_words, cols).unwrap();
            let mut score_view = score.view_mut(0, n_words, cols).unwrap();
            compute_score_matrix(query, target, &mut pv_view, &mut mv_view, &mut score_view);
        }
        let pv_view = pv.view(0, n_words, cols).unwrap();
        let mv_view = mv.view(0, n_words, cols).unwrap();
        let score_view = score.view(0, n_words, cols).unwrap();
        let len = backtrace(&pv_view, &mv_view, &score_view, n, m, &mut path).unwrap();
        (len, path)
    }

    #[test]
    fn identical_sequences_are_all_matches() {
        let (len, path) = run(b"ACGT", b"ACGT", 8);
        assert_eq!(&path[..len], &[OP_DIAG_MATCH; 4]);
    }

    #[test]
    fn single_substitution() {
        // Codes are written back-to-front (index 0 = the alignment's last
        // column first): T/T match, G/C mismatch, C/C match, A/A match.
        let (len, path) = run(b"ACGT", b"ACCT", 8);
        assert_eq!(&path[..len], &[OP_DIAG_MATCH, OP_DIAG_MISMATCH, OP_DIAG_MATCH, OP_DIAG_MATCH]);
    }

    #[test]
    fn empty_target_is_all_tail_up() {
        let (len, path) = run(b"AAAA", b"", 8);
        assert_eq!(&path[..len], &[OP_UP_TAIL; 4]);
    }

    #[test]
    fn empty_query_is_all_left() {
        let (len, path) = run(b"", b"CCCC", 8);
        assert_eq!(&path[..len], &[OP_LEFT; 4]);
    }

    #[test]
    fn single_insertion() {
        let (len, path) = run(b"ACG", b"ACCG", 8);
        assert_eq!(len, 4);
        assert_eq!(path[..len].iter().filter(|&&c| c == OP_LEFT).count(), 1);
    }

    #[test]
    fn capacity_overflow_errors() {
        let n = 4;
        let m = 4;
        let n_words = crate::column::num_words(n);
        let cols = m + 1;
        let mut pv = MatrixStore::<u32>::new(1, n_words * cols).unwrap();
        let mut mv = MatrixStore::<u32>::new(1, n_words * cols).unwrap();
        let mut score = MatrixStore::<i32>::new(1, n_words * cols).unwrap();
        {
            let mut pv_view = pv.view_mut(0, n_words, cols).unwrap();
            let mut mv_view = mv.view_mut(0, n_words, cols).unwrap();
            let mut score_view = score.view_mut(0, n_words, cols).unwrap();
            compute_score_matrix(b"ACGT", b"ACGT", &mut pv_view, &mut mv_view, &mut score_view);
        }
        let pv_view = pv.view(0, n_words, cols).unwrap();
        let mv_view = mv.view(0, n_words, cols).unwrap();
        let score_view = score.view(0, n_words, cols).unwrap();
        let mut too_small = vec![0i8; 1];
        assert!(backtrace(&pv_view, &mv_view, &score_view, n, m, &mut too_small).is_err());
    }
}
