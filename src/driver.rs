//! Batch driver.
//!
//! Dispatches one compute-kernel + backtrace pass per alignment in the
//! batch, reusing a single device matrix store sized for the batch's widest
//! sequences. Sequences and lengths come in as flat host buffers, the shape
//! a real device-side launch ABI would hand a kernel.

use log::{debug, info, trace};

use crate::backtrace::backtrace;
use crate::column::num_words;
use crate::config::LaunchConfig;
use crate::error::AlignError;
use crate::kernel::compute_score_matrix;
use crate::matrix_store::MatrixStore;

/// Stand-in for a GPU command stream. On a single host process there is no
/// asynchronous device queue to drain, so `synchronize` only marks the point
/// at which a real launch would block for completion.
#[derive(Debug, Default)]
pub struct Stream;

impl Stream {
    pub fn synchronize(&self) -> Result<(), AlignError> {
        trace!("stream synchronized");
        Ok(())
    }
}

/// Aligns `n_alignments` query/target pairs in one batch.
///
/// `sequences` is laid out as `n_alignments` consecutive
/// `(query, target)` pairs, each padded to `max_target_query_length` bytes;
/// `sequence_lengths` holds `2 * n_alignments` `i32`s, alternating
/// `(query_len, target_len)` per alignment. `paths_out` holds
/// `n_alignments * config.max_path_length` operation codes, one
/// `config.max_path_length`-wide row per alignment; `path_lengths_out` holds
/// the number of codes actually written per alignment.
pub fn align_batch(
    paths_out: &mut [i8],
    path_lengths_out: &mut [i32],
    config: LaunchConfig,
    sequences: &[u8],
    sequence_lengths: &[i32],
    max_target_query_length: usize,
    n_alignments: usize,
    stream: &Stream,
) -> Result<(), AlignError> {
    let max_path_length = config.max_path_length;
    let expected_sequences = 2 * n_alignments * max_target_query_length;

    if sequences.len() != expected_sequences
        || sequence_lengths.len() != 2 * n_alignments
        || paths_out.len() != n_alignments * max_path_length
        || path_lengths_out.len() != n_alignments
    {
        return Err(AlignError::Bounds {
            batch_id: n_alignments,
            rows: sequences.len(),
            cols: 1,
            capacity: expected_sequences,
        });
    }

    info!(
        "batch start: n_alignments={n_alignments} max_len={max_target_query_length} config={config:?}"
    );

    let n_words_max = num_words(max_target_query_length);
    let cols_max = max_target_query_length + 1;
    let elements_per_batch = n_words_max * cols_max;

    let mut pv_store = MatrixStore::<u32>::new(1, elements_per_batch)?;
    let mut mv_store = MatrixStore::<u32>::new(1, elements_per_batch)?;
    let mut score_store = MatrixStore::<i32>::new(1, elements_per_batch)?;

    for a in 0..n_alignments {
        let q_len = sequence_lengths[2 * a] as usize;
        let t_len = sequence_lengths[2 * a + 1] as usize;
        let q_off = 2 * a * max_target_query_length;
        let t_off = q_off + max_target_query_length;
        let query = &sequences[q_off..q_off + q_len];
        let target = &sequences[t_off..t_off + t_len];

        debug!("alignment {a}: dispatching compute kernel (n={q_len}, m={t_len})");

        let n_words = num_words(q_len);
        let cols = t_len + 1;
        let path_slice = &mut paths_out[a * max_path_length..(a + 1) * max_path_length];

        {
            let mut pv_view = pv_store.view_mut(0, n_words, cols)?;
            let mut mv_view = mv_store.view_mut(0, n_words, cols)?;
            let mut score_view = score_store.view_mut(0, n_words, cols)?;
            compute_score_matrix(query, target, &mut pv_view, &mut mv_view, &mut score_view);
        }

        let pv_view = pv_store.view(0, n_words, cols)?;
        let mv_view = mv_store.view(0, n_words, cols)?;
        let score_view = score_store.view(0, n_words, cols)?;
        let len = backtrace(&pv_view, &mv_view, &score_view, q_len, t_len, path_slice)?;
        path_lengths_out[a] = len as i32;
    }

    stream.synchronize()?;
    info!("batch complete: n_alignments={n_alignments}");
    Ok(())
}
