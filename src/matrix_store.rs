//! Batched device matrix store.
//!
//! One contiguous buffer plus a logical directory of `(batch_id -> offset,
//! rows, cols)`, addressed column-major so a whole DP column is one
//! contiguous slice (`addr = batch_id * elements_per_batch + col * rows +
//! row`). On real hardware this is a single device allocation; here it is a
//! host `Vec<T>` standing in for it, executed in-process on a single host.

use crate::error::AlignError;

pub struct MatrixStore<T> {
    data: Vec<T>,
    elements_per_batch: usize,
    batch_count: usize,
}

impl<T: Copy + Default> MatrixStore<T> {
    pub fn new(batch_count: usize, elements_per_batch: usize) -> Result<Self, AlignError> {
        let total = batch_count
            .checked_mul(elements_per_batch)
            .ok_or(AlignError::Alloc {
                batch_bytes: usize::MAX,
            })?;
        total
            .checked_mul(std::mem::size_of::<T>())
            .ok_or(AlignError::Alloc {
                batch_bytes: usize::MAX,
            })?;
        Ok(Self {
            data: vec![T::default(); total],
            elements_per_batch,
            batch_count,
        })
    }

    fn base(&self, batch_id: usize, rows: usize, cols: usize) -> Result<usize, AlignError> {
        if batch_id >= self.batch_count || rows * cols > self.elements_per_batch {
            return Err(AlignError::Bounds {
                batch_id,
                rows,
                cols,
                capacity: self.elements_per_batch,
            });
        }
        Ok(batch_id * self.elements_per_batch)
    }

    pub fn view(&self, batch_id: usize, rows: usize, cols: usize) -> Result<MatrixView<'_, T>, AlignError> {
        let base = self.base(batch_id, rows, cols)?;
        Ok(MatrixView {
            data: &self.data[base..base + rows * cols],
            rows,
        })
    }

    pub fn view_mut(
        &mut self,
        batch_id: usize,
        rows: usize,
        cols: usize,
    ) -> Result<MatrixViewMut<'_, T>, AlignError> {
        let base = self.base(batch_id, rows, cols)?;
        Ok(MatrixViewMut {
            data: &mut self.data[base..base + rows * cols],
            rows,
        })
    }

    pub fn copy_to_host(&self, batch_id: usize, rows: usize, cols: usize) -> Result<Vec<T>, AlignError> {
        Ok(self.view(batch_id, rows, cols)?.data.to_vec())
    }
}

/// Read-only view of one batch's `rows x cols` column-major matrix.
pub struct MatrixView<'a, T> {
    data: &'a [T],
    rows: usize,
}

impl<'a, T> MatrixView<'a, T> {
    pub fn col(&self, c: usize) -> &[T] {
        &self.data[c * self.rows..(c + 1) * self.rows]
    }
}

/// Mutable view of one batch's `rows x cols` column-major matrix.
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    rows: usize,
}

impl<'a, T> MatrixViewMut<'a, T> {
    pub fn col(&self, c: usize) -> &[T] {
        &self.data[c * self.rows..(c + 1) * self.rows]
    }

    pub fn col_mut(&mut self, c: usize) -> &mut [T] {
        &mut self.data[c * self.rows..(c + 1) * self.rows]
    }

    /// Splits out column `t - 1` (read-only) and column `t` (mutable) at
    /// once, so `crate::kernel` can advance a column in place from its
    /// predecessor without copying.
    pub(crate) fn col_pair_mut(&mut self, t: usize) -> (&[T], &mut [T]) {
        let rows = self.rows;
        let (left, right) = self.data.split_at_mut(t * rows);
        (&left[(t - 1) * rows..], &mut right[..rows])
    }
}

/// Dense, row-major `(n+1) x (m+1)` matrix for host-side diagnostics
/// (`compute_full_score_matrix`). Deliberately a distinct, simpler layout
/// from `MatrixStore`'s column-major device representation.
#[derive(Debug, Clone)]
pub struct DenseMatrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> DenseMatrix<T> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::default(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }
}
