//! Sparse matrix-vector multiplication

use std::ops::Mul;

use ndarray::{Array1, ArrayView1, ArrayViewMut1};
use num_traits::Num;

use crate::error::{CsrError, Result};
use crate::matrix::index::CsrIndex;
use crate::matrix::SparseMatrixCSR;

impl<Tv, Ti> SparseMatrixCSR<Tv, Ti>
where
    Tv: Copy + Num,
    Ti: CsrIndex,
{
    /// Dot product of 0-based row `i` with `x`
    #[inline]
    pub(crate) fn row_dot(&self, i: usize, x: &ArrayView1<'_, Tv>) -> Tv {
        let mut acc = Tv::zero();
        for k in self.raw_row_range(i) {
            acc = acc + self.values[k] * x[self.col_idx[k].index() - self.offset];
        }
        acc
    }

    pub(crate) fn check_operands(&self, input_len: usize, output_len: usize) -> Result<()> {
        if self.n_cols != input_len || self.n_rows != output_len {
            return Err(CsrError::DimensionMismatch {
                n_rows: self.n_rows,
                n_cols: self.n_cols,
                input_len,
                output_len,
            });
        }
        Ok(())
    }

    /// Computes `y = A * x`
    ///
    /// Every entry of `y` is overwritten. Runs in O(nnz) and allocates
    /// nothing.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` unless `x.len() == n_cols` and `y.len() == n_rows`.
    pub fn multiply(&self, mut y: ArrayViewMut1<'_, Tv>, x: ArrayView1<'_, Tv>) -> Result<()> {
        self.check_operands(x.len(), y.len())?;

        log::trace!(
            "serial matvec over {} rows, {} nnz",
            self.n_rows,
            self.nnz()
        );

        for (i, out) in y.iter_mut().enumerate() {
            *out = self.row_dot(i, &x);
        }
        Ok(())
    }

    /// Computes `y = alpha * A * x + beta * y`
    ///
    /// With `beta == 0` the previous contents of `y` are never read, so
    /// NaN or garbage in `y` does not reach the result.
    pub fn multiply_add(
        &self,
        mut y: ArrayViewMut1<'_, Tv>,
        x: ArrayView1<'_, Tv>,
        alpha: Tv,
        beta: Tv,
    ) -> Result<()> {
        self.check_operands(x.len(), y.len())?;

        let overwrite = beta.is_zero();
        for (i, out) in y.iter_mut().enumerate() {
            let ax = alpha * self.row_dot(i, &x);
            *out = if overwrite { ax } else { ax + beta * *out };
        }
        Ok(())
    }

    /// Allocates and returns `A * x`
    pub fn mul_vec(&self, x: ArrayView1<'_, Tv>) -> Result<Array1<Tv>> {
        let mut y = Array1::zeros(self.n_rows);
        self.multiply(y.view_mut(), x)?;
        Ok(y)
    }
}

/// `&A * &x` for a dense vector `x`
///
/// # Panics
///
/// Panics if `x.len()` differs from the number of columns, like ndarray's
/// own arithmetic operators on shape mismatch. Use
/// [`SparseMatrixCSR::mul_vec`] to get the error instead.
impl<'a, 'b, Tv, Ti> Mul<&'b Array1<Tv>> for &'a SparseMatrixCSR<Tv, Ti>
where
    Tv: Copy + Num,
    Ti: CsrIndex,
{
    type Output = Array1<Tv>;

    fn mul(self, rhs: &'b Array1<Tv>) -> Array1<Tv> {
        match self.mul_vec(rhs.view()) {
            Ok(y) => y,
            Err(err) => panic!("{}", err),
        }
    }
}
