//! # Parallel sparse matrix-vector multiplication
//!
//! This module provides a row-parallel variant of the CSR matvec using
//! Rayon. Each output entry depends on one row only, so rows are split
//! into tasks without any synchronisation on the result.

use ndarray::{ArrayView1, ArrayViewMut1};
use num_traits::Num;
use rayon::prelude::*;

use crate::error::Result;
use crate::matrix::config::MatvecConfig;
use crate::matrix::index::CsrIndex;
use crate::matrix::SparseMatrixCSR;

impl<Tv, Ti> SparseMatrixCSR<Tv, Ti>
where
    Tv: Copy + Num + Send + Sync,
    Ti: CsrIndex,
{
    /// Computes `y = A * x`, splitting rows across the Rayon pool
    ///
    /// Produces exactly the result of [`multiply`](Self::multiply); each
    /// row is still summed in slot order. Matrices with fewer rows than
    /// `config.parallel_threshold` take the serial path.
    ///
    /// # Examples
    ///
    /// ```
    /// use csrstore::{MatvecConfig, SparseMatrixCSR};
    /// use ndarray::array;
    ///
    /// let a = SparseMatrixCSR::<f64>::identity(3, 0).unwrap();
    /// let x = array![1.0, 2.0, 3.0];
    /// let mut y = array![0.0, 0.0, 0.0];
    ///
    /// let config = MatvecConfig::default().with_parallel_threshold(0);
    /// a.par_multiply(y.view_mut(), x.view(), &config).unwrap();
    /// assert_eq!(y, x);
    /// ```
    pub fn par_multiply(
        &self,
        mut y: ArrayViewMut1<'_, Tv>,
        x: ArrayView1<'_, Tv>,
        config: &MatvecConfig,
    ) -> Result<()> {
        self.check_operands(x.len(), y.len())?;

        if self.n_rows < config.parallel_threshold {
            return self.multiply(y, x);
        }

        let rows_per_task = config.rows_per_task(self.n_rows);
        log::debug!(
            "parallel matvec over {} rows ({} nnz), {} rows per task",
            self.n_rows,
            self.nnz(),
            rows_per_task
        );

        let results: Vec<Tv> = (0..self.n_rows)
            .into_par_iter()
            .with_min_len(rows_per_task)
            .map(|i| self.row_dot(i, &x))
            .collect();

        for (out, value) in y.iter_mut().zip(results) {
            *out = value;
        }
        Ok(())
    }
}
