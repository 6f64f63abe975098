//! Common interface of the compressed storage formats

use crate::error::Result;
use crate::matrix::index::CsrIndex;
use crate::matrix::{SparseMatrixCSC, SparseMatrixCSR};

/// Format-independent queries over compressed sparse storage
///
/// Lets generic code ask about orientation before choosing a traversal:
/// row-major formats iterate rows with a range per row, column-major
/// formats expose a per-entry row array.
pub trait SparseStorage {
    /// Index type of the stored arrays
    type Index;

    /// Returns `(n_rows, n_cols)`
    fn shape(&self) -> (usize, usize);

    /// Number of stored entries
    fn nnz(&self) -> usize;

    /// Index base exposed to callers
    fn base(&self) -> usize;

    /// Whether entries are grouped by row
    fn is_row_major(&self) -> bool;

    /// Whether entries are grouped by column
    fn is_column_major(&self) -> bool {
        !self.is_row_major()
    }

    /// Row index of every stored slot, when the format keeps one
    fn row_indices(&self) -> Result<&[Self::Index]>;
}

impl<Tv, Ti: CsrIndex> SparseStorage for SparseMatrixCSR<Tv, Ti> {
    type Index = Ti;

    fn shape(&self) -> (usize, usize) {
        SparseMatrixCSR::shape(self)
    }

    fn nnz(&self) -> usize {
        SparseMatrixCSR::nnz(self)
    }

    fn base(&self) -> usize {
        SparseMatrixCSR::base(self)
    }

    fn is_row_major(&self) -> bool {
        true
    }

    fn is_column_major(&self) -> bool {
        false
    }

    fn row_indices(&self) -> Result<&[Ti]> {
        SparseMatrixCSR::row_indices(self)
    }
}

impl<Tv, Ti: CsrIndex> SparseStorage for SparseMatrixCSC<Tv, Ti> {
    type Index = Ti;

    fn shape(&self) -> (usize, usize) {
        SparseMatrixCSC::shape(self)
    }

    fn nnz(&self) -> usize {
        SparseMatrixCSC::nnz(self)
    }

    fn base(&self) -> usize {
        SparseMatrixCSC::base(self)
    }

    fn is_row_major(&self) -> bool {
        false
    }

    fn row_indices(&self) -> Result<&[Ti]> {
        Ok(SparseMatrixCSC::row_indices(self))
    }
}
