//! Compressed Sparse Column (CSC) matrix format implementation

use std::fmt;
use std::ops::Range;

use num_traits::Zero;

use crate::error::{CsrError, Result};
use crate::matrix::csr::check_addressable;
use crate::matrix::index::{checked_index, shift_up, to_usize, CsrIndex};

/// A sparse matrix in Compressed Sparse Column (CSC) format
///
/// The column-major dual of [`SparseMatrixCSR`](crate::SparseMatrixCSR),
/// with the same base handling:
/// - col_ptr: Array of size n_cols + 1, shifted by `offset`
/// - row_idx: Array of size nnz containing row indices, shifted by `offset`
/// - values: Array of size nnz containing the stored values
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSC<Tv, Ti = usize> {
    /// Number of rows in the matrix
    pub(crate) n_rows: usize,

    /// Number of columns in the matrix
    pub(crate) n_cols: usize,

    /// Amount added to every raw pointer and row index
    pub(crate) offset: usize,

    /// Column pointers (size: n_cols + 1)
    pub(crate) col_ptr: Vec<Ti>,

    /// Row indices (size: nnz)
    pub(crate) row_idx: Vec<Ti>,

    /// Stored values (size: nnz)
    pub(crate) values: Vec<Tv>,
}

impl<Tv, Ti: CsrIndex> SparseMatrixCSC<Tv, Ti> {
    /// Creates a base-0 CSC matrix from raw arrays
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_ptr: Vec<Ti>,
        row_idx: Vec<Ti>,
        values: Vec<Tv>,
    ) -> Result<Self> {
        Self::with_base(0, n_rows, n_cols, col_ptr, row_idx, values)
    }

    /// Creates a CSC matrix exposing indices in base `base`
    ///
    /// `col_ptr` and `row_idx` are raw 0-based arrays and are shifted in
    /// place. Fails like
    /// [`SparseMatrixCSR::with_base`](crate::SparseMatrixCSR::with_base)
    /// with rows and columns swapped.
    pub fn with_base(
        base: usize,
        n_rows: usize,
        n_cols: usize,
        mut col_ptr: Vec<Ti>,
        mut row_idx: Vec<Ti>,
        values: Vec<Tv>,
    ) -> Result<Self> {
        if col_ptr.len() != n_cols + 1 {
            return Err(CsrError::InvalidDimension(format!(
                "col_ptr has length {} but n_cols + 1 = {}",
                col_ptr.len(),
                n_cols + 1
            )));
        }
        check_addressable::<Ti>(n_rows, base, "row")?;
        check_addressable::<Ti>(n_cols, base, "column")?;

        let last = to_usize(col_ptr[n_cols]);
        if last != Some(values.len()) {
            return Err(CsrError::InconsistentNnz {
                expected: last.unwrap_or(0),
                actual: values.len(),
            });
        }
        if row_idx.len() != values.len() {
            return Err(CsrError::InconsistentNnz {
                expected: values.len(),
                actual: row_idx.len(),
            });
        }

        shift_up(&mut col_ptr, base)?;
        shift_up(&mut row_idx, base)?;

        Ok(Self {
            n_rows,
            n_cols,
            offset: base,
            col_ptr,
            row_idx,
            values,
        })
    }

    /// Returns `(n_rows, n_cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Index base exposed to callers
    pub fn base(&self) -> usize {
        self.offset
    }

    /// Returns the number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Stored values, in column-major slot order
    pub fn nonzeros(&self) -> &[Tv] {
        &self.values
    }

    /// Mutable view of the stored values
    pub fn nonzeros_mut(&mut self) -> &mut [Tv] {
        &mut self.values
    }

    /// Row index of every stored slot, in the matrix base
    pub fn row_indices(&self) -> &[Ti] {
        &self.row_idx
    }

    /// Column pointers in the matrix base
    pub fn col_ptr(&self) -> &[Ti] {
        &self.col_ptr
    }

    #[inline]
    pub(crate) fn raw_col_range(&self, j: usize) -> Range<usize> {
        let start = self.col_ptr[j].index() - self.offset;
        let end = self.col_ptr[j + 1].index() - self.offset;
        start..end
    }

    /// Returns the range of slots owned by `col` (given in the matrix base)
    ///
    /// # Panics
    ///
    /// Panics if `col` is out of bounds.
    pub fn col_range(&self, col: usize) -> Range<usize> {
        assert!(
            col >= self.offset && col - self.offset < self.n_cols,
            "Column index {} out of bounds (n_cols = {}, base = {})",
            col,
            self.n_cols,
            self.offset
        );
        self.raw_col_range(col - self.offset)
    }

    /// Returns an iterator over the stored entries of `col`
    ///
    /// Each item is a tuple (row, value) with the row in the matrix base.
    pub fn col_iter(&self, col: usize) -> impl Iterator<Item = (usize, &Tv)> {
        let range = self.col_range(col);

        self.row_idx[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&row, val)| (row.index(), val))
    }

    /// Returns `(rows, cols, values)` in the matrix base, grouped by column
    pub fn find_coordinates(&self) -> (Vec<Ti>, Vec<Ti>, Vec<Tv>)
    where
        Tv: Copy,
    {
        let nnz = self.nnz();
        let mut rows = Vec::with_capacity(nnz);
        let mut cols = Vec::with_capacity(nnz);
        let mut vals = Vec::with_capacity(nnz);

        for j in 0..self.n_cols {
            let col = Ti::from_usize(j + self.offset);
            for k in self.raw_col_range(j) {
                rows.push(self.row_idx[k]);
                cols.push(col);
                vals.push(self.values[k]);
            }
        }

        (rows, cols, vals)
    }
}

impl<Tv, Ti> SparseMatrixCSC<Tv, Ti>
where
    Tv: Copy + Zero,
    Ti: CsrIndex,
{
    /// Returns the value at (`row`, `col`), zero when not stored
    pub fn element_at(&self, row: usize, col: usize) -> Result<Tv> {
        let base = self.offset;
        let row_ok = row >= base && row - base < self.n_rows;
        let col_ok = col >= base && col - base < self.n_cols;
        if !(row_ok && col_ok) {
            return Err(CsrError::IndexOutOfRange {
                row: row as i128,
                col: col as i128,
                n_rows: self.n_rows,
                n_cols: self.n_cols,
                base,
            });
        }

        let range = self.raw_col_range(col - base);
        let target: Ti = match checked_index(row) {
            Ok(t) => t,
            Err(_) => return Ok(Tv::zero()),
        };
        match self.row_idx[range.clone()].binary_search(&target) {
            Ok(k) => Ok(self.values[range.start + k]),
            Err(_) => Ok(Tv::zero()),
        }
    }
}

impl<Tv: fmt::Debug, Ti: CsrIndex> fmt::Debug for SparseMatrixCSC<Tv, Ti> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSC {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  base: {}", self.offset)?;
        writeln!(f, "  nnz: {}", self.values.len())?;

        let max_cols_to_print = 5.min(self.n_cols);

        if max_cols_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for j in 0..max_cols_to_print {
                write!(f, "    col {}: ", j + self.offset)?;
                let range = self.raw_col_range(j);

                if range.is_empty() {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(range.len());

                    for k in range.start..(range.start + max_elements) {
                        write!(f, "({:?}, {:?}) ", self.row_idx[k], self.values[k])?;
                    }

                    if range.len() > max_elements {
                        write!(f, "... ({} more)", range.len() - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_cols > max_cols_to_print {
                writeln!(f, "    ... ({} more columns)", self.n_cols - max_cols_to_print)?;
            }
        }

        write!(f, "}}")
    }
}
