//! Compressed Sparse Row (CSR) matrix format implementation

use std::fmt;
use std::ops::Range;

use num_traits::{One, Zero};

use crate::error::{CsrError, Result};
use crate::matrix::index::{checked_index, shift_up, to_usize, CsrIndex};
use crate::matrix::SparseMatrixCSC;

/// A sparse matrix in Compressed Sparse Row (CSR) format with an arbitrary
/// index base
///
/// The CSR format stores a sparse matrix using three arrays:
/// - row_ptr: Array of size n_rows + 1 delimiting each row's slice of the
///   other two arrays
/// - col_idx: Array of size nnz containing column indices, ascending within
///   each row
/// - values: Array of size nnz containing the stored values
///
/// Pointers and column indices are kept shifted by `offset`, which equals
/// the index base. A base-1 matrix therefore stores `row_ptr[0] == 1` and
/// exposes 1-based columns through [`col_indices`](Self::col_indices).
/// All row/column arguments and results of the public API use the same base.
///
/// Explicit zeros are structural nonzeros: `nnz` counts stored entries.
///
/// The topology is fixed after construction. Values (and, with care, column
/// indices) can be mutated in place through the `*_mut` views; the matrix
/// has no internal synchronisation, so concurrent writers need external
/// locking.
#[derive(Clone, PartialEq)]
pub struct SparseMatrixCSR<Tv, Ti = usize> {
    /// Number of rows in the matrix
    pub(crate) n_rows: usize,

    /// Number of columns in the matrix
    pub(crate) n_cols: usize,

    /// Amount added to every raw (0-based) pointer and column index
    pub(crate) offset: usize,

    /// Row pointers (size: n_rows + 1), shifted by `offset`
    pub(crate) row_ptr: Vec<Ti>,

    /// Column indices (size: nnz), shifted by `offset`
    pub(crate) col_idx: Vec<Ti>,

    /// Stored values (size: nnz)
    pub(crate) values: Vec<Tv>,
}

impl<Tv, Ti: CsrIndex> SparseMatrixCSR<Tv, Ti> {
    /// Creates a base-0 CSR matrix from raw arrays
    ///
    /// See [`with_base`](Self::with_base).
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        row_ptr: Vec<Ti>,
        col_idx: Vec<Ti>,
        values: Vec<Tv>,
    ) -> Result<Self> {
        Self::with_base(0, n_rows, n_cols, row_ptr, col_idx, values)
    }

    /// Creates a CSR matrix exposing indices in base `base`
    ///
    /// # Arguments
    ///
    /// * `base` - Smallest valid index seen by callers (conventionally 0 or 1)
    /// * `n_rows` - Number of rows
    /// * `n_cols` - Number of columns
    /// * `row_ptr` - Raw 0-based row pointers
    /// * `col_idx` - Raw 0-based column indices
    /// * `values` - Stored values, taken by move without copying
    ///
    /// `row_ptr` and `col_idx` are shifted by `base` in place.
    ///
    /// # Errors
    ///
    /// - `InvalidDimension` if `row_ptr.len() != n_rows + 1`, or if the
    ///   largest row/column index cannot be represented by `Ti`
    /// - `InconsistentNnz` if `row_ptr[n_rows]` differs from `values.len()`
    ///   or `col_idx.len()` differs from `values.len()`
    /// - `IndexOverflow` if shifting by `base` overflows `Ti`
    pub fn with_base(
        base: usize,
        n_rows: usize,
        n_cols: usize,
        mut row_ptr: Vec<Ti>,
        mut col_idx: Vec<Ti>,
        values: Vec<Tv>,
    ) -> Result<Self> {
        if row_ptr.len() != n_rows + 1 {
            return Err(CsrError::InvalidDimension(format!(
                "row_ptr has length {} but n_rows + 1 = {}",
                row_ptr.len(),
                n_rows + 1
            )));
        }
        check_addressable::<Ti>(n_rows, base, "row")?;
        check_addressable::<Ti>(n_cols, base, "column")?;

        let last = to_usize(row_ptr[n_rows]);
        if last != Some(values.len()) {
            return Err(CsrError::InconsistentNnz {
                expected: last.unwrap_or(0),
                actual: values.len(),
            });
        }
        if col_idx.len() != values.len() {
            return Err(CsrError::InconsistentNnz {
                expected: values.len(),
                actual: col_idx.len(),
            });
        }

        shift_up(&mut row_ptr, base)?;
        shift_up(&mut col_idx, base)?;

        Ok(Self {
            n_rows,
            n_cols,
            offset: base,
            row_ptr,
            col_idx,
            values,
        })
    }

    /// Creates a CSR matrix from the CSC form of its transpose
    ///
    /// Column pointers become row pointers and row indices become column
    /// indices; no array is copied or re-shifted. A CSC matrix with shape
    /// `(m, n)` yields a CSR matrix with shape `(n, m)` in the same base.
    pub fn from_transpose(transposed: SparseMatrixCSC<Tv, Ti>) -> Self {
        Self {
            n_rows: transposed.n_cols,
            n_cols: transposed.n_rows,
            offset: transposed.offset,
            row_ptr: transposed.col_ptr,
            col_idx: transposed.row_idx,
            values: transposed.values,
        }
    }

    /// Creates an empty matrix with the given dimensions
    pub fn zeros(n_rows: usize, n_cols: usize, base: usize) -> Result<Self> {
        let row_ptr = vec![Ti::zero(); n_rows + 1];
        Self::with_base(base, n_rows, n_cols, row_ptr, Vec::new(), Vec::new())
    }

    /// Returns `(n_rows, n_cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.n_cols)
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Index base exposed to callers
    pub fn base(&self) -> usize {
        self.offset
    }

    /// Amount added to raw 0-based indices; equal to the base
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of stored entries, explicit zeros included
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Counts stored values satisfying `predicate`
    pub fn count_where<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&Tv) -> bool,
    {
        self.values.iter().filter(|v| predicate(v)).count()
    }

    /// Stored values, in row-major slot order
    pub fn nonzeros(&self) -> &[Tv] {
        &self.values
    }

    /// Mutable view of the stored values; writes go straight to the matrix
    pub fn nonzeros_mut(&mut self) -> &mut [Tv] {
        &mut self.values
    }

    /// Column indices in base `base()`, one per stored slot
    pub fn col_indices(&self) -> &[Ti] {
        &self.col_idx
    }

    /// Mutable view of the column indices
    ///
    /// Callers must keep every row's slice strictly ascending and in range;
    /// [`check_structure`](Self::check_structure) verifies this.
    pub fn col_indices_mut(&mut self) -> &mut [Ti] {
        &mut self.col_idx
    }

    /// Row pointers in base `base()`
    pub fn row_ptr(&self) -> &[Ti] {
        &self.row_ptr
    }

    /// Raw slot range of 0-based row `i`
    #[inline]
    pub(crate) fn raw_row_range(&self, i: usize) -> Range<usize> {
        let start = self.row_ptr[i].index() - self.offset;
        let end = self.row_ptr[i + 1].index() - self.offset;
        start..end
    }

    /// Returns the range of slots in [`col_indices`](Self::col_indices) and
    /// [`nonzeros`](Self::nonzeros) owned by `row` (given in the matrix base)
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside `base()..base() + n_rows()`.
    pub fn row_range(&self, row: usize) -> Range<usize> {
        assert!(
            row >= self.offset && row - self.offset < self.n_rows,
            "Row index {} out of bounds (n_rows = {}, base = {})",
            row,
            self.n_rows,
            self.offset
        );
        self.raw_row_range(row - self.offset)
    }

    /// Returns an iterator over the stored entries of `row`
    ///
    /// Each item is a tuple (column, value) with the column in the matrix
    /// base.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row_iter(&self, row: usize) -> impl Iterator<Item = (usize, &Tv)> {
        let range = self.row_range(row);

        self.col_idx[range.clone()]
            .iter()
            .zip(&self.values[range])
            .map(|(&col, val)| (col.index(), val))
    }

    /// Raw row-index array requested by generic storage code
    ///
    /// CSR keeps no per-entry row array; iterate rows with
    /// [`row_range`](Self::row_range) instead.
    pub fn row_indices(&self) -> Result<&[Ti]> {
        Err(CsrError::UnsupportedOperation {
            op: "row_indices",
            format: "CSR",
        })
    }

    /// Returns the coordinate form `(I, J, V)` of the stored entries
    ///
    /// Following the row-major convention, `I` holds **columns** and `J`
    /// holds **rows**, both in the matrix base. Entries are grouped by row,
    /// with ascending columns inside each row.
    pub fn find_coordinates(&self) -> (Vec<Ti>, Vec<Ti>, Vec<Tv>)
    where
        Tv: Copy,
    {
        let nnz = self.nnz();
        let mut cols = Vec::with_capacity(nnz);
        let mut rows = Vec::with_capacity(nnz);
        let mut vals = Vec::with_capacity(nnz);

        for i in 0..self.n_rows {
            // Addressable by construction
            let row = Ti::from_usize(i + self.offset);
            for k in self.raw_row_range(i) {
                cols.push(self.col_idx[k]);
                rows.push(row);
                vals.push(self.values[k]);
            }
        }

        (cols, rows, vals)
    }

    /// Verifies every structural invariant
    ///
    /// Checks monotone row pointers starting at the base, column indices
    /// within `base..base + n_cols`, and strictly ascending columns within
    /// each row. Construction only validates lengths, so this is the check
    /// to run on untrusted input or after mutating column indices.
    pub fn check_structure(&self) -> Result<()> {
        let base = self.offset;
        let first = to_usize(self.row_ptr[0]);
        if first != Some(base) {
            return Err(CsrError::InvalidStructure(format!(
                "row_ptr[0] = {:?}, expected {}",
                self.row_ptr[0], base
            )));
        }

        for i in 0..self.n_rows {
            let (start, end) = (self.row_ptr[i], self.row_ptr[i + 1]);
            if start > end {
                return Err(CsrError::InvalidStructure(format!(
                    "row_ptr decreases at row {}: {:?} > {:?}",
                    i + base,
                    start,
                    end
                )));
            }
            let within = matches!(to_usize(end), Some(e) if e - base <= self.nnz());
            if !within {
                return Err(CsrError::InvalidStructure(format!(
                    "row_ptr[{}] = {:?} points past the {} stored entries",
                    i + 1,
                    end,
                    self.nnz()
                )));
            }

            let mut prev: Option<Ti> = None;
            for &col in &self.col_idx[self.raw_row_range(i)] {
                let in_range = matches!(
                    to_usize(col),
                    Some(c) if c >= base && c - base < self.n_cols
                );
                if !in_range {
                    return Err(CsrError::InvalidStructure(format!(
                        "column {:?} in row {} outside {}..{}",
                        col,
                        i + base,
                        base,
                        base + self.n_cols
                    )));
                }
                if let Some(p) = prev {
                    if p >= col {
                        return Err(CsrError::InvalidStructure(format!(
                            "columns not strictly ascending in row {}: {:?} then {:?}",
                            i + base,
                            p,
                            col
                        )));
                    }
                }
                prev = Some(col);
            }
        }
        Ok(())
    }
}

impl<Tv, Ti> SparseMatrixCSR<Tv, Ti>
where
    Tv: Copy + Zero,
    Ti: CsrIndex,
{
    /// Returns the value at (`row`, `col`), both in the matrix base
    ///
    /// Missing entries read as zero. The lookup is a binary search over the
    /// row's columns.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` if either index is outside the matrix.
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

        let range = self.raw_row_range(row - base);
        if range.is_empty() {
            return Ok(Tv::zero());
        }

        // Columns are stored in base, so `col` is searched as given
        let target: Ti = match checked_index(col) {
            Ok(t) => t,
            Err(_) => return Ok(Tv::zero()),
        };
        match self.col_idx[range.clone()].binary_search(&target) {
            Ok(k) => Ok(self.values[range.start + k]),
            Err(_) => Ok(Tv::zero()),
        }
    }

    /// Dense copy of the matrix, mainly for inspection and tests
    pub fn to_dense(&self) -> ndarray::Array2<Tv> {
        let mut dense = ndarray::Array2::zeros((self.n_rows, self.n_cols));
        for i in 0..self.n_rows {
            for k in self.raw_row_range(i) {
                dense[[i, self.col_idx[k].index() - self.offset]] = self.values[k];
            }
        }
        dense
    }
}

impl<Tv, Ti> SparseMatrixCSR<Tv, Ti>
where
    Tv: Copy + One,
    Ti: CsrIndex,
{
    /// Creates an identity matrix of the given size
    pub fn identity(n: usize, base: usize) -> Result<Self> {
        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut col_idx = Vec::with_capacity(n);

        for i in 0..=n {
            row_ptr.push(checked_index(i)?);
        }

        for i in 0..n {
            col_idx.push(checked_index(i)?);
        }

        Self::with_base(base, n, n, row_ptr, col_idx, vec![Tv::one(); n])
    }
}

/// Ensures indices `base..base + extent` are representable in `Ti`
pub(crate) fn check_addressable<Ti: CsrIndex>(
    extent: usize,
    base: usize,
    what: &str,
) -> Result<()> {
    if extent == 0 {
        return Ok(());
    }
    let largest = (extent - 1).checked_add(base);
    match largest.map(checked_index::<Ti>) {
        Some(Ok(_)) => Ok(()),
        _ => Err(CsrError::InvalidDimension(format!(
            "{} count {} with base {} exceeds the index type",
            what, extent, base
        ))),
    }
}

impl<Tv: fmt::Debug, Ti: CsrIndex> fmt::Debug for SparseMatrixCSR<Tv, Ti> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SparseMatrixCSR {{")?;
        writeln!(f, "  dimensions: {} × {}", self.n_rows, self.n_cols)?;
        writeln!(f, "  base: {}", self.offset)?;
        writeln!(f, "  nnz: {}", self.values.len())?;

        // Print a sample of the matrix content
        let max_rows_to_print = 5.min(self.n_rows);

        if max_rows_to_print > 0 {
            writeln!(f, "  content sample:")?;

            for i in 0..max_rows_to_print {
                write!(f, "    row {}: ", i + self.offset)?;
                let range = self.raw_row_range(i);

                if range.is_empty() {
                    writeln!(f, "(empty)")?;
                } else {
                    let max_elements = 5.min(range.len());

                    for k in range.start..(range.start + max_elements) {
                        write!(f, "({:?}, {:?}) ", self.col_idx[k], self.values[k])?;
                    }

                    if range.len() > max_elements {
                        write!(f, "... ({} more)", range.len() - max_elements)?;
                    }

                    writeln!(f)?;
                }
            }

            if self.n_rows > max_rows_to_print {
                writeln!(f, "    ... ({} more rows)", self.n_rows - max_rows_to_print)?;
            }
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //    [1 2 0]
    //    [0 3 0]
    //    [4 0 5]
    fn sample(base: usize) -> SparseMatrixCSR<i32> {
        SparseMatrixCSR::with_base(
            base,
            3,
            3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        )
        .unwrap()
    }

    #[test]
    fn test_new_matrix() {
        let matrix = sample(0);

        assert_eq!(matrix.shape(), (3, 3));
        assert_eq!(matrix.nnz(), 5);
        assert_eq!(matrix.base(), 0);
        assert_eq!(matrix.row_ptr(), &[0, 2, 3, 5]);
    }

    #[test]
    fn test_base_one_shifts_arrays() {
        let matrix = sample(1);

        assert_eq!(matrix.offset(), 1);
        assert_eq!(matrix.row_ptr(), &[1, 3, 4, 6]);
        assert_eq!(matrix.col_indices(), &[1, 2, 2, 1, 3]);
        assert_eq!(matrix.row_range(1), 0..2);
        assert_eq!(matrix.row_range(3), 3..5);
    }

    #[test]
    fn test_element_at() {
        for base in [0, 1] {
            let matrix = sample(base);
            assert_eq!(matrix.element_at(base, base).unwrap(), 1);
            assert_eq!(matrix.element_at(base, base + 1).unwrap(), 2);
            assert_eq!(matrix.element_at(base + 1, base).unwrap(), 0);
            assert_eq!(matrix.element_at(base + 2, base + 2).unwrap(), 5);
        }
    }

    #[test]
    fn test_element_at_out_of_range() {
        let matrix = sample(1);
        assert!(matches!(
            matrix.element_at(0, 1),
            Err(CsrError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            matrix.element_at(1, 4),
            Err(CsrError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_empty_row_reads_zero() {
        let matrix: SparseMatrixCSR<f64, u32> =
            SparseMatrixCSR::with_base(1, 2, 2, vec![0, 0, 1], vec![1], vec![7.0]).unwrap();
        assert_eq!(matrix.element_at(1, 1).unwrap(), 0.0);
        assert_eq!(matrix.element_at(2, 2).unwrap(), 7.0);
    }

    #[test]
    fn test_row_iter() {
        let matrix = sample(0);

        let row0: Vec<_> = matrix.row_iter(0).collect();
        assert_eq!(row0, vec![(0, &1), (1, &2)]);

        let row1: Vec<_> = matrix.row_iter(1).collect();
        assert_eq!(row1, vec![(1, &3)]);

        let row2: Vec<_> = matrix.row_iter(2).collect();
        assert_eq!(row2, vec![(0, &4), (2, &5)]);
    }

    #[test]
    fn test_find_coordinates() {
        let matrix = sample(1);
        let (cols, rows, vals) = matrix.find_coordinates();

        assert_eq!(cols, vec![1, 2, 2, 1, 3]);
        assert_eq!(rows, vec![1, 1, 2, 3, 3]);
        assert_eq!(vals, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_count_and_mutation() {
        let mut matrix = sample(0);
        assert_eq!(matrix.count_where(|&v| v % 2 == 1), 3);

        matrix.nonzeros_mut()[2] = 0;
        assert_eq!(matrix.element_at(1, 1).unwrap(), 0);
        // Explicit zeros stay stored
        assert_eq!(matrix.nnz(), 5);
        assert_eq!(matrix.count_where(|&v| v != 0), 4);
    }

    #[test]
    fn test_row_indices_unsupported() {
        let matrix = sample(0);
        assert_eq!(
            matrix.row_indices(),
            Err(CsrError::UnsupportedOperation {
                op: "row_indices",
                format: "CSR",
            })
        );
    }

    #[test]
    fn test_identity() {
        let identity = SparseMatrixCSR::<i32>::identity(3, 1).unwrap();

        assert_eq!(identity.shape(), (3, 3));
        assert_eq!(identity.nnz(), 3);
        assert_eq!(identity.row_ptr(), &[1, 2, 3, 4]);
        assert_eq!(identity.col_indices(), &[1, 2, 3]);
        assert_eq!(identity.nonzeros(), &[1, 1, 1]);
    }

    #[test]
    fn test_zeros() {
        let zeros = SparseMatrixCSR::<f64, i32>::zeros(4, 2, 1).unwrap();
        assert_eq!(zeros.nnz(), 0);
        assert_eq!(zeros.element_at(4, 2).unwrap(), 0.0);
        assert!(zeros.check_structure().is_ok());
    }

    #[test]
    fn test_invalid_row_ptr() {
        let result = SparseMatrixCSR::new(
            3,
            3,
            vec![0usize, 2, 3], // Missing last element
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4, 5],
        );
        assert!(matches!(result, Err(CsrError::InvalidDimension(_))));
    }

    #[test]
    fn test_inconsistent_nnz() {
        let result = SparseMatrixCSR::new(
            3,
            3,
            vec![0usize, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1, 2, 3, 4], // Missing last element
        );
        assert_eq!(
            result.unwrap_err(),
            CsrError::InconsistentNnz {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_dimension_exceeds_index_type() {
        let n_cols = i32::MAX as usize + 1;
        let result: Result<SparseMatrixCSR<f32, i32>> =
            SparseMatrixCSR::with_base(1, 1, n_cols, vec![0, 0], vec![], vec![]);
        assert!(matches!(result, Err(CsrError::InvalidDimension(_))));
    }

    #[test]
    fn test_check_structure() {
        assert!(sample(1).check_structure().is_ok());

        let mut matrix = sample(0);
        matrix.col_indices_mut().swap(0, 1);
        assert!(matches!(
            matrix.check_structure(),
            Err(CsrError::InvalidStructure(_))
        ));

        let out_of_range =
            SparseMatrixCSR::new(1, 2, vec![0usize, 1], vec![2], vec![1.0]).unwrap();
        assert!(out_of_range.check_structure().is_err());
    }

    #[test]
    fn test_check_structure_pointer_past_entries() {
        // Only the last pointer is compared against nnz at construction
        let matrix =
            SparseMatrixCSR::<f64, usize>::new(2, 3, vec![0, 5, 3], vec![0, 1, 2], vec![1.0, 2.0, 3.0])
                .unwrap();
        assert!(matches!(
            matrix.check_structure(),
            Err(CsrError::InvalidStructure(_))
        ));

        let shifted =
            SparseMatrixCSR::<f64, i32>::with_base(1, 2, 3, vec![0, 4, 3], vec![0, 1, 2], vec![1.0; 3])
                .unwrap();
        assert!(matches!(
            shifted.check_structure(),
            Err(CsrError::InvalidStructure(_))
        ));
    }

    #[test]
    fn test_to_dense() {
        let dense = sample(1).to_dense();
        assert_eq!(
            dense,
            ndarray::arr2(&[[1, 2, 0], [0, 3, 0], [4, 0, 5]])
        );
    }
}
