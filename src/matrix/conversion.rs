//! Conversion functions between bases, index types and matrix formats

use std::borrow::Cow;

use crate::error::{CsrError, Result};
use crate::matrix::coo::{
    build_compressed_column, CoordinateAssembly, CoordinateBuffers, DefaultCombine,
};
use crate::matrix::index::{checked_index, shift_up, shifted_down, to_usize, widen, zero_based, CsrIndex};
use crate::matrix::{SparseMatrixCSC, SparseMatrixCSR};

impl<Tv: Clone, Ti: CsrIndex> SparseMatrixCSR<Tv, Ti> {
    /// Returns this matrix in base `base`
    ///
    /// When the base already matches, the matrix itself is returned borrowed
    /// and nothing is copied. Otherwise a new matrix with freshly copied
    /// arrays is built through the regular constructor.
    pub fn to_base(&self, base: usize) -> Result<Cow<'_, Self>> {
        if base == self.offset {
            return Ok(Cow::Borrowed(self));
        }

        log::debug!(
            "copying {}×{} CSR matrix ({} nnz) from base {} to base {}",
            self.n_rows,
            self.n_cols,
            self.nnz(),
            self.offset,
            base
        );

        let matrix = Self::with_base(
            base,
            self.n_rows,
            self.n_cols,
            shifted_down(&self.row_ptr, self.offset),
            shifted_down(&self.col_idx, self.offset),
            self.values.clone(),
        )?;
        Ok(Cow::Owned(matrix))
    }

    /// Consuming variant of [`to_base`](Self::to_base) that re-shifts the
    /// arrays in place
    pub fn into_base(mut self, base: usize) -> Result<Self> {
        if base == self.offset {
            return Ok(self);
        }
        self.row_ptr = shifted_down(&self.row_ptr, self.offset);
        self.col_idx = shifted_down(&self.col_idx, self.offset);
        check_addressable_shape::<Ti>(self.n_rows, self.n_cols, base)?;
        shift_up(&mut self.row_ptr, base)?;
        shift_up(&mut self.col_idx, base)?;
        self.offset = base;
        Ok(self)
    }

    /// Converts element and index types into a new matrix in base `base`
    ///
    /// # Errors
    ///
    /// `IndexOverflow` or `InvalidDimension` when an index does not fit in
    /// `Ti2`.
    pub fn cast<Tv2, Ti2>(&self, base: usize) -> Result<SparseMatrixCSR<Tv2, Ti2>>
    where
        Tv2: From<Tv>,
        Ti2: CsrIndex,
    {
        let row_ptr = recast::<Ti, Ti2>(&self.row_ptr, self.offset)?;
        let col_idx = recast::<Ti, Ti2>(&self.col_idx, self.offset)?;
        let values = self.values.iter().cloned().map(Tv2::from).collect();

        SparseMatrixCSR::with_base(base, self.n_rows, self.n_cols, row_ptr, col_idx, values)
    }
}

impl<Tv: Copy, Ti: CsrIndex> SparseMatrixCSR<Tv, Ti> {
    /// Converts this CSR matrix to CSC format in the same base
    pub fn to_csc(&self) -> Result<SparseMatrixCSC<Tv, Ti>> {
        let nnz = self.nnz();
        let mut rows = Vec::with_capacity(nnz);
        let mut cols = Vec::with_capacity(nnz);

        for i in 0..self.n_rows {
            for k in self.raw_row_range(i) {
                rows.push(i);
                cols.push(self.col_idx[k].index() - self.offset);
            }
        }

        log::debug!(
            "converting {}×{} CSR matrix ({} nnz) to CSC",
            self.n_rows,
            self.n_cols,
            nnz
        );

        // Rows within a column arrive ascending and unique, nothing to combine
        let (col_ptr, row_idx, values) = build_compressed_column(
            &rows,
            &cols,
            &self.values,
            self.n_rows,
            self.n_cols,
            |kept, _| kept,
        )?;

        SparseMatrixCSC::with_base(self.offset, self.n_rows, self.n_cols, col_ptr, row_idx, values)
    }

    /// Returns the transpose as a new CSR matrix
    pub fn transpose(&self) -> Result<Self> {
        Ok(Self::from_transpose(self.to_csc()?))
    }

    /// Builds a matrix with `result[rows[k], cols[k]] == values[k]`
    ///
    /// Coordinates are in base `base`. Duplicate pairs are folded with the
    /// default reduction of `Tv` (addition, or logical or for `bool`), and
    /// explicit zeros are kept as stored entries.
    ///
    /// # Errors
    ///
    /// - `InconsistentNnz` if the three slices differ in length
    /// - `IndexOutOfRange` if a coordinate lies outside the matrix
    pub fn from_coordinates(
        base: usize,
        rows: &[Ti],
        cols: &[Ti],
        values: &[Tv],
        n_rows: usize,
        n_cols: usize,
    ) -> Result<Self>
    where
        Tv: DefaultCombine,
    {
        Self::from_coordinates_with(base, rows, cols, values, n_rows, n_cols, Tv::combine)
    }

    /// Like [`from_coordinates`](Self::from_coordinates), with the shape
    /// taken from the largest row and column present
    pub fn from_coordinates_inferred(
        base: usize,
        rows: &[Ti],
        cols: &[Ti],
        values: &[Tv],
    ) -> Result<Self>
    where
        Tv: DefaultCombine,
    {
        let n_rows = inferred_extent(rows, base, "row")?;
        let n_cols = inferred_extent(cols, base, "column")?;
        Self::from_coordinates(base, rows, cols, values, n_rows, n_cols)
    }

    /// Like [`from_coordinates`](Self::from_coordinates), folding duplicates
    /// left to right in input order with `combine`
    pub fn from_coordinates_with<F>(
        base: usize,
        rows: &[Ti],
        cols: &[Ti],
        values: &[Tv],
        n_rows: usize,
        n_cols: usize,
        combine: F,
    ) -> Result<Self>
    where
        F: FnMut(Tv, Tv) -> Tv,
    {
        let (rows0, cols0) = validate_coordinates(base, rows, cols, values, n_rows, n_cols)?;

        log::debug!(
            "building {}×{} CSR matrix from {} coordinates (base {})",
            n_rows,
            n_cols,
            values.len(),
            base
        );

        // Compressing the transpose column-wise yields this matrix row-wise
        let (row_ptr, col_idx, vals) =
            build_compressed_column(&cols0, &rows0, values, n_cols, n_rows, combine)?;

        Self::with_base(base, n_rows, n_cols, row_ptr, col_idx, vals)
    }

    /// Compresses accumulated coordinate buffers
    ///
    /// Runs the [`CoordinateAssembly::finalize`] hook before compressing.
    pub fn from_buffers(
        base: usize,
        mut buffers: CoordinateBuffers<Ti, Tv>,
        n_rows: usize,
        n_cols: usize,
    ) -> Result<Self>
    where
        Tv: DefaultCombine,
    {
        <Self as CoordinateAssembly<Ti, Tv>>::finalize(&mut buffers, n_rows, n_cols);
        Self::from_coordinates(
            base,
            &buffers.rows,
            &buffers.cols,
            &buffers.values,
            n_rows,
            n_cols,
        )
    }
}

impl<Tv: Copy, Ti: CsrIndex> SparseMatrixCSC<Tv, Ti> {
    /// Converts this CSC matrix to CSR format in the same base
    ///
    /// The collaborator compresses the transpose column-wise; those arrays
    /// are then taken as-is for the row-major result.
    pub fn to_csr(&self) -> Result<SparseMatrixCSR<Tv, Ti>> {
        let nnz = self.nnz();
        let mut rows = Vec::with_capacity(nnz);
        let mut cols = Vec::with_capacity(nnz);

        for j in 0..self.n_cols {
            for k in self.raw_col_range(j) {
                rows.push(self.row_idx[k].index() - self.offset);
                cols.push(j);
            }
        }

        log::debug!(
            "converting {}×{} CSC matrix ({} nnz) to CSR",
            self.n_rows,
            self.n_cols,
            nnz
        );

        let (col_ptr, row_idx, values) = build_compressed_column(
            &cols,
            &rows,
            &self.values,
            self.n_cols,
            self.n_rows,
            |kept, _| kept,
        )?;
        let transposed =
            SparseMatrixCSC::with_base(self.offset, self.n_cols, self.n_rows, col_ptr, row_idx, values)?;

        Ok(SparseMatrixCSR::from_transpose(transposed))
    }

    /// Builds a CSC matrix from coordinates in base `base`, folding
    /// duplicates with `combine`
    pub fn from_coordinates_with<F>(
        base: usize,
        rows: &[Ti],
        cols: &[Ti],
        values: &[Tv],
        n_rows: usize,
        n_cols: usize,
        combine: F,
    ) -> Result<Self>
    where
        F: FnMut(Tv, Tv) -> Tv,
    {
        let (rows0, cols0) = validate_coordinates(base, rows, cols, values, n_rows, n_cols)?;
        let (col_ptr, row_idx, vals) =
            build_compressed_column(&rows0, &cols0, values, n_rows, n_cols, combine)?;

        Self::with_base(base, n_rows, n_cols, col_ptr, row_idx, vals)
    }

    /// Builds a CSC matrix from coordinates, folding duplicates with the
    /// default reduction of `Tv`
    pub fn from_coordinates(
        base: usize,
        rows: &[Ti],
        cols: &[Ti],
        values: &[Tv],
        n_rows: usize,
        n_cols: usize,
    ) -> Result<Self>
    where
        Tv: DefaultCombine,
    {
        Self::from_coordinates_with(base, rows, cols, values, n_rows, n_cols, Tv::combine)
    }
}

impl<Tv, Ti> CoordinateAssembly<Ti, Tv> for SparseMatrixCSR<Tv, Ti> {}

impl<Tv, Ti> CoordinateAssembly<Ti, Tv> for SparseMatrixCSC<Tv, Ti> {}

/// Checks lengths and bounds, returning 0-based rows and columns
fn validate_coordinates<Tv, Ti: CsrIndex>(
    base: usize,
    rows: &[Ti],
    cols: &[Ti],
    values: &[Tv],
    n_rows: usize,
    n_cols: usize,
) -> Result<(Vec<usize>, Vec<usize>)> {
    for len in [rows.len(), cols.len()] {
        if len != values.len() {
            return Err(CsrError::InconsistentNnz {
                expected: values.len(),
                actual: len,
            });
        }
    }

    let out_of_range = |k: usize| CsrError::IndexOutOfRange {
        row: widen(rows[k]),
        col: widen(cols[k]),
        n_rows,
        n_cols,
        base,
    };
    let rows0 = zero_based(rows, base, n_rows).map_err(out_of_range)?;
    let cols0 = zero_based(cols, base, n_cols).map_err(out_of_range)?;

    Ok((rows0, cols0))
}

/// Smallest extent that holds every index, given in base `base`
fn inferred_extent<Ti: CsrIndex>(indices: &[Ti], base: usize, what: &str) -> Result<usize> {
    let mut extent = 0;
    for idx in indices.iter().filter_map(|&idx| to_usize(idx)) {
        let end = idx.checked_add(1).ok_or_else(|| {
            CsrError::InvalidDimension(format!(
                "{} index {} leaves no room for a {} count",
                what, idx, what
            ))
        })?;
        extent = extent.max(end.saturating_sub(base));
    }
    Ok(extent)
}

/// Strips `offset` from stored indices and re-encodes them as `Ti2`
fn recast<Ti: CsrIndex, Ti2: CsrIndex>(indices: &[Ti], offset: usize) -> Result<Vec<Ti2>> {
    indices
        .iter()
        .map(|&idx| checked_index::<Ti2>(idx.index() - offset))
        .collect()
}

fn check_addressable_shape<Ti: CsrIndex>(n_rows: usize, n_cols: usize, base: usize) -> Result<()> {
    crate::matrix::csr::check_addressable::<Ti>(n_rows, base, "row")?;
    crate::matrix::csr::check_addressable::<Ti>(n_cols, base, "column")
}
