//! Coordinate (COO) accumulation and compression into compressed formats

use crate::error::Result;
use crate::matrix::index::{checked_index, CsrIndex};
use crate::utils::exclusive_scan;

/// Reduction applied to duplicate coordinates when none is given
///
/// Implemented for a closed set of value categories: `bool` combines with
/// logical or, the numeric primitives combine with addition.
pub trait DefaultCombine: Sized {
    /// Folds a later duplicate `b` into the accumulated value `a`
    fn combine(a: Self, b: Self) -> Self;
}

impl DefaultCombine for bool {
    #[inline]
    fn combine(a: Self, b: Self) -> Self {
        a || b
    }
}

macro_rules! numeric_default_combine {
    ($($t:ty),*) => {
        $(
            impl DefaultCombine for $t {
                #[inline]
                fn combine(a: Self, b: Self) -> Self {
                    a + b
                }
            }
        )*
    };
}

numeric_default_combine!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Open coordinate buffers for incremental assembly
///
/// Entries are appended unsorted and duplicates are kept; nothing is
/// validated until the buffers are compressed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateBuffers<Ti, Tv> {
    /// Row of each entry
    pub rows: Vec<Ti>,
    /// Column of each entry
    pub cols: Vec<Ti>,
    /// Value of each entry
    pub values: Vec<Tv>,
}

impl<Ti, Tv> CoordinateBuffers<Ti, Tv> {
    /// Creates empty buffers
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            cols: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates empty buffers with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Appends one entry
    pub fn push(&mut self, row: Ti, col: Ti, value: Tv) {
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
    }

    /// Number of appended entries, duplicates included
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no entry has been appended
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Two-phase coordinate assembly hooks of a storage format
///
/// `append_entry` is purely additive. `finalize` is an extension point for
/// formats that post-process the buffers before compression; the compressed
/// row and column formats leave it as a no-op because compression itself
/// sorts and combines.
pub trait CoordinateAssembly<Ti, Tv> {
    /// Appends `(row, col, value)` to the buffers
    fn append_entry(buffers: &mut CoordinateBuffers<Ti, Tv>, row: Ti, col: Ti, value: Tv) {
        buffers.push(row, col, value);
    }

    /// Post-processes the buffers of an `n_rows × n_cols` matrix
    fn finalize(_buffers: &mut CoordinateBuffers<Ti, Tv>, _n_rows: usize, _n_cols: usize) {}
}

/// Compresses 0-based coordinates into column-major arrays
///
/// Returns `(col_ptr, row_idx, values)`, all 0-based. Rows are ascending
/// within each column; duplicate `(row, col)` pairs are folded left to
/// right in input order with `combine`. Stored zeros are kept.
///
/// Passing columns as `rows` and rows as `cols` (with `n_rows`/`n_cols`
/// swapped) produces the row-major arrays of the same matrix.
///
/// Coordinates must already be validated against `n_rows` and `n_cols`.
pub fn build_compressed_column<Ti, Tv, F>(
    rows: &[usize],
    cols: &[usize],
    values: &[Tv],
    n_rows: usize,
    n_cols: usize,
    mut combine: F,
) -> Result<(Vec<Ti>, Vec<Ti>, Vec<Tv>)>
where
    Ti: CsrIndex,
    Tv: Copy,
    F: FnMut(Tv, Tv) -> Tv,
{
    debug_assert!(rows.len() == cols.len() && cols.len() == values.len());
    debug_assert!(rows.iter().all(|&r| r < n_rows));

    // Count entries per column and scatter them into column order
    let mut counts = vec![0usize; n_cols];
    for &col in cols {
        counts[col] += 1;
    }
    let starts = exclusive_scan(&counts);

    let mut next = starts.clone();
    let mut order = vec![0usize; values.len()];
    for (k, &col) in cols.iter().enumerate() {
        order[next[col]] = k;
        next[col] += 1;
    }

    let mut col_ptr = Vec::with_capacity(n_cols + 1);
    let mut row_idx = Vec::with_capacity(values.len());
    let mut vals = Vec::with_capacity(values.len());
    col_ptr.push(Ti::zero());

    for j in 0..n_cols {
        let slice = &mut order[starts[j]..starts[j + 1]];
        // Stable, so duplicates keep their input order
        slice.sort_by_key(|&k| rows[k]);

        let mut last_row: Option<usize> = None;
        for &k in slice.iter() {
            let row = rows[k];
            if last_row == Some(row) {
                if let Some(acc) = vals.last_mut() {
                    *acc = combine(*acc, values[k]);
                }
            } else {
                row_idx.push(checked_index(row)?);
                vals.push(values[k]);
                last_row = Some(row);
            }
        }
        col_ptr.push(checked_index(vals.len())?);
    }

    log::trace!(
        "compressed {} coordinates into {} stored entries over {} columns",
        values.len(),
        vals.len(),
        n_cols
    );

    Ok((col_ptr, row_idx, vals))
}
