//! Error types for sparse storage operations

use thiserror::Error;

/// Result type alias using the crate's error
pub type Result<T> = std::result::Result<T, CsrError>;

/// Errors raised by construction, lookup, conversion and multiplication
///
/// Every variant reports a violated input contract. None of them are
/// transient: the same inputs always produce the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsrError {
    /// A dimension disagrees with the arrays it describes, or cannot be
    /// addressed with the chosen index type
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// The last pointer does not match the number of stored values
    #[error("Inconsistent nnz: expected {expected} stored entries, got {actual}")]
    InconsistentNnz {
        /// Entry count implied by the pointer array
        expected: usize,
        /// Length of the value (or index) array
        actual: usize,
    },

    /// A row or column index lies outside the declared bounds
    #[error(
        "Index ({row}, {col}) out of range for a {n_rows}×{n_cols} matrix with base {base}"
    )]
    IndexOutOfRange {
        /// Requested row, in the matrix base
        row: i128,
        /// Requested column, in the matrix base
        col: i128,
        /// Number of rows
        n_rows: usize,
        /// Number of columns
        n_cols: usize,
        /// Index base
        base: usize,
    },

    /// Operand shapes do not conform for multiplication
    #[error(
        "Dimension mismatch: matrix is {n_rows}×{n_cols}, input has length {input_len}, output has length {output_len}"
    )]
    DimensionMismatch {
        /// Rows of the matrix
        n_rows: usize,
        /// Columns of the matrix
        n_cols: usize,
        /// Length of the input vector
        input_len: usize,
        /// Length of the output vector
        output_len: usize,
    },

    /// The storage format has no meaningful answer for this request
    #[error("Unsupported operation '{op}' for {format} storage")]
    UnsupportedOperation {
        /// Operation name
        op: &'static str,
        /// Storage format name
        format: &'static str,
    },

    /// The compressed arrays violate a structural invariant
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// A value does not fit in the target index type
    #[error("Index overflow: {value} does not fit in the index type")]
    IndexOverflow {
        /// The value that could not be represented
        value: usize,
    },
}
