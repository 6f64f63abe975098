//! # csrstore: Compressed Sparse Row storage with an arbitrary index base
//!
//! This library stores sparse matrices in CSR form and exposes every index
//! in a base chosen at construction (0 or 1 conventionally), over generic
//! value and index types.
//!
//! ## Overview
//!
//! - **Store**: [`SparseMatrixCSR`] keeps row pointers and column indices
//!   pre-shifted by the base, so lookups and products never branch on it.
//! - **Access**: element lookup by binary search, per-row slot ranges,
//!   coordinate extraction and aliased views of the stored arrays.
//! - **Conversion**: change of base, element/index type casts,
//!   CSR ↔ CSC through the transpose duality, and coordinate assembly.
//! - **Products**: dense matrix-vector multiplication, serial or
//!   row-parallel with Rayon.
//!
//! ## Usage
//!
//! ```
//! use csrstore::SparseMatrixCSR;
//! use ndarray::array;
//!
//! // 1-based coordinates; duplicates would be summed
//! let a: SparseMatrixCSR<f64, u32> = SparseMatrixCSR::from_coordinates(
//!     1,
//!     &[1, 2, 2],
//!     &[1, 1, 2],
//!     &[10.0, 20.0, 30.0],
//!     2,
//!     2,
//! )
//! .unwrap();
//!
//! assert_eq!(a.element_at(2, 1).unwrap(), 20.0);
//! assert_eq!(a.element_at(1, 2).unwrap(), 0.0);
//! assert_eq!(&a * &array![1.0, 1.0], array![10.0, 50.0]);
//! ```
//!
//! ## Aliasing
//!
//! [`SparseMatrixCSR::nonzeros_mut`] and
//! [`SparseMatrixCSR::col_indices_mut`] hand out views of the matrix's own
//! arrays. The matrix has no internal synchronisation; sharing it across
//! threads while one of them writes requires external locking.

pub mod error;
pub mod matrix;
pub mod parallel;
pub mod utils;

// Re-export primary components
pub use error::{CsrError, Result};
pub use matrix::{
    build_compressed_column, CoordinateAssembly, CoordinateBuffers, CsrIndex, DefaultCombine,
    MatvecConfig, SparseMatrixCSC, SparseMatrixCSR, SparseStorage, SystemParameters,
};
pub use utils::{from_sprs_csc, from_sprs_csr, to_sprs_csc, to_sprs_csr};

/// Version information for the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
