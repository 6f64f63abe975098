//! Utilities for converting between our matrix formats and sprs
//!
//! sprs matrices are always 0-based; the base of our matrices is stripped
//! on the way out and applied on the way in.

use num_traits::Num;
use sprs::CsMatI;

use crate::error::Result;
use crate::matrix::index::{shifted_down, CsrIndex};
use crate::matrix::{SparseMatrixCSC, SparseMatrixCSR};

/// Converts our CSR matrix to sprs CsMatI format
///
/// # Errors
///
/// `InvalidStructure` if the arrays no longer satisfy the CSR invariants
/// (sprs rejects those).
pub fn to_sprs_csr<Tv, Ti>(matrix: &SparseMatrixCSR<Tv, Ti>) -> Result<CsMatI<Tv, Ti>>
where
    Tv: Copy + Num + Default,
    Ti: CsrIndex,
{
    matrix.check_structure()?;

    Ok(CsMatI::new(
        matrix.shape(),
        shifted_down(matrix.row_ptr(), matrix.offset()),
        shifted_down(matrix.col_indices(), matrix.offset()),
        matrix.nonzeros().to_vec(),
    ))
}

/// Converts our CSC matrix to sprs CsMatI format (as CSC)
pub fn to_sprs_csc<Tv, Ti>(matrix: &SparseMatrixCSC<Tv, Ti>) -> Result<CsMatI<Tv, Ti>>
where
    Tv: Copy + Num + Default,
    Ti: CsrIndex,
{
    // Validated through the row-major dual, which shares the arrays' layout
    let dual = SparseMatrixCSR::from_transpose(matrix.clone());
    dual.check_structure()?;

    Ok(CsMatI::new_csc(
        matrix.shape(),
        shifted_down(matrix.col_ptr(), matrix.base()),
        shifted_down(matrix.row_indices(), matrix.base()),
        matrix.nonzeros().to_vec(),
    ))
}

/// Converts sprs CsMatI to our SparseMatrixCSR format in base `base`
pub fn from_sprs_csr<Tv, Ti>(matrix: CsMatI<Tv, Ti>, base: usize) -> Result<SparseMatrixCSR<Tv, Ti>>
where
    Tv: Copy + Num + Default,
    Ti: CsrIndex,
{
    // Ensure matrix is in CSR format
    let matrix = if matrix.is_csr() {
        matrix
    } else {
        matrix.to_csr()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSR::with_base(base, n_rows, n_cols, indptr, indices, data)
}

/// Converts sprs CsMatI to our SparseMatrixCSC format in base `base`
pub fn from_sprs_csc<Tv, Ti>(matrix: CsMatI<Tv, Ti>, base: usize) -> Result<SparseMatrixCSC<Tv, Ti>>
where
    Tv: Copy + Num + Default,
    Ti: CsrIndex,
{
    // Ensure matrix is in CSC format
    let matrix = if matrix.is_csc() {
        matrix
    } else {
        matrix.to_csc()
    };

    let (n_rows, n_cols) = matrix.shape();
    let (indptr, indices, data) = matrix.into_raw_storage();

    SparseMatrixCSC::with_base(base, n_rows, n_cols, indptr, indices, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrixCSR<f64> {
        SparseMatrixCSR::with_base(
            1,
            3,
            3,
            vec![0, 2, 3, 5],
            vec![0, 1, 1, 0, 2],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn test_csr_roundtrip() {
        let original = sample();

        let sprs_mat = to_sprs_csr(&original).unwrap();
        assert!(sprs_mat.is_csr());
        assert_eq!(sprs_mat.get(2, 0), Some(&4.0));
        assert_eq!(sprs_mat.get(1, 0), None);

        let roundtrip = from_sprs_csr(sprs_mat, 1).unwrap();
        assert_eq!(roundtrip, original);
    }

    #[test]
    fn test_csc_roundtrip() {
        let csc = sample().to_csc().unwrap();

        let sprs_csc = to_sprs_csc(&csc).unwrap();
        assert!(sprs_csc.is_csc());
        assert_eq!(sprs_csc.get(0, 1), Some(&2.0));

        let roundtrip = from_sprs_csc(sprs_csc, 1).unwrap();
        assert_eq!(roundtrip, csc);
    }

    #[test]
    fn test_unsorted_rejected() {
        let mut csr = sample();
        csr.col_indices_mut().swap(0, 1);
        assert!(to_sprs_csr(&csr).is_err());
    }

    #[test]
    fn test_pointer_past_entries_rejected() {
        let csr =
            SparseMatrixCSR::<f64, usize>::new(2, 3, vec![0, 5, 3], vec![0, 1, 2], vec![1.0, 2.0, 3.0])
                .unwrap();
        assert!(to_sprs_csr(&csr).is_err());
    }
}
