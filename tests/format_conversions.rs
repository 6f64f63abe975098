//! Integration tests for base, format and sprs conversions

use std::borrow::Cow;

use csrstore::{from_sprs_csr, to_sprs_csr, SparseMatrixCSC, SparseMatrixCSR};

/// Creates a test matrix with a specific pattern
fn create_test_matrix_csr(base: usize) -> SparseMatrixCSR<f64, u32> {
    // Create a 5x5 matrix with a specific pattern:
    // [ 1.0  0.0  2.0  0.0  0.0 ]
    // [ 0.0  3.0  0.0  0.0  4.0 ]
    // [ 0.0  0.0  5.0  0.0  0.0 ]
    // [ 6.0  0.0  0.0  7.0  0.0 ]
    // [ 0.0  0.0  8.0  0.0  9.0 ]

    SparseMatrixCSR::with_base(
        base,
        5,
        5,
        vec![0, 2, 4, 5, 7, 9],
        vec![0, 2, 1, 4, 2, 0, 3, 2, 4],
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0],
    )
    .unwrap()
}

/// Creates a tridiagonal matrix in CSR format
fn create_tridiagonal_csr(n: usize) -> SparseMatrixCSR<f64, u32> {
    let mut row_ptr = Vec::with_capacity(n + 1);
    let mut col_idx = Vec::new();
    let mut values = Vec::new();

    row_ptr.push(0);

    for i in 0..n {
        // Lower diagonal
        if i > 0 {
            col_idx.push(i as u32 - 1);
            values.push(1.0);
        }

        // Diagonal
        col_idx.push(i as u32);
        values.push(2.0);

        // Upper diagonal
        if i < n - 1 {
            col_idx.push(i as u32 + 1);
            values.push(1.0);
        }

        row_ptr.push(col_idx.len() as u32);
    }

    SparseMatrixCSR::with_base(1, n, n, row_ptr, col_idx, values).unwrap()
}

#[test]
fn test_base_roundtrip_is_bit_identical() {
    let original = create_test_matrix_csr(1);

    let zero = original.to_base(0).unwrap().into_owned();
    assert_eq!(zero.row_ptr(), &[0, 2, 4, 5, 7, 9]);

    let back = zero.to_base(1).unwrap().into_owned();
    assert_eq!(back.row_ptr(), original.row_ptr());
    assert_eq!(back.col_indices(), original.col_indices());
    assert_eq!(back.nonzeros(), original.nonzeros());
}

#[test]
fn test_same_base_is_not_copied() {
    let original = create_test_matrix_csr(0);
    match original.to_base(0).unwrap() {
        Cow::Borrowed(m) => assert!(std::ptr::eq(m, &original)),
        Cow::Owned(_) => panic!("same-base conversion must not copy"),
    }
}

#[test]
fn test_csr_csc_csr_preserves_entries() {
    let csr = create_test_matrix_csr(1);
    let csc = csr.to_csc().unwrap();
    let back = csc.to_csr().unwrap();

    for row in 1..=5 {
        for col in 1..=5 {
            assert_eq!(
                back.element_at(row, col).unwrap(),
                csr.element_at(row, col).unwrap()
            );
            assert_eq!(
                csc.element_at(row, col).unwrap(),
                csr.element_at(row, col).unwrap()
            );
        }
    }
}

#[test]
fn test_csc_columns() {
    let csc: SparseMatrixCSC<f64, u32> = create_test_matrix_csr(1).to_csc().unwrap();

    let col3: Vec<_> = csc.col_iter(3).collect();
    assert_eq!(col3, vec![(1, &2.0), (3, &5.0), (5, &8.0)]);

    let col4: Vec<_> = csc.col_iter(4).collect();
    assert_eq!(col4, vec![(4, &7.0)]);
}

#[test]
fn test_transpose_of_tridiagonal_is_itself() {
    let a = create_tridiagonal_csr(50);
    assert_eq!(a.transpose().unwrap(), a);
}

#[test]
fn test_sprs_multiplication() {
    // Create a tridiagonal matrix
    let a = create_tridiagonal_csr(10);

    // Convert to sprs and square it there
    let sprs_a = to_sprs_csr(&a).unwrap();
    let sprs_result = &sprs_a * &sprs_a;

    // Convert back to our format
    let result = from_sprs_csr(sprs_result, 1).unwrap();

    assert_eq!(result.shape(), (10, 10));

    // Verify the structure - should now be pentadiagonal
    for i in 1..=10usize {
        let cols: Vec<_> = result.row_iter(i).map(|(col, _)| col).collect();
        let lo = i.saturating_sub(2).max(1);
        let hi = (i + 2).min(10);
        assert_eq!(cols, (lo..=hi).collect::<Vec<_>>());
    }

    assert_eq!(result.element_at(5, 5).unwrap(), 6.0);
    assert_eq!(result.element_at(1, 1).unwrap(), 5.0);
    assert_eq!(result.element_at(5, 7).unwrap(), 1.0);
}

#[test]
fn test_large_banded_matrix() {
    let size = 1000;
    let a = create_tridiagonal_csr(size);

    assert_eq!(a.shape(), (size, size));
    assert_eq!(a.nnz(), 3 * size - 2);
    assert!(a.check_structure().is_ok());

    let sprs_a = to_sprs_csr(&a).unwrap();
    assert_eq!(sprs_a.nnz(), 3 * size - 2);
    assert_eq!(sprs_a.get(0, 0), Some(&2.0));
    assert_eq!(sprs_a.get(size / 2, size / 2 - 1), Some(&1.0));
    assert_eq!(sprs_a.get(size - 1, size - 1), Some(&2.0));

    let roundtrip = from_sprs_csr(sprs_a, 1).unwrap();
    assert_eq!(roundtrip, a);
}
