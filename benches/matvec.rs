//! Benchmarks for sparse matrix-vector multiplication

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use csrstore::{MatvecConfig, SparseMatrixCSR};
use ndarray::Array1;

/// Creates a banded matrix with `bandwidth` entries on each side of the diagonal
fn create_banded_matrix(n: usize, bandwidth: usize) -> SparseMatrixCSR<f64, u32> {
    let mut rows = Vec::new();
    let mut cols = Vec::new();
    let mut vals = Vec::new();

    for i in 0..n {
        let lo = i.saturating_sub(bandwidth);
        let hi = (i + bandwidth + 1).min(n);
        for j in lo..hi {
            rows.push(i as u32);
            cols.push(j as u32);
            vals.push(1.0 / (1 + i + j) as f64);
        }
    }

    SparseMatrixCSR::from_coordinates(0, &rows, &cols, &vals, n, n).unwrap()
}

fn bench_matvec(c: &mut Criterion) {
    let mut group = c.benchmark_group("matvec");
    let config = MatvecConfig::default().with_parallel_threshold(0);

    for &n in &[1_000usize, 100_000] {
        let a = create_banded_matrix(n, 4);
        let x = Array1::from_elem(n, 1.0);
        let mut y = Array1::zeros(n);

        group.bench_with_input(BenchmarkId::new("serial", n), &n, |bench, _| {
            bench.iter(|| {
                a.multiply(y.view_mut(), black_box(x.view())).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |bench, _| {
            bench.iter(|| {
                a.par_multiply(y.view_mut(), black_box(x.view()), &config)
                    .unwrap();
            })
        });
    }

    group.finish();
}

fn bench_from_coordinates(c: &mut Criterion) {
    let n = 50_000;
    let a = create_banded_matrix(n, 2);
    let (cols, rows, vals) = a.find_coordinates();

    c.bench_function("from_coordinates_50k", |bench| {
        bench.iter(|| {
            SparseMatrixCSR::<f64, u32>::from_coordinates(
                0,
                black_box(&rows),
                black_box(&cols),
                &vals,
                n,
                n,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_matvec, bench_from_coordinates);
criterion_main!(benches);
