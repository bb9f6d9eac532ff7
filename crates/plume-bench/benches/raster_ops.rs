//! Criterion micro-benchmarks for projection and slicing throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plume_bench::particle_cloud;
use plume_raster::{
    project, project_parallel, slice, Axis, CubicSpline, KernelTable, ParticleField,
};

/// Benchmark: serial projection of 10K particles onto a 512^2 grid.
fn bench_project_serial(c: &mut Criterion) {
    let (positions, smoothing, weights) = particle_cloud(10_000, 42);
    let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
    let table = KernelTable::new(&CubicSpline);

    c.bench_function("project_serial_10k_512", |bench| {
        bench.iter(|| {
            let grid = project(&field, &table, 512, Axis::Z).unwrap();
            black_box(&grid);
        });
    });
}

/// Benchmark: the same projection split over 4 workers.
fn bench_project_parallel_4(c: &mut Criterion) {
    let (positions, smoothing, weights) = particle_cloud(10_000, 42);
    let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
    let table = KernelTable::new(&CubicSpline);

    c.bench_function("project_parallel_4_10k_512", |bench| {
        bench.iter(|| {
            let grid = project_parallel(&field, &table, 512, Axis::Z, 4).unwrap();
            black_box(&grid);
        });
    });
}

/// Benchmark: a mid-box slice of 10K particles onto a 512^2 grid.
fn bench_slice_serial(c: &mut Criterion) {
    let (positions, smoothing, weights) = particle_cloud(10_000, 42);
    let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();

    c.bench_function("slice_serial_10k_512", |bench| {
        bench.iter(|| {
            let grid = slice(&field, &CubicSpline, 512, Axis::Z, 0.5).unwrap();
            black_box(&grid);
        });
    });
}

/// Benchmark: building the column-kernel lookup table.
fn bench_kernel_table_build(c: &mut Criterion) {
    c.bench_function("kernel_table_build_cubic_spline", |bench| {
        bench.iter(|| {
            let table = KernelTable::new(&CubicSpline);
            black_box(&table);
        });
    });
}

criterion_group!(
    benches,
    bench_project_serial,
    bench_project_parallel_4,
    bench_slice_serial,
    bench_kernel_table_build
);
criterion_main!(benches);
