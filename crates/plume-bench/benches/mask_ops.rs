//! Criterion micro-benchmarks for range-set and cell-index operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plume_core::{AxisConstraints, FamilyId, IndexRange, IndexRangeSet, Interval};
use plume_mask::{CellIndex, Mask};
use plume_test_utils::grid_metadata;

const GAS: FamilyId = FamilyId(0);

/// Benchmark: intersect two range sets of 10K interleaved ranges each.
fn bench_range_set_intersection(c: &mut Criterion) {
    let a = IndexRangeSet::from_unsorted(
        (0..10_000u64).map(|i| IndexRange::new(i * 10, i * 10 + 6)),
    );
    let b = IndexRangeSet::from_unsorted(
        (0..10_000u64).map(|i| IndexRange::new(i * 10 + 3, i * 10 + 9)),
    );

    c.bench_function("range_set_intersection_10k", |bench| {
        bench.iter(|| {
            let out = a.intersect(&b);
            black_box(&out);
        });
    });
}

/// Benchmark: slab query against a 16x16x16 cell index (4096 cells).
fn bench_cell_index_slab_query(c: &mut Criterion) {
    let meta = grid_metadata(GAS, 16, 64);
    let index = CellIndex::new(
        GAS,
        meta.cells_of(GAS).unwrap(),
        meta.particle_count(GAS).unwrap(),
    )
    .unwrap();
    let constraints: AxisConstraints = [
        None,
        None,
        Some(Interval::new(0.4, 0.6).unwrap()),
    ];

    c.bench_function("cell_index_slab_query_4096", |bench| {
        bench.iter(|| {
            let hit = index.query(&constraints);
            black_box(&hit);
        });
    });
}

/// Benchmark: a full constrain sequence on a fresh mask each iteration.
fn bench_mask_constrain_sequence(c: &mut Criterion) {
    let meta = grid_metadata(GAS, 16, 64);
    let slab: AxisConstraints = [
        Some(Interval::new(0.2, 0.8).unwrap()),
        None,
        Some(Interval::new(0.4, 0.6).unwrap()),
    ];
    let corner: AxisConstraints = [
        Some(Interval::new(0.0, 0.5).unwrap()),
        Some(Interval::new(0.0, 0.5).unwrap()),
        None,
    ];

    c.bench_function("mask_constrain_sequence_4096", |bench| {
        bench.iter(|| {
            let mut mask = Mask::new(&meta).unwrap();
            mask.constrain_spatial(GAS, &slab).unwrap();
            mask.constrain_spatial(GAS, &corner).unwrap();
            black_box(mask.selected_count(GAS).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_range_set_intersection,
    bench_cell_index_slab_query,
    bench_mask_constrain_sequence
);
criterion_main!(benches);
