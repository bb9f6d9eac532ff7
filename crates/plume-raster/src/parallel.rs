//! Worker-parallel drivers for projection and slicing.
//!
//! Particles are split into contiguous partitions, one worker per
//! partition, each accumulating into a private grid. Partial grids
//! come back over a channel and are merged in ascending partition
//! order, so the result is deterministic for a fixed worker count and
//! agrees with the serial driver up to floating-point reassociation
//! of the final per-pixel sums.

use std::panic::{self, AssertUnwindSafe};
use std::thread;

use plume_core::RasterError;

use crate::field::{Axis, ParticleField};
use crate::grid::PixelGrid;
use crate::kernel::Kernel;
use crate::project::project_into;
use crate::slice::slice_into;
use crate::table::KernelTable;

/// Parallel [`project`](crate::project): identical semantics, the work
/// split over `workers` threads.
pub fn project_parallel(
    field: &ParticleField<'_>,
    table: &KernelTable,
    resolution: u32,
    axis: Axis,
    workers: usize,
) -> Result<PixelGrid, RasterError> {
    run_partitioned(field, resolution, workers, move |chunk, offset| {
        let mut partial = PixelGrid::new(resolution)?;
        project_into(&mut partial, chunk, table, axis, offset)?;
        Ok(partial)
    })
}

/// Parallel [`slice`](crate::slice): identical semantics, the work
/// split over `workers` threads.
pub fn slice_parallel<K: Kernel>(
    field: &ParticleField<'_>,
    kernel: &K,
    resolution: u32,
    slice_axis: Axis,
    slice_fraction: f64,
    workers: usize,
) -> Result<PixelGrid, RasterError> {
    if !(0.0..=1.0).contains(&slice_fraction) {
        return Err(RasterError::UnsupportedGeometry {
            reason: format!("slice fraction {slice_fraction} outside [0, 1]"),
        });
    }
    run_partitioned(field, resolution, workers, move |chunk, offset| {
        let mut partial = PixelGrid::new(resolution)?;
        slice_into(&mut partial, chunk, kernel, slice_axis, slice_fraction, offset)?;
        Ok(partial)
    })
}

/// Fan a deposit closure out over contiguous particle partitions and
/// reduce the private grids in ascending partition order.
fn run_partitioned<F>(
    field: &ParticleField<'_>,
    resolution: u32,
    workers: usize,
    deposit: F,
) -> Result<PixelGrid, RasterError>
where
    F: Fn(&ParticleField<'_>, usize) -> Result<PixelGrid, RasterError> + Sync,
{
    if workers == 0 {
        return Err(RasterError::UnsupportedGeometry {
            reason: "worker count must be at least 1".to_string(),
        });
    }
    let mut grid = PixelGrid::new(resolution)?;
    if field.is_empty() {
        return Ok(grid);
    }
    let chunk_len = field.len().div_ceil(workers);

    let partials = thread::scope(|scope| {
        let (sender, receiver) = crossbeam_channel::bounded(workers);
        for part in 0..workers {
            let start = (part * chunk_len).min(field.len());
            let end = ((part + 1) * chunk_len).min(field.len());
            let chunk = field.chunk(start, end);
            let sender = sender.clone();
            let deposit = &deposit;
            scope.spawn(move || {
                // A panic must not strand the receiver; it becomes a
                // reportable error instead of unwinding the scope.
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| deposit(&chunk, start)))
                    .unwrap_or(Err(RasterError::WorkerPanicked));
                let _ = sender.send((part, outcome));
            });
        }
        drop(sender);

        let mut slots: Vec<Option<PixelGrid>> = (0..workers).map(|_| None).collect();
        for _ in 0..workers {
            let (part, outcome) = receiver
                .recv()
                .map_err(|_| RasterError::WorkerPanicked)?;
            slots[part] = Some(outcome?);
        }
        Ok(slots)
    })?;

    for partial in partials {
        grid.merge(&partial.ok_or(RasterError::WorkerPanicked)?);
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{CubicSpline, TopHat};
    use crate::project::project;
    use crate::slice::slice;
    use rand_chacha::rand_core::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn unit_f64(rng: &mut ChaCha8Rng) -> f64 {
        (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn random_field(n: usize, seed: u64) -> (Vec<[f64; 3]>, Vec<f64>, Vec<f64>) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let positions = (0..n)
            .map(|_| [unit_f64(&mut rng), unit_f64(&mut rng), unit_f64(&mut rng)])
            .collect();
        let smoothing = (0..n).map(|_| 0.01 + 0.05 * unit_f64(&mut rng)).collect();
        let weights = (0..n).map(|_| 0.5 + unit_f64(&mut rng)).collect();
        (positions, smoothing, weights)
    }

    #[test]
    fn parallel_projection_matches_serial_within_summation_tolerance() {
        let (positions, smoothing, weights) = random_field(500, 42);
        let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
        let table = KernelTable::new(&CubicSpline);

        let serial = project(&field, &table, 64, Axis::Z).unwrap();
        let parallel = project_parallel(&field, &table, 64, Axis::Z, 4).unwrap();
        for (s, p) in serial.values().iter().zip(parallel.values()) {
            assert!((s - p).abs() <= 1e-12 * s.abs().max(1.0));
        }
    }

    #[test]
    fn parallel_projection_is_exact_when_contributions_are_exact() {
        // Top-hat depositions here are small dyadic rationals, so every
        // addition is exact in f64 and the merge order cannot show.
        let positions: Vec<[f64; 3]> = (0..64)
            .map(|i| [(i as f64 + 0.5) / 64.0, 0.5, 0.5])
            .collect();
        let smoothing = vec![0.25; 64];
        let weights = vec![1.0; 64];
        let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
        let table = KernelTable::new(&TopHat);

        let serial = project(&field, &table, 4, Axis::Z).unwrap();
        let parallel = project_parallel(&field, &table, 4, Axis::Z, 3).unwrap();
        assert_eq!(serial.values(), parallel.values());
    }

    #[test]
    fn single_worker_is_bit_identical_to_serial() {
        let (positions, smoothing, weights) = random_field(200, 7);
        let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
        let table = KernelTable::new(&CubicSpline);

        let serial = project(&field, &table, 32, Axis::Y).unwrap();
        let parallel = project_parallel(&field, &table, 32, Axis::Y, 1).unwrap();
        assert_eq!(serial.values(), parallel.values());
    }

    #[test]
    fn parallel_runs_are_deterministic_for_a_fixed_worker_count() {
        let (positions, smoothing, weights) = random_field(300, 9);
        let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
        let table = KernelTable::new(&CubicSpline);

        let first = project_parallel(&field, &table, 32, Axis::X, 5).unwrap();
        let second = project_parallel(&field, &table, 32, Axis::X, 5).unwrap();
        assert_eq!(first.values(), second.values());
    }

    #[test]
    fn parallel_slice_matches_serial_within_summation_tolerance() {
        let (positions, smoothing, weights) = random_field(400, 11);
        let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();

        let serial = slice(&field, &CubicSpline, 48, Axis::Z, 0.5).unwrap();
        let parallel = slice_parallel(&field, &CubicSpline, 48, Axis::Z, 0.5, 4).unwrap();
        for (s, p) in serial.values().iter().zip(parallel.values()) {
            assert!((s - p).abs() <= 1e-12 * s.abs().max(1.0));
        }
    }

    #[test]
    fn more_workers_than_particles_still_works() {
        let positions = [[0.5, 0.5, 0.5]];
        let smoothing = [0.1];
        let weights = [1.0];
        let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
        let table = KernelTable::new(&CubicSpline);

        let serial = project(&field, &table, 16, Axis::Z).unwrap();
        let parallel = project_parallel(&field, &table, 16, Axis::Z, 8).unwrap();
        assert_eq!(serial.values(), parallel.values());
    }

    #[test]
    fn zero_workers_is_rejected() {
        let field = ParticleField::new(&[], &[], &[]).unwrap();
        let table = KernelTable::new(&TopHat);
        assert!(matches!(
            project_parallel(&field, &table, 4, Axis::Z, 0),
            Err(RasterError::UnsupportedGeometry { .. })
        ));
    }

    #[test]
    fn worker_error_fails_the_whole_invocation() {
        let (positions, mut smoothing, weights) = random_field(100, 3);
        smoothing[83] = f64::INFINITY;
        let field = ParticleField::new(&positions, &smoothing, &weights).unwrap();
        let table = KernelTable::new(&CubicSpline);

        let err = project_parallel(&field, &table, 16, Axis::Z, 4).unwrap_err();
        assert!(matches!(
            err,
            RasterError::InvalidSmoothingLength { index: 83, .. }
        ));
    }
}
