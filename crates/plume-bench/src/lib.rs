//! Benchmark fixtures for the Plume snapshot reduction library.
//!
//! Provides deterministic particle clouds so serial and parallel
//! rasterization benchmarks run on identical inputs across machines
//! and runs.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Deterministic pseudo-random value in `[0, 1)` for index `i`.
fn unit_value(seed: u64, i: u64, stream: u64) -> f64 {
    let x = seed
        .wrapping_add(i.wrapping_mul(6364136223846793005))
        .wrapping_add(stream.wrapping_mul(1442695040888963407))
        .wrapping_mul(2862933555777941757);
    (x >> 11) as f64 / (1u64 << 53) as f64
}

/// Build a deterministic particle cloud: positions in the unit box,
/// smoothing lengths in `[0.005, 0.03)`, weights in `[0.5, 1.5)`.
pub fn particle_cloud(n: usize, seed: u64) -> (Vec<[f64; 3]>, Vec<f64>, Vec<f64>) {
    let positions = (0..n as u64)
        .map(|i| {
            [
                unit_value(seed, i, 0),
                unit_value(seed, i, 1),
                unit_value(seed, i, 2),
            ]
        })
        .collect();
    let smoothing = (0..n as u64)
        .map(|i| 0.005 + 0.025 * unit_value(seed, i, 3))
        .collect();
    let weights = (0..n as u64)
        .map(|i| 0.5 + unit_value(seed, i, 4))
        .collect();
    (positions, smoothing, weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_is_deterministic() {
        let a = particle_cloud(100, 42);
        let b = particle_cloud(100, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn cloud_values_stay_in_range() {
        let (positions, smoothing, weights) = particle_cloud(1000, 7);
        for p in &positions {
            assert!(p.iter().all(|&c| (0.0..1.0).contains(&c)));
        }
        assert!(smoothing.iter().all(|&h| (0.005..0.03).contains(&h)));
        assert!(weights.iter().all(|&w| (0.5..1.5).contains(&w)));
    }
}
