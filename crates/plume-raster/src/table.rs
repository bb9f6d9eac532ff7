//! Sampled column-kernel lookup.

use crate::kernel::Kernel;

/// Number of sample intervals in a [`KernelTable`].
const TABLE_SAMPLES: usize = 1024;

/// A precomputed 1-D lookup table for the column-integrated kernel.
///
/// `w2d` is sampled at 1025 evenly spaced points over
/// `[0, support]` and linearly interpolated between them, so the
/// projection hot loop never evaluates the kernel integral itself.
/// Build one per kernel shape and reuse it across invocations.
#[derive(Clone, Debug)]
pub struct KernelTable {
    samples: Vec<f64>,
    support: f64,
    step: f64,
}

impl KernelTable {
    /// Sample `kernel`'s column integral over its support.
    pub fn new<K: Kernel + ?Sized>(kernel: &K) -> Self {
        let support = kernel.support_radius();
        let step = support / TABLE_SAMPLES as f64;
        let samples = (0..=TABLE_SAMPLES)
            .map(|k| kernel.w2d(k as f64 * step))
            .collect();
        Self {
            samples,
            support,
            step,
        }
    }

    /// Compact-support radius of the sampled kernel, in units of the
    /// smoothing length.
    pub fn support(&self) -> f64 {
        self.support
    }

    /// Interpolated column-kernel value at normalized distance `u`.
    ///
    /// Returns 0 for `u >= support()`.
    pub fn sample(&self, u: f64) -> f64 {
        if u >= self.support {
            return 0.0;
        }
        let x = u / self.step;
        let i = (x as usize).min(self.samples.len() - 2);
        let frac = x - i as f64;
        self.samples[i] + (self.samples[i + 1] - self.samples[i]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{CubicSpline, TopHat};

    #[test]
    fn table_hits_exact_values_at_sample_points() {
        let kernel = CubicSpline;
        let table = KernelTable::new(&kernel);
        for k in [0, 17, 512, 1023] {
            let u = k as f64 * table.step;
            assert_eq!(table.sample(u), kernel.w2d(u));
        }
    }

    #[test]
    fn interpolation_stays_between_neighbouring_samples() {
        let kernel = CubicSpline;
        let table = KernelTable::new(&kernel);
        for k in 0..200 {
            let u = 2.0 * (k as f64 + 0.31) / 200.0;
            let exact = kernel.w2d(u);
            assert!(
                (table.sample(u) - exact).abs() < 1e-4,
                "too coarse at u = {u}"
            );
        }
    }

    #[test]
    fn beyond_support_is_zero() {
        let table = KernelTable::new(&TopHat);
        assert_eq!(table.sample(1.0), 0.0);
        assert_eq!(table.sample(10.0), 0.0);
    }

    #[test]
    fn top_hat_table_is_flat_away_from_the_edge() {
        let table = KernelTable::new(&TopHat);
        assert_eq!(table.sample(0.25), 1.0);
        assert_eq!(table.sample(0.75), 1.0);
    }
}
