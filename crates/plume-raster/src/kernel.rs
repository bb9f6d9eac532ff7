//! Smoothing kernels.
//!
//! A kernel is a capability, not a hierarchy: anything implementing
//! [`Kernel`] can drive a rasterization call. Two shapes are provided.
//! [`CubicSpline`] is the production kernel; [`TopHat`] is a step
//! function whose depositions can be checked by hand.

/// A compact-support SPH smoothing kernel.
///
/// All methods take the normalized distance `u = r / h`. The kernel is
/// zero for `u >= support_radius()`.
pub trait Kernel: Sync {
    /// The full 3-D kernel value at normalized distance `u`.
    fn w3d(&self, u: f64) -> f64;

    /// The column-integrated kernel at normalized in-plane distance `u`:
    /// `w3d` integrated along a line of sight passing at distance `u`
    /// from the kernel center.
    ///
    /// The default implementation integrates [`Kernel::w3d`] numerically
    /// with the midpoint rule. It is only ever called while building a
    /// [`KernelTable`](crate::KernelTable), so the cost is paid once per
    /// table, not per particle.
    fn w2d(&self, u: f64) -> f64 {
        let kappa = self.support_radius();
        if u >= kappa {
            return 0.0;
        }
        let half_chord = (kappa * kappa - u * u).sqrt();
        let steps = 2048;
        let dt = 2.0 * half_chord / steps as f64;
        let mut acc = 0.0;
        for k in 0..steps {
            let t = -half_chord + (k as f64 + 0.5) * dt;
            acc += self.w3d((u * u + t * t).sqrt());
        }
        acc * dt
    }

    /// Compact-support radius in units of the smoothing length.
    fn support_radius(&self) -> f64;
}

/// The M4 cubic spline kernel with compact support `2h`.
///
/// 3-D normalization is `1/pi`, so `w3d` integrates to one over the
/// support sphere.
#[derive(Clone, Copy, Debug, Default)]
pub struct CubicSpline;

impl Kernel for CubicSpline {
    fn w3d(&self, u: f64) -> f64 {
        const SIGMA: f64 = 1.0 / std::f64::consts::PI;
        if u < 1.0 {
            SIGMA * (1.0 - 1.5 * u * u + 0.75 * u * u * u)
        } else if u < 2.0 {
            let t = 2.0 - u;
            SIGMA * 0.25 * t * t * t
        } else {
            0.0
        }
    }

    fn support_radius(&self) -> f64 {
        2.0
    }
}

/// A unit step kernel: 1 inside the support, 0 outside, in both the
/// 3-D and the column-integrated form.
///
/// Not normalized and not physical. Every deposition it produces is a
/// plain count-weighted average, which makes grid values predictable
/// by hand in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct TopHat;

impl Kernel for TopHat {
    fn w3d(&self, u: f64) -> f64 {
        if u < 1.0 {
            1.0
        } else {
            0.0
        }
    }

    fn w2d(&self, u: f64) -> f64 {
        if u < 1.0 {
            1.0
        } else {
            0.0
        }
    }

    fn support_radius(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_spline_integrates_to_one_over_the_support_sphere() {
        let kernel = CubicSpline;
        // Midpoint rule for 4*pi * integral of u^2 w3d(u) du over [0, 2].
        let steps = 100_000;
        let du = kernel.support_radius() / steps as f64;
        let mut acc = 0.0;
        for k in 0..steps {
            let u = (k as f64 + 0.5) * du;
            acc += u * u * kernel.w3d(u);
        }
        let total = 4.0 * std::f64::consts::PI * acc * du;
        assert!((total - 1.0).abs() < 1e-6, "total = {total}");
    }

    #[test]
    fn cubic_spline_is_zero_at_and_beyond_support() {
        let kernel = CubicSpline;
        assert_eq!(kernel.w3d(2.0), 0.0);
        assert_eq!(kernel.w3d(5.0), 0.0);
        assert_eq!(kernel.w2d(2.0), 0.0);
    }

    #[test]
    fn cubic_spline_decreases_monotonically() {
        let kernel = CubicSpline;
        let mut prev = kernel.w3d(0.0);
        for k in 1..=200 {
            let u = 2.0 * k as f64 / 200.0;
            let w = kernel.w3d(u);
            assert!(w <= prev, "w3d increased at u = {u}");
            prev = w;
        }
    }

    #[test]
    fn column_integral_matches_w3d_chord_for_top_of_kernel() {
        // At u = 0 the column integral is twice the integral of w3d
        // along a radius; spot-check against a fine independent sum.
        let kernel = CubicSpline;
        let steps = 50_000;
        let dt = 2.0 / steps as f64;
        let mut expected = 0.0;
        for k in 0..steps {
            let t = (k as f64 + 0.5) * dt;
            expected += kernel.w3d(t);
        }
        let expected = 2.0 * expected * dt;
        assert!((kernel.w2d(0.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn top_hat_is_a_unit_step() {
        let kernel = TopHat;
        assert_eq!(kernel.w2d(0.0), 1.0);
        assert_eq!(kernel.w2d(0.999), 1.0);
        assert_eq!(kernel.w2d(1.0), 0.0);
        assert_eq!(kernel.w3d(0.5), 1.0);
        assert_eq!(kernel.w3d(1.0), 0.0);
        assert_eq!(kernel.support_radius(), 1.0);
    }
}
