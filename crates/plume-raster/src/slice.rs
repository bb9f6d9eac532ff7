//! Planar slices through the box.

use plume_core::RasterError;

use crate::field::{Axis, ParticleField};
use crate::grid::{pixel_center, pixel_span, wrap_pixel, wrap_unit, PixelGrid};
use crate::kernel::Kernel;

/// Sample the field on the plane `coord = slice_fraction` across
/// `slice_axis`, onto a `resolution x resolution` periodic grid.
///
/// Unlike projection this evaluates the full 3-D kernel at the true
/// distance between the plane point and the particle, with no
/// renormalization: each covered pixel receives
/// `weight * w3d(r / h) / h^3`. Particles whose perpendicular distance
/// to the plane is at least the kernel support contribute nothing, so
/// a slice through empty space stays zero.
///
/// `slice_fraction` must lie in `[0, 1]`; smoothing lengths follow the
/// same strict validity rule as projection.
pub fn slice<K: Kernel>(
    field: &ParticleField<'_>,
    kernel: &K,
    resolution: u32,
    slice_axis: Axis,
    slice_fraction: f64,
) -> Result<PixelGrid, RasterError> {
    if !(0.0..=1.0).contains(&slice_fraction) {
        return Err(RasterError::UnsupportedGeometry {
            reason: format!("slice fraction {slice_fraction} outside [0, 1]"),
        });
    }
    let mut grid = PixelGrid::new(resolution)?;
    slice_into(&mut grid, field, kernel, slice_axis, slice_fraction, 0)?;
    Ok(grid)
}

pub(crate) fn slice_into<K: Kernel>(
    grid: &mut PixelGrid,
    field: &ParticleField<'_>,
    kernel: &K,
    slice_axis: Axis,
    slice_fraction: f64,
    index_offset: usize,
) -> Result<(), RasterError> {
    let resolution = grid.resolution() as usize;
    let (row_axis, col_axis) = slice_axis.in_plane();
    let depth_axis = slice_axis.index();
    let support = kernel.support_radius();

    for (i, position) in field.positions().iter().enumerate() {
        let h = field.smoothing()[i];
        if !(h.is_finite() && h > 0.0) {
            return Err(RasterError::InvalidSmoothingLength {
                index: index_offset + i,
                value: h,
            });
        }
        let dz = (slice_fraction - wrap_unit(position[depth_axis])).abs();
        let reach = support * h;
        if dz >= reach {
            continue;
        }
        let x = wrap_unit(position[row_axis]);
        let y = wrap_unit(position[col_axis]);
        let in_plane_radius = (reach * reach - dz * dz).sqrt().min(0.5);
        let amount = field.weights()[i] / (h * h * h);

        let (row_lo, row_hi) = pixel_span(x, in_plane_radius, resolution);
        let (col_lo, col_hi) = pixel_span(y, in_plane_radius, resolution);
        for row in row_lo..=row_hi {
            let dx = pixel_center(row, resolution) - x;
            for col in col_lo..=col_hi {
                let dy = pixel_center(col, resolution) - y;
                let r_plane = (dx * dx + dy * dy).sqrt();
                if r_plane < in_plane_radius {
                    let r = (r_plane * r_plane + dz * dz).sqrt();
                    grid.add(
                        wrap_pixel(row, resolution),
                        wrap_pixel(col, resolution),
                        amount * kernel.w3d(r / h),
                    );
                }
            }
        }
    }
    Ok(())
}
