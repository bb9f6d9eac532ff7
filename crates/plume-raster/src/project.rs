//! Projection along a box axis.

use plume_core::RasterError;

use crate::field::{Axis, ParticleField};
use crate::grid::{containing_pixel, pixel_center, pixel_span, wrap_pixel, wrap_unit, PixelGrid};
use crate::table::KernelTable;

/// Project the field along `axis` onto a `resolution x resolution`
/// periodic grid.
///
/// Each particle deposits a total of `weight / h^2`, split over the
/// pixels whose centers fall strictly inside its footprint in
/// proportion to the column kernel evaluated at each center. The
/// footprint radius is the kernel support times `h`, clamped to half
/// the box; pixel indices wrap periodically, so particles near an edge
/// deposit into pixels on the opposite edge. A footprint too small to
/// cover any pixel center collapses onto the pixel containing the
/// particle, so no weight is ever silently dropped.
///
/// A non-finite or non-positive smoothing length fails the whole call
/// with [`RasterError::InvalidSmoothingLength`]; callers that want to
/// skip such particles filter them out first.
pub fn project(
    field: &ParticleField<'_>,
    table: &KernelTable,
    resolution: u32,
    axis: Axis,
) -> Result<PixelGrid, RasterError> {
    let mut grid = PixelGrid::new(resolution)?;
    project_into(&mut grid, field, table, axis, 0)?;
    Ok(grid)
}

/// Accumulate `field` into an existing grid. `index_offset` is the
/// global index of the field's first particle, used only for error
/// reporting from partitioned parallel runs.
pub(crate) fn project_into(
    grid: &mut PixelGrid,
    field: &ParticleField<'_>,
    table: &KernelTable,
    axis: Axis,
    index_offset: usize,
) -> Result<(), RasterError> {
    let resolution = grid.resolution() as usize;
    let (row_axis, col_axis) = axis.in_plane();
    // (row, col, kernel value) triples for the particle being deposited.
    let mut covered: Vec<(usize, usize, f64)> = Vec::new();

    for (i, position) in field.positions().iter().enumerate() {
        let h = field.smoothing()[i];
        if !(h.is_finite() && h > 0.0) {
            return Err(RasterError::InvalidSmoothingLength {
                index: index_offset + i,
                value: h,
            });
        }
        let x = wrap_unit(position[row_axis]);
        let y = wrap_unit(position[col_axis]);
        let radius = (table.support() * h).min(0.5);

        covered.clear();
        let mut kernel_sum = 0.0;
        let (row_lo, row_hi) = pixel_span(x, radius, resolution);
        let (col_lo, col_hi) = pixel_span(y, radius, resolution);
        for row in row_lo..=row_hi {
            let dx = pixel_center(row, resolution) - x;
            for col in col_lo..=col_hi {
                let dy = pixel_center(col, resolution) - y;
                let r = (dx * dx + dy * dy).sqrt();
                if r < radius {
                    let w = table.sample(r / h);
                    kernel_sum += w;
                    covered.push((wrap_pixel(row, resolution), wrap_pixel(col, resolution), w));
                }
            }
        }

        let amount = field.weights()[i] / (h * h);
        if kernel_sum > 0.0 {
            for &(row, col, w) in &covered {
                grid.add(row, col, amount * w / kernel_sum);
            }
        } else {
            grid.add(
                containing_pixel(x, resolution),
                containing_pixel(y, resolution),
                amount,
            );
        }
    }
    Ok(())
}
