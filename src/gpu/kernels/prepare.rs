//! Line preparation kernel.

use cubecl::prelude::*;
use crate::gpu::constants::*;
use super::math::*;

#[cube]
fn axis_offset(p0: f32, recip: f32, delta: f32) -> f32 {
    let zero = f32::new(0.0);
    let mut offset = zero;
    if delta != zero {
        offset = max_f32((p0.ceil() - p0) * recip, -fract_f32(p0) * recip);
    }
    offset
}

/// Grid-stride pass writing one `Line` record per consecutive point pair.
/// Inactive lines (`ORDER_NONE`) get an all-zero record.
#[cube(launch_unchecked)]
pub(crate) fn prepare_lines_kernel(
    points: &Array<f32>,
    orders: &Array<u32>,
    lines_len: u32,
    stride: u32,
    line_data: &mut Array<f32>,
    line_orders: &mut Array<u32>,
) {
    let zero = f32::new(0.0);
    let one = f32::new(1.0);
    let scale = f32::new(SUBPIXELS_F32);

    let mut k = ABSOLUTE_POS as u32;
    while k < lines_len {
        let base = (k * LINE_STRIDE) as usize;
        let order = orders[k as usize];

        if order == ORDER_NONE {
            line_data[base] = zero;
            line_data[base + 1] = zero;
            line_data[base + 2] = zero;
            line_data[base + 3] = zero;
            line_data[base + 4] = zero;
            line_data[base + 5] = zero;
            line_data[base + 6] = zero;
            line_data[base + 7] = zero;
        } else {
            let p = (k * POINT_STRIDE) as usize;
            let x0 = points[p];
            let y0 = points[p + 1];
            let dx = points[p + 2] - x0;
            let dy = points[p + 3] - y0;
            let recip_x = one / dx;
            let recip_y = one / dy;

            line_data[base] = abs_f32(recip_x);
            line_data[base + 1] = abs_f32(recip_y);
            line_data[base + 2] = axis_offset(x0, recip_x, dx);
            line_data[base + 3] = axis_offset(y0, recip_y, dy);
            line_data[base + 4] = x0 * scale;
            line_data[base + 5] = y0 * scale;
            line_data[base + 6] = dx * scale;
            line_data[base + 7] = dy * scale;
        }
        line_orders[k as usize] = order;

        k += stride;
    }
}
