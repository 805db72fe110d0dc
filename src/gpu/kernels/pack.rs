//! Sub-pixel rounding and segment bit packing, mirroring `crate::segment`.

use cubecl::prelude::*;
use crate::gpu::constants::*;
use super::math::*;

/// Round to the nearest sub-pixel unit, ties toward negative infinity.
#[cube]
fn round_subpixel(v: f32) -> f32 {
    (v - f32::new(0.5)).ceil()
}

/// Pack the part of a line between `t0` and `t1` as `[lo, hi]` words.
///
/// Coordinates stay in integral floats so that pixel and tile indices are
/// plain floored divisions by powers of two.
#[cube]
pub(super) fn pack_segment(
    x0: f32,
    y0: f32,
    dx: f32,
    dy: f32,
    order: u32,
    t0: f32,
    t1: f32,
) -> Line<u32> {
    let sx0 = round_subpixel(t0 * dx + x0);
    let sy0 = round_subpixel(t0 * dy + y0);
    let sx1 = round_subpixel(t1 * dx + x0);
    let sy1 = round_subpixel(t1 * dy + y0);

    let subpixels = f32::new(SUBPIXELS_F32);
    let tile_w = f32::new(TILE_WIDTH_F32);
    let tile_h = f32::new(TILE_HEIGHT_F32);

    let pixel_x = (min_f32(sx0, sx1) / subpixels).floor();
    let pixel_y = (min_f32(sy0, sy1) / subpixels).floor();
    let tile_col = (pixel_x / tile_w).floor();
    let tile_row = (pixel_y / tile_h).floor();
    let local_col = (pixel_x - tile_col * tile_w) as u32;
    let local_row = (pixel_y - tile_row * tile_h) as u32;

    let right_edge = (pixel_x + f32::new(1.0)) * subpixels;
    let area = (abs_f32(sx1 - sx0) + f32::new(2.0) * (right_edge - max_f32(sx0, sx1))) as u32;
    let cover_bits = ((sy1 - sy0) as i32) as u32;
    let tile_row_bits = ((tile_row as i32) + i32::new(1)) as u32;
    let tile_col_bits = ((tile_col as i32) + i32::new(1)) as u32;

    let hi = ((tile_row_bits & TILE_ROW_MASK) << TILE_ROW_SHIFT)
        | ((tile_col_bits & TILE_COL_MASK) << TILE_COL_SHIFT)
        | ((order >> ORDER_LO_BITS) & ORDER_HI_MASK);
    let lo = ((order & ORDER_LO_MASK) << ORDER_LO_SHIFT)
        | ((local_col & LOCAL_COL_MASK) << LOCAL_COL_SHIFT)
        | ((local_row & LOCAL_ROW_MASK) << LOCAL_ROW_SHIFT)
        | ((area & AREA_MASK) << AREA_SHIFT)
        | (cover_bits & COVER_MASK);

    let mut out = Line::empty(2usize);
    out[0] = lo;
    out[1] = hi;
    out
}
