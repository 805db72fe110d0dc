//! Pixel segment rasterization kernel.

use cubecl::prelude::*;
use crate::gpu::constants::*;
use super::{crossing::crossing_bounds, locate::*, pack::pack_segment};

/// Grid-stride pass over output slots `[0, slot_bound)`.
///
/// Each slot is mapped back to its line and local index, solved for its
/// parametric bounds and packed. Slots at or past `segments_len`, or that
/// resolve past the last line, are written as the sentinel.
#[cube(launch_unchecked)]
pub(crate) fn rasterize_kernel(
    line_data: &Array<f32>,
    line_orders: &Array<u32>,
    line_lens: &Array<u32>,
    lines_len: u32,
    segments_len: u32,
    slot_bound: u32,
    stride: u32,
    segments: &mut Array<u32>,
) {
    let sentinel = u32::new(SEGMENT_SENTINEL as i64);

    let mut slot = ABSOLUTE_POS as u32;
    while slot < slot_bound {
        let out = (slot * SEGMENT_WORDS) as usize;
        let line = locate_line(line_lens, lines_len, slot);

        if slot >= segments_len || line >= lines_len {
            segments[out] = sentinel;
            segments[out + 1] = sentinel;
        } else {
            let local = local_index(line_lens, line, slot);
            let count = line_lens[line as usize] - (slot - local);
            let base = (line * LINE_STRIDE) as usize;
            let bounds = crossing_bounds(
                line_data[base],
                line_data[base + 1],
                line_data[base + 2],
                line_data[base + 3],
                local,
                count,
            );
            let words = pack_segment(
                line_data[base + 4],
                line_data[base + 5],
                line_data[base + 6],
                line_data[base + 7],
                line_orders[line as usize],
                bounds[0],
                bounds[1],
            );
            segments[out] = words[0];
            segments[out + 1] = words[1];
        }

        slot += stride;
    }
}
