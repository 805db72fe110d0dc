//! Buffer packing and validation shared by the CPU and GPU paths.

use crate::line::Line;
use crate::math::Vec2;
use crate::segment::PixelSegment;

use super::constants::{LINE_STRIDE, POINT_STRIDE, SEGMENT_WORDS};
use super::types::{DispatchConfig, RasterError};

/// Ensure a float buffer is non-empty by inserting a single filler value.
pub(crate) fn ensure_nonempty(mut data: Vec<f32>, filler: f32) -> Vec<f32> {
    if data.is_empty() {
        data.push(filler);
    }
    data
}

/// Ensure a u32 buffer is non-empty by inserting a single filler value.
pub(crate) fn ensure_nonempty_u32(mut data: Vec<u32>, filler: u32) -> Vec<u32> {
    if data.is_empty() {
        data.push(filler);
    }
    data
}

pub(crate) fn div_ceil(value: u32, divisor: u32) -> u32 {
    if divisor == 0 {
        return 0;
    }
    value.div_ceil(divisor)
}

/// Check that `points` holds one more entry than `orders` and return the line count.
pub(crate) fn validate_points(points_len: usize, orders_len: usize) -> Result<u32, RasterError> {
    if orders_len == 0 {
        return Ok(0);
    }
    if points_len != orders_len + 1 {
        return Err(RasterError::InvalidInput("points must hold one entry more than orders"));
    }
    u32::try_from(orders_len).map_err(|_| RasterError::InvalidInput("too many lines for 1d launch"))
}

/// Check the `Rasterize` buffers against `config`.
///
/// Only the last `line_lens` entry is checked; monotonicity is left to the caller.
pub(crate) fn validate_rasterize(
    config: DispatchConfig,
    lines_len: usize,
    line_lens: &[u32],
    capacity: usize,
) -> Result<(), RasterError> {
    if lines_len != config.lines_len as usize {
        return Err(RasterError::InvalidInput("lines length does not match lines_len"));
    }
    if line_lens.len() != config.lines_len as usize {
        return Err(RasterError::InvalidInput("line_lens length does not match lines_len"));
    }
    if line_lens.last().copied().unwrap_or(0) != config.segments_len {
        return Err(RasterError::InvalidInput("last line_lens entry must equal segments_len"));
    }
    if config.segments_len as usize > capacity {
        return Err(RasterError::InvalidInput("segments_len exceeds output capacity"));
    }
    if u32::try_from(capacity).is_err() {
        return Err(RasterError::InvalidInput("output capacity too large for 1d launch"));
    }
    Ok(())
}

pub(crate) fn flatten_points(points: &[Vec2]) -> Vec<f32> {
    let mut data = Vec::with_capacity(points.len() * POINT_STRIDE);
    for p in points {
        data.push(p.x);
        data.push(p.y);
    }
    data
}

/// Split lines into the float records and order tags the kernels consume.
pub(crate) fn pack_lines(lines: &[Line]) -> (Vec<f32>, Vec<u32>) {
    let mut data = Vec::with_capacity(lines.len() * LINE_STRIDE);
    let mut orders = Vec::with_capacity(lines.len());
    for line in lines {
        data.extend_from_slice(&[
            line.a, line.b, line.c, line.d, line.x0, line.y0, line.dx, line.dy,
        ]);
        orders.push(line.order);
    }
    (data, orders)
}

pub(crate) fn unpack_lines(data: &[f32], orders: &[u32]) -> Vec<Line> {
    data.chunks_exact(LINE_STRIDE)
        .zip(orders)
        .map(|(v, &order)| Line {
            a: v[0],
            b: v[1],
            c: v[2],
            d: v[3],
            x0: v[4],
            y0: v[5],
            dx: v[6],
            dy: v[7],
            order,
        })
        .collect()
}

/// Wire layout: `[lo, hi]` per segment.
pub(crate) fn segments_to_words(segments: &[PixelSegment]) -> Vec<u32> {
    let mut words = Vec::with_capacity(segments.len() * SEGMENT_WORDS);
    for segment in segments {
        words.push(segment.lo());
        words.push(segment.hi());
    }
    words
}

pub(crate) fn write_segment_words(words: &[u32], segments: &mut [PixelSegment]) {
    for (segment, w) in segments.iter_mut().zip(words.chunks_exact(SEGMENT_WORDS)) {
        *segment = PixelSegment::from_words(w[1], w[0]);
    }
}
