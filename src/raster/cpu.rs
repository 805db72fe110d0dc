//! CPU dispatch of both kernels on the rayon thread pool.
//!
//! Work is split into stride-wide rounds, one `par_chunks_mut` chunk per
//! round, so that slot `round * stride + lane` is computed exactly as the GPU
//! grid-stride loop would.

use log::{debug, trace};
use rayon::prelude::*;

use crate::crossing::Crossings;
use crate::line::{prepare_line, Line};
use crate::locate::{local_index, locate_line};
use crate::math::Vec2;
use crate::segment::{pack_segment, PixelSegment};

use super::lens::line_lens;
use super::types::{DispatchConfig, RasterError, RasterOptions, TailPolicy};
use super::utils::{validate_points, validate_rasterize};

/// `PrepareLines` on the CPU: one `Line` per consecutive point pair.
pub fn prepare_lines_cpu(
    points: &[Vec2],
    orders: &[u32],
    options: &RasterOptions,
) -> Result<Vec<Line>, RasterError> {
    let lines_len = validate_points(points.len(), orders.len())?;
    let stride = options.stride() as usize;
    debug!("prepare_lines_cpu: {lines_len} lines, stride {stride}");

    let mut lines = vec![Line::NONE; lines_len as usize];
    lines
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(round, chunk)| {
            let base = round * stride;
            for (lane, out) in chunk.iter_mut().enumerate() {
                let k = base + lane;
                *out = prepare_line(points[k], points[k + 1], orders[k]);
            }
        });
    Ok(lines)
}

/// Compute the segment for output slot `slot`.
///
/// Slots at or past `segments_len`, or past the last line, become the sentinel.
pub(crate) fn rasterize_slot(
    lines: &[Line],
    line_lens: &[u32],
    segments_len: u32,
    slot: u32,
) -> PixelSegment {
    if slot >= segments_len {
        return PixelSegment::SENTINEL;
    }
    let line_ix = locate_line(line_lens, slot);
    let Some(line) = lines.get(line_ix) else {
        return PixelSegment::SENTINEL;
    };
    let local = local_index(line_lens, line_ix, slot);
    let count = line_lens[line_ix] - (slot - local);
    let (t0, t1) = Crossings::new(line).bounds(local, count);
    pack_segment(line, t0, t1)
}

/// `Rasterize` on the CPU, writing into `segments`.
///
/// With [`TailPolicy::Pad`] every slot of `segments` is written; with
/// [`TailPolicy::Skip`] only the first `config.segments_len`.
pub fn rasterize_cpu(
    config: DispatchConfig,
    lines: &[Line],
    line_lens: &[u32],
    segments: &mut [PixelSegment],
    options: &RasterOptions,
) -> Result<(), RasterError> {
    validate_rasterize(config, lines.len(), line_lens, segments.len())?;
    let bound = match options.tail {
        TailPolicy::Pad => segments.len(),
        TailPolicy::Skip => config.segments_len as usize,
    };
    let stride = options.stride() as usize;
    debug!(
        "rasterize_cpu: {} lines, {} segments, {bound} slots, stride {stride}, {:?}",
        config.lines_len, config.segments_len, options.tail
    );
    trace!("rasterize_cpu: {} rounds", bound.div_ceil(stride));

    segments[..bound]
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(round, chunk)| {
            let base = round * stride;
            for (lane, out) in chunk.iter_mut().enumerate() {
                let slot = (base + lane) as u32;
                *out = rasterize_slot(lines, line_lens, config.segments_len, slot);
            }
        });
    Ok(())
}

/// Run `PrepareLines`, the segment count prefix sum and `Rasterize` on a polyline.
///
/// Returns exactly one segment per output slot, without padding.
pub fn rasterize_polyline_cpu(
    points: &[Vec2],
    orders: &[u32],
    options: &RasterOptions,
) -> Result<Vec<PixelSegment>, RasterError> {
    let lines = prepare_lines_cpu(points, orders, options)?;
    let lens = line_lens(points, orders)?;
    let config = DispatchConfig {
        lines_len: lines.len() as u32,
        segments_len: lens.last().copied().unwrap_or(0),
    };
    let mut segments = vec![PixelSegment::SENTINEL; config.segments_len as usize];
    rasterize_cpu(config, &lines, &lens, &mut segments, options)?;
    Ok(segments)
}
