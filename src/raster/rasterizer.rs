//! GPU dispatch of both kernels through CubeCL on WGPU.

use cubecl::prelude::*;
use cubecl::wgpu::{WgpuDevice, WgpuRuntime};
use log::{debug, trace};

use crate::gpu;
use crate::gpu::constants::SEGMENT_SENTINEL;
use crate::line::{Line, ORDER_NONE};
use crate::math::Vec2;
use crate::segment::PixelSegment;

use super::constants::{LINE_STRIDE, SEGMENT_WORDS};
use super::lens::line_lens;
use super::types::{DispatchConfig, RasterError, RasterOptions, TailPolicy};
use super::utils::{
    div_ceil, ensure_nonempty, ensure_nonempty_u32, flatten_points, pack_lines, segments_to_words,
    unpack_lines, validate_points, validate_rasterize, write_segment_words,
};

/// GPU-backed line rasterizer targeting WGPU via CubeCL.
pub struct Rasterizer {
    device: WgpuDevice,
    options: RasterOptions,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Rasterizer {
    /// Construct a rasterizer using the default WGPU device.
    pub fn new() -> Self {
        Self {
            device: WgpuDevice::default(),
            options: RasterOptions::default(),
        }
    }

    /// Construct a rasterizer with a caller-provided device.
    pub fn with_device(device: WgpuDevice) -> Self {
        Self {
            device,
            options: RasterOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RasterOptions) -> Self {
        self.options = options;
        self
    }

    /// Cube count and grid stride for `count` work items.
    fn launch_size(&self, count: u32) -> (u32, u32) {
        let lanes = self.options.lanes_per_group.max(1);
        let groups = div_ceil(count, lanes).clamp(1, self.options.groups_per_dispatch.max(1));
        (groups, groups * lanes)
    }

    /// `PrepareLines`: one `Line` per consecutive point pair.
    pub fn prepare_lines(&self, points: &[Vec2], orders: &[u32]) -> Result<Vec<Line>, RasterError> {
        let lines_len = validate_points(points.len(), orders.len())?;
        if lines_len == 0 {
            return Ok(Vec::new());
        }
        let (groups, stride) = self.launch_size(lines_len);
        debug!("prepare_lines: {lines_len} lines on {groups} cubes");

        let client = WgpuRuntime::client(&self.device);

        let point_data = flatten_points(points);
        let order_data = orders.to_vec();
        let line_data_len = lines_len as usize * LINE_STRIDE;

        let points_handle = client.create_from_slice(f32::as_bytes(&point_data));
        let orders_handle = client.create_from_slice(u32::as_bytes(&order_data));
        let line_data_handle = client.empty(line_data_len * core::mem::size_of::<f32>());
        let line_orders_handle = client.empty(lines_len as usize * core::mem::size_of::<u32>());

        unsafe {
            let dim = CubeDim::new_1d(self.options.lanes_per_group.max(1));
            trace!("prepare_lines_kernel: {groups} x {} lanes, stride {stride}", dim.x);
            gpu::prepare_lines_kernel::launch_unchecked::<WgpuRuntime>(
                &client,
                CubeCount::new_1d(groups),
                dim,
                ArrayArg::from_raw_parts::<f32>(&points_handle, point_data.len(), 1),
                ArrayArg::from_raw_parts::<u32>(&orders_handle, order_data.len(), 1),
                ScalarArg::new(lines_len),
                ScalarArg::new(stride),
                ArrayArg::from_raw_parts::<f32>(&line_data_handle, line_data_len, 1),
                ArrayArg::from_raw_parts::<u32>(&line_orders_handle, lines_len as usize, 1),
            )
            .map_err(RasterError::Launch)?;
        }

        let data_bytes = client.read_one(line_data_handle);
        let orders_bytes = client.read_one(line_orders_handle);
        Ok(unpack_lines(f32::from_bytes(&data_bytes), u32::from_bytes(&orders_bytes)))
    }

    /// `Rasterize`: write one segment per slot of `segments`.
    ///
    /// Slot coverage follows `options.tail`, as on the CPU path.
    pub fn rasterize(
        &self,
        config: DispatchConfig,
        lines: &[Line],
        line_lens: &[u32],
        segments: &mut [PixelSegment],
    ) -> Result<(), RasterError> {
        validate_rasterize(config, lines.len(), line_lens, segments.len())?;
        let slot_bound = match self.options.tail {
            TailPolicy::Pad => segments.len() as u32,
            TailPolicy::Skip => config.segments_len,
        };
        debug!(
            "rasterize: {} lines, {} segments, {slot_bound} slots, {:?}",
            config.lines_len, config.segments_len, self.options.tail
        );
        if slot_bound == 0 {
            return Ok(());
        }
        let (groups, stride) = self.launch_size(slot_bound);

        let client = WgpuRuntime::client(&self.device);

        // Ensure all GPU buffers are non-empty to satisfy WGPU binding requirements.
        let (line_data, line_orders) = pack_lines(lines);
        let line_data = ensure_nonempty(line_data, 0.0);
        let line_orders = ensure_nonempty_u32(line_orders, ORDER_NONE);
        let lens = ensure_nonempty_u32(line_lens.to_vec(), 0);
        // Skipped slots must come back unchanged, so the output starts as the caller's buffer.
        let words = match self.options.tail {
            TailPolicy::Pad => vec![SEGMENT_SENTINEL; segments.len() * SEGMENT_WORDS],
            TailPolicy::Skip => segments_to_words(segments),
        };

        let line_data_handle = client.create_from_slice(f32::as_bytes(&line_data));
        let line_orders_handle = client.create_from_slice(u32::as_bytes(&line_orders));
        let lens_handle = client.create_from_slice(u32::as_bytes(&lens));
        let segments_handle = client.create_from_slice(u32::as_bytes(&words));

        unsafe {
            let dim = CubeDim::new_1d(self.options.lanes_per_group.max(1));
            trace!("rasterize_kernel: {groups} x {} lanes, stride {stride}", dim.x);
            gpu::rasterize_kernel::launch_unchecked::<WgpuRuntime>(
                &client,
                CubeCount::new_1d(groups),
                dim,
                ArrayArg::from_raw_parts::<f32>(&line_data_handle, line_data.len(), 1),
                ArrayArg::from_raw_parts::<u32>(&line_orders_handle, line_orders.len(), 1),
                ArrayArg::from_raw_parts::<u32>(&lens_handle, lens.len(), 1),
                ScalarArg::new(config.lines_len),
                ScalarArg::new(config.segments_len),
                ScalarArg::new(slot_bound),
                ScalarArg::new(stride),
                ArrayArg::from_raw_parts::<u32>(&segments_handle, words.len(), 1),
            )
            .map_err(RasterError::Launch)?;
        }

        let bytes = client.read_one(segments_handle);
        write_segment_words(u32::from_bytes(&bytes), segments);
        Ok(())
    }

    /// Run `PrepareLines`, the segment count prefix sum and `Rasterize` on a polyline.
    pub fn rasterize_polyline(
        &self,
        points: &[Vec2],
        orders: &[u32],
    ) -> Result<Vec<PixelSegment>, RasterError> {
        let lines = self.prepare_lines(points, orders)?;
        let lens = line_lens(points, orders)?;
        let config = DispatchConfig {
            lines_len: lines.len() as u32,
            segments_len: lens.last().copied().unwrap_or(0),
        };
        let mut segments = vec![PixelSegment::SENTINEL; config.segments_len as usize];
        self.rasterize(config, &lines, &lens, &mut segments)?;
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_size_is_capped() {
        let rasterizer = Rasterizer::with_device(WgpuDevice::default()).with_options(RasterOptions {
            lanes_per_group: 64,
            groups_per_dispatch: 4,
            tail: TailPolicy::Pad,
        });
        assert_eq!(rasterizer.launch_size(1), (1, 64));
        assert_eq!(rasterizer.launch_size(130), (3, 192));
        assert_eq!(rasterizer.launch_size(100_000), (4, 256));
    }
}
