mod crossing;
mod gpu;
mod line;
mod locate;
mod math;
mod precision;
mod raster;
mod segment;

pub use crossing::Crossings;
pub use line::{prepare_line, segment_count, Line, ORDER_NONE, SUBPIXELS_PER_PIXEL};
pub use locate::{local_index, locate_line};
pub use math::Vec2;
pub use precision::Ff64;
pub use raster::{
    line_lens, prepare_lines_cpu, rasterize_cpu, rasterize_polyline_cpu, DispatchConfig,
    RasterError, RasterOptions, Rasterizer, TailPolicy,
};
pub use segment::{pack_segment, PixelSegment};
