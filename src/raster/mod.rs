//! Host orchestration of line preparation and rasterization.

mod constants;
mod cpu;
mod lens;
mod rasterizer;
mod types;
mod utils;

pub use cpu::{prepare_lines_cpu, rasterize_cpu, rasterize_polyline_cpu};
pub use lens::line_lens;
pub use rasterizer::Rasterizer;
pub use types::{DispatchConfig, RasterError, RasterOptions, TailPolicy};
