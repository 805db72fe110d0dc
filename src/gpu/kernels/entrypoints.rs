//! GPU kernel entrypoints.

pub(crate) use super::prepare::prepare_lines_kernel;
pub(crate) use super::rasterize::rasterize_kernel;
