//! GPU kernels for line preparation and pixel segment rasterization.

pub(crate) mod constants;
mod kernels;

pub(crate) use kernels::*;
