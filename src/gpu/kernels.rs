//! CubeCL kernels and the device helpers they are built from.

mod crossing;
mod entrypoints;
mod ff64;
mod locate;
mod math;
mod pack;
mod prepare;
mod rasterize;

pub(crate) use entrypoints::*;
