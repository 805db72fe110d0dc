//! Host-side dispatch constants shared by the CPU and GPU paths.

use crate::gpu::constants as gpu_constants;

pub(crate) const LINE_STRIDE: usize = gpu_constants::LINE_STRIDE as usize;
pub(crate) const POINT_STRIDE: usize = gpu_constants::POINT_STRIDE as usize;
pub(crate) const SEGMENT_WORDS: usize = gpu_constants::SEGMENT_WORDS as usize;

pub(crate) const DEFAULT_LANES_PER_GROUP: u32 = 256;
pub(crate) const DEFAULT_GROUPS_PER_DISPATCH: u32 = 16;
