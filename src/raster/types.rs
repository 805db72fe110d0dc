//! Public dispatch configuration, options and error types.

use cubecl::prelude::LaunchError;
use thiserror::Error;

use super::constants::{DEFAULT_GROUPS_PER_DISPATCH, DEFAULT_LANES_PER_GROUP};

/// Counts shared by both kernels for one dispatch.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Number of valid lines.
    pub lines_len: u32,
    /// Number of valid output segments.
    pub segments_len: u32,
}

/// What `Rasterize` does with output slots past `segments_len`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum TailPolicy {
    /// Iterate up to the output capacity and write the sentinel into every
    /// slot at or past `segments_len`.
    #[default]
    Pad,
    /// Stop at `segments_len` and leave the remaining slots untouched.
    Skip,
}

/// Dispatch sizing for both kernels.
#[derive(Debug, Copy, Clone)]
pub struct RasterOptions {
    /// Lanes per cube (workgroup). Zero is treated as one.
    pub lanes_per_group: u32,
    /// Cubes per dispatch. Zero is treated as one.
    pub groups_per_dispatch: u32,
    /// Handling of over-provisioned output slots.
    pub tail: TailPolicy,
}

impl RasterOptions {
    /// Total number of parallel lanes, i.e. the grid-stride step.
    pub fn stride(&self) -> u32 {
        self.lanes_per_group
            .max(1)
            .saturating_mul(self.groups_per_dispatch.max(1))
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            lanes_per_group: DEFAULT_LANES_PER_GROUP,
            groups_per_dispatch: DEFAULT_GROUPS_PER_DISPATCH,
            tail: TailPolicy::Pad,
        }
    }
}

/// Host-side error conditions. Kernels themselves never fail.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Buffers are inconsistent with the dispatch configuration.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// GPU kernel launch failed.
    #[error("kernel launch failed: {0:?}")]
    Launch(LaunchError),
}
