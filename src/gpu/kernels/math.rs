use cubecl::prelude::*;
use crate::gpu::constants::*;

#[cube]
pub(super) fn min_f32(a: f32, b: f32) -> f32 {
    if a < b { a } else { b }
}

#[cube]
pub(super) fn max_f32(a: f32, b: f32) -> f32 {
    if a > b { a } else { b }
}

#[cube]
pub(super) fn abs_f32(a: f32) -> f32 {
    let zero = f32::new(0.0);
    if a < zero { -a } else { a }
}

/// Fractional part `v - floor(v)`, in `[0, 1)` for negative inputs too.
#[cube]
pub(super) fn fract_f32(v: f32) -> f32 {
    v - v.floor()
}

/// True for `+inf` and `-inf`.
#[cube]
pub(super) fn is_inf_f32(v: f32) -> bool {
    abs_f32(v) > f32::new(F32_MAX)
}
