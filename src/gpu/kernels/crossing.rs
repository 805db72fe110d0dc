//! Merged-rank crossing search, see `crate::crossing` for the derivation.

use cubecl::prelude::*;
use super::{ff64::*, math::*};

#[cube]
fn find_crossing(
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    a_norm_hi: f32,
    a_norm_lo: f32,
    b_norm_hi: f32,
    b_norm_lo: f32,
    cd_norm_hi: f32,
    cd_norm_lo: f32,
    rank: i32,
) -> f32 {
    let zero = f32::new(0.0);
    let i = f32::cast_from(rank);
    let a_inf = is_inf_f32(a);
    let b_inf = is_inf_f32(b);
    // Zero-length lines cross nothing and keep the rank itself.
    let mut out = i;
    if !a_inf && !b_inf {
        let bi = ff_mul(b_norm_hi, b_norm_lo, i, zero);
        let ja_est = ff_sub(bi[0], bi[1], cd_norm_hi, cd_norm_lo);
        let ja = ff_ceil(ja_est[0], ja_est[1]);

        let ai = ff_mul(a_norm_hi, a_norm_lo, i, zero);
        let jb_est = ff_add(ai[0], ai[1], cd_norm_hi, cd_norm_lo);
        let jb = ff_ceil(jb_est[0], jb_est[1]);

        out = min_f32(a * ja + c, b * jb + d);
    } else if !b_inf {
        out = b * i + d;
    } else if !a_inf {
        out = a * i + c;
    }
    out
}

/// Parametric bounds `[t0, t1]` of the `local`-th of `count` pixel segments.
/// The first segment starts at `t = 0` and the last one ends at `t = 1`.
#[cube]
pub(super) fn crossing_bounds(
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    local: u32,
    count: u32,
) -> Line<f32> {
    let zero = f32::new(0.0);
    let one = f32::new(1.0);

    let mut a_norm_hi = zero;
    let mut a_norm_lo = zero;
    let mut b_norm_hi = zero;
    let mut b_norm_lo = zero;
    let mut cd_norm_hi = zero;
    let mut cd_norm_lo = zero;
    if !is_inf_f32(a) && !is_inf_f32(b) {
        let sum = ff_add(a, zero, b, zero);
        let a_norm = ff_div(a, zero, sum[0], sum[1]);
        let b_norm = ff_div(b, zero, sum[0], sum[1]);
        let cd = ff_sub(c, zero, d, zero);
        let cd_norm = ff_div(cd[0], cd[1], sum[0], sum[1]);
        a_norm_hi = a_norm[0];
        a_norm_lo = a_norm[1];
        b_norm_hi = b_norm[0];
        b_norm_lo = b_norm[1];
        cd_norm_hi = cd_norm[0];
        cd_norm_lo = cd_norm[1];
    }

    let mut i0 = i32::cast_from(local);
    if c != zero {
        i0 -= i32::new(1);
    }
    if d != zero {
        i0 -= i32::new(1);
    }

    let t0 = find_crossing(
        a, b, c, d, a_norm_hi, a_norm_lo, b_norm_hi, b_norm_lo, cd_norm_hi, cd_norm_lo, i0,
    );
    let t1 = find_crossing(
        a,
        b,
        c,
        d,
        a_norm_hi,
        a_norm_lo,
        b_norm_hi,
        b_norm_lo,
        cd_norm_hi,
        cd_norm_lo,
        i0 + i32::new(1),
    );

    let mut out = Line::empty(2usize);
    out[0] = max_f32(t0, zero);
    if local == u32::new(0) {
        out[0] = zero;
    }
    out[1] = min_f32(t1, one);
    if local + 1 >= count {
        out[1] = one;
    }
    out
}
