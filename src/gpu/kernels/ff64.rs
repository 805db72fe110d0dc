//! Compensated (`hi`, `lo`) arithmetic for kernels, returned as two-lane `Line`s.
//!
//! Mirrors `crate::precision` operation for operation. Each primitive is
//! guarded by a branch on the identity element of its second operand so that
//! relaxed float optimizations in the shader compiler cannot fold away the
//! compensation terms.

use cubecl::prelude::*;
use crate::gpu::constants::*;

#[cube]
fn add_guarded(a: f32, b: f32) -> f32 {
    if b == f32::new(0.0) { a } else { a + b }
}

#[cube]
fn sub_guarded(a: f32, b: f32) -> f32 {
    if b == f32::new(0.0) { a } else { a - b }
}

#[cube]
fn mul_guarded(a: f32, b: f32) -> f32 {
    if b == f32::new(1.0) { a } else { a * b }
}

#[cube]
fn div_guarded(a: f32, b: f32) -> f32 {
    if b == f32::new(1.0) { a } else { a / b }
}

#[cube]
fn pair(hi: f32, lo: f32) -> Line<f32> {
    let mut out = Line::empty(2usize);
    out[0] = hi;
    out[1] = lo;
    out
}

#[cube]
fn two_sum(a: f32, b: f32) -> Line<f32> {
    let s = add_guarded(a, b);
    let bb = sub_guarded(s, a);
    let e = add_guarded(sub_guarded(a, sub_guarded(s, bb)), sub_guarded(b, bb));
    pair(s, e)
}

#[cube]
fn quick_two_sum(a: f32, b: f32) -> Line<f32> {
    let s = add_guarded(a, b);
    let e = sub_guarded(b, sub_guarded(s, a));
    pair(s, e)
}

#[cube]
fn split(a: f32) -> Line<f32> {
    let t = mul_guarded(f32::new(SPLIT_FACTOR), a);
    let hi = sub_guarded(t, sub_guarded(t, a));
    pair(hi, sub_guarded(a, hi))
}

#[cube]
fn two_prod(a: f32, b: f32) -> Line<f32> {
    let p = mul_guarded(a, b);
    let sa = split(a);
    let sb = split(b);
    let mut e = sub_guarded(mul_guarded(sa[0], sb[0]), p);
    e = add_guarded(e, mul_guarded(sa[0], sb[1]));
    e = add_guarded(e, mul_guarded(sa[1], sb[0]));
    e = add_guarded(e, mul_guarded(sa[1], sb[1]));
    pair(p, e)
}

#[cube]
pub(super) fn ff_add(a_hi: f32, a_lo: f32, b_hi: f32, b_lo: f32) -> Line<f32> {
    let st = two_sum(a_hi, b_hi);
    let tf = two_sum(a_lo, b_lo);
    let e = add_guarded(st[1], tf[0]);
    let se = quick_two_sum(st[0], e);
    let e = add_guarded(se[1], tf[1]);
    quick_two_sum(se[0], e)
}

#[cube]
pub(super) fn ff_sub(a_hi: f32, a_lo: f32, b_hi: f32, b_lo: f32) -> Line<f32> {
    ff_add(a_hi, a_lo, -b_hi, -b_lo)
}

#[cube]
pub(super) fn ff_mul(a_hi: f32, a_lo: f32, b_hi: f32, b_lo: f32) -> Line<f32> {
    let pe = two_prod(a_hi, b_hi);
    let cross = add_guarded(mul_guarded(a_hi, b_lo), mul_guarded(a_lo, b_hi));
    quick_two_sum(pe[0], add_guarded(pe[1], cross))
}

#[cube]
pub(super) fn ff_div(a_hi: f32, a_lo: f32, b_hi: f32, b_lo: f32) -> Line<f32> {
    let zero = f32::new(0.0);
    let q1 = div_guarded(a_hi, b_hi);
    let p1 = ff_mul(b_hi, b_lo, q1, zero);
    let r1 = ff_sub(a_hi, a_lo, p1[0], p1[1]);
    let q2 = div_guarded(r1[0], b_hi);
    let p2 = ff_mul(b_hi, b_lo, q2, zero);
    let r2 = ff_sub(r1[0], r1[1], p2[0], p2[1]);
    let q3 = div_guarded(r2[0], b_hi);
    let q = quick_two_sum(q1, q2);
    ff_add(q[0], q[1], q3, zero)
}

/// Ceiling of `hi + lo` as a single float.
#[cube]
pub(super) fn ff_ceil(hi: f32, lo: f32) -> f32 {
    let ceil_hi = hi.ceil();
    if ceil_hi == hi { add_guarded(ceil_hi, lo.ceil()) } else { ceil_hi }
}
