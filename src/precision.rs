//! Compensated ("double-double") arithmetic over `f32` pairs.
//!
//! Every primitive `f32` operation below goes through a guarded helper that
//! branches on the identity element of its second operand, so that relaxed
//! float optimizations cannot fold `x - 0` or `x * 1` together with the
//! compensation terms. The branches must stay. The CubeCL kernels in
//! `gpu::kernels::ff64` follow the exact same sequence.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// Dekker split factor for `f32`: `2^ceil(24 / 2) + 1`.
const SPLIT_FACTOR: f32 = 4097.0;

#[inline]
fn add_f32(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        a
    } else {
        a + b
    }
}

#[inline]
fn sub_f32(a: f32, b: f32) -> f32 {
    if b == 0.0 {
        a
    } else {
        a - b
    }
}

#[inline]
fn mul_f32(a: f32, b: f32) -> f32 {
    if b == 1.0 {
        a
    } else {
        a * b
    }
}

#[inline]
fn div_f32(a: f32, b: f32) -> f32 {
    if b == 1.0 {
        a
    } else {
        a / b
    }
}

/// `a + b` as an unevaluated sum `(s, e)` with `s = fl(a + b)`.
fn two_sum(a: f32, b: f32) -> (f32, f32) {
    let s = add_f32(a, b);
    let bb = sub_f32(s, a);
    let e = add_f32(sub_f32(a, sub_f32(s, bb)), sub_f32(b, bb));
    (s, e)
}

/// Like [`two_sum`] but requires `|a| >= |b|`.
fn quick_two_sum(a: f32, b: f32) -> (f32, f32) {
    let s = add_f32(a, b);
    let e = sub_f32(b, sub_f32(s, a));
    (s, e)
}

fn split(a: f32) -> (f32, f32) {
    let t = mul_f32(SPLIT_FACTOR, a);
    let hi = sub_f32(t, sub_f32(t, a));
    (hi, sub_f32(a, hi))
}

/// `a * b` as an unevaluated sum `(p, e)` with `p = fl(a * b)`.
fn two_prod(a: f32, b: f32) -> (f32, f32) {
    let p = mul_f32(a, b);
    let (a_hi, a_lo) = split(a);
    let (b_hi, b_lo) = split(b);
    let e = sub_f32(mul_f32(a_hi, b_hi), p);
    let e = add_f32(e, mul_f32(a_hi, b_lo));
    let e = add_f32(e, mul_f32(a_lo, b_hi));
    let e = add_f32(e, mul_f32(a_lo, b_lo));
    (p, e)
}

/// Extended-precision value `hi + lo`, where `lo` is the rounding error of `hi`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Ff64 {
    pub hi: f32,
    pub lo: f32,
}

impl Ff64 {
    pub const ZERO: Self = Self { hi: 0.0, lo: 0.0 };

    /// Construct from raw components. The caller keeps `|lo| <= ulp(hi)`.
    pub const fn new(hi: f32, lo: f32) -> Self {
        Self { hi, lo }
    }

    pub const fn from_f32(value: f32) -> Self {
        Self { hi: value, lo: 0.0 }
    }

    /// Round back to a single `f32`.
    pub fn to_f32(self) -> f32 {
        add_f32(self.hi, self.lo)
    }

    fn renormalize(hi: f32, lo: f32) -> Self {
        let (hi, lo) = quick_two_sum(hi, lo);
        Self { hi, lo }
    }

    /// Ceiling of `hi + lo`, as a native float.
    ///
    /// A non-integral `hi` already decides the result; an integral `hi` is
    /// carried by the ceiling of the correction term.
    pub fn ceil(self) -> f32 {
        let ceil_hi = self.hi.ceil();
        if ceil_hi == self.hi {
            add_f32(ceil_hi, self.lo.ceil())
        } else {
            ceil_hi
        }
    }
}

impl From<f32> for Ff64 {
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}

impl Add for Ff64 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let (s, e) = two_sum(self.hi, rhs.hi);
        let (t, f) = two_sum(self.lo, rhs.lo);
        let e = add_f32(e, t);
        let (s, e) = quick_two_sum(s, e);
        let e = add_f32(e, f);
        Self::renormalize(s, e)
    }
}

impl Sub for Ff64 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + -rhs
    }
}

impl Neg for Ff64 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            hi: -self.hi,
            lo: -self.lo,
        }
    }
}

impl Mul for Ff64 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let (p, e) = two_prod(self.hi, rhs.hi);
        let cross = add_f32(mul_f32(self.hi, rhs.lo), mul_f32(self.lo, rhs.hi));
        Self::renormalize(p, add_f32(e, cross))
    }
}

/// Long division with three quotient terms.
impl Div for Ff64 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        let q1 = div_f32(self.hi, rhs.hi);
        let r = self - rhs * Self::from_f32(q1);
        let q2 = div_f32(r.hi, rhs.hi);
        let r = r - rhs * Self::from_f32(q2);
        let q3 = div_f32(r.hi, rhs.hi);
        Self::renormalize(q1, q2) + Self::from_f32(q3)
    }
}
