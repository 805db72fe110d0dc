//! Per-line preparation: turns consecutive point pairs into `Line` records.

use crate::gpu::constants;
use crate::math::Vec2;

/// Order tag marking an inactive line slot.
pub const ORDER_NONE: u32 = constants::ORDER_NONE;

/// Sub-pixel units per pixel.
pub const SUBPIXELS_PER_PIXEL: u32 = 1 << constants::SUBPIXEL_SHIFT;

/// A prepared line, ready for crossing estimation and sub-pixel interpolation.
///
/// `a`/`b` are the parametric spacings between consecutive vertical/horizontal
/// pixel-grid crossings (`|1/dx|`, `|1/dy|`, infinite for an axis-aligned
/// line) and `c`/`d` the parameter of the first such crossing. `x0`, `y0`,
/// `dx`, `dy` are expressed in sub-pixel units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Line {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub x0: f32,
    pub y0: f32,
    pub dx: f32,
    pub dy: f32,
    pub order: u32,
}

impl Line {
    /// The record written for inactive slots. Every numeric field is zero.
    pub const NONE: Self = Self {
        a: 0.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        x0: 0.0,
        y0: 0.0,
        dx: 0.0,
        dy: 0.0,
        order: ORDER_NONE,
    };
}

impl Default for Line {
    fn default() -> Self {
        Self::NONE
    }
}

/// Parametric distance from `p0` to the first grid line in the direction of travel.
fn axis_offset(p0: f32, fract: f32, ceil: f32, recip: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    ((ceil - p0) * recip).max(-fract * recip)
}

/// Prepare the line running from `p0` to `p1`.
pub fn prepare_line(p0: Vec2, p1: Vec2, order: u32) -> Line {
    if order == ORDER_NONE {
        return Line::NONE;
    }

    let dp = p1 - p0;
    let dp_recip = dp.recip();
    let fract = p0.fract();
    let ceil = p0.ceil();
    let a = dp_recip.abs();
    let scale = SUBPIXELS_PER_PIXEL as f32;

    Line {
        a: a.x,
        b: a.y,
        c: axis_offset(p0.x, fract.x, ceil.x, dp_recip.x, dp.x),
        d: axis_offset(p0.y, fract.y, ceil.y, dp_recip.y, dp.y),
        x0: p0.x * scale,
        y0: p0.y * scale,
        dx: dp.x * scale,
        dy: dp.y * scale,
        order,
    }
}

/// Number of integer grid lines strictly between `a` and `b`, plus one.
fn span(a: f32, b: f32) -> u32 {
    (a.max(b).ceil() - a.min(b).floor()).max(1.0) as u32
}

/// Number of pixel segments the line from `p0` to `p1` produces.
///
/// Every grid line crossed strictly inside the line starts a new segment, so
/// endpoints lying exactly on the grid do not add an empty pixel. Inactive
/// lines produce none.
pub fn segment_count(p0: Vec2, p1: Vec2, order: u32) -> u32 {
    if order == ORDER_NONE {
        return 0;
    }
    span(p0.x, p1.x) + span(p0.y, p1.y) - 1
}
