//! Packed pixel coverage segments.
//!
//! A segment is two 32-bit words. From the most significant bit down:
//!
//! ```text
//! hi: | tile_row + 1 (13) | tile_col + 1 (12) | order[20..14] (7) |
//! lo: | order[13..0] (14) | local_col (4) | local_row (2) | area (6) | cover (6) |
//! ```
//!
//! Signed fields hold two's-complement bit patterns truncated to the field
//! width and are sign-extended on read. Values outside a field's range wrap
//! modulo its width. Buffers store each segment as `[lo, hi]`, so the packed
//! `u64` is `(hi << 32) | lo` and sorts by tile row, tile column, then order.

use core::fmt;

use crate::gpu::constants::*;
use crate::line::Line;

/// Bit-packed pixel coverage segment.
#[repr(transparent)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelSegment(u64);

fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

impl PixelSegment {
    /// Padding slot. Consumers stop at the first sentinel.
    pub const SENTINEL: Self = Self(u64::MAX);

    /// Pack a segment, checking field ranges in debug builds.
    pub fn new(
        order: u32,
        tile_row: i32,
        tile_col: i32,
        local_col: u32,
        local_row: u32,
        double_area_multiplier: u32,
        cover: i32,
    ) -> Self {
        debug_assert!(order < 1 << ORDER_BITS, "order {order} out of range");
        debug_assert!(
            (-(1 << (TILE_ROW_BITS - 1)) - 1..(1 << (TILE_ROW_BITS - 1)) - 1).contains(&tile_row),
            "tile_row {tile_row} out of range"
        );
        debug_assert!(
            (-(1 << (TILE_COL_BITS - 1)) - 1..(1 << (TILE_COL_BITS - 1)) - 1).contains(&tile_col),
            "tile_col {tile_col} out of range"
        );
        debug_assert!(local_col <= LOCAL_COL_MASK, "local_col {local_col} out of range");
        debug_assert!(local_row <= LOCAL_ROW_MASK, "local_row {local_row} out of range");
        debug_assert!(
            double_area_multiplier <= AREA_MASK,
            "double_area_multiplier {double_area_multiplier} out of range"
        );
        debug_assert!(
            (-(1 << (COVER_BITS - 1))..1 << (COVER_BITS - 1)).contains(&cover),
            "cover {cover} out of range"
        );
        Self::new_wrapping(
            order,
            tile_row,
            tile_col,
            local_col,
            local_row,
            double_area_multiplier,
            cover,
        )
    }

    /// Pack a segment, truncating every field to its width.
    pub fn new_wrapping(
        order: u32,
        tile_row: i32,
        tile_col: i32,
        local_col: u32,
        local_row: u32,
        double_area_multiplier: u32,
        cover: i32,
    ) -> Self {
        let hi = ((tile_row.wrapping_add(1) as u32 & TILE_ROW_MASK) << TILE_ROW_SHIFT)
            | ((tile_col.wrapping_add(1) as u32 & TILE_COL_MASK) << TILE_COL_SHIFT)
            | ((order >> ORDER_LO_BITS) & ORDER_HI_MASK);
        let lo = ((order & ORDER_LO_MASK) << ORDER_LO_SHIFT)
            | ((local_col & LOCAL_COL_MASK) << LOCAL_COL_SHIFT)
            | ((local_row & LOCAL_ROW_MASK) << LOCAL_ROW_SHIFT)
            | ((double_area_multiplier & AREA_MASK) << AREA_SHIFT)
            | (cover as u32 & COVER_MASK);
        Self::from_words(hi, lo)
    }

    pub const fn from_words(hi: u32, lo: u32) -> Self {
        Self(((hi as u64) << 32) | lo as u64)
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn hi(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub const fn lo(self) -> u32 {
        self.0 as u32
    }

    pub const fn is_sentinel(self) -> bool {
        self.0 == u64::MAX
    }

    pub fn tile_row(self) -> i32 {
        sign_extend((self.hi() >> TILE_ROW_SHIFT) & TILE_ROW_MASK, TILE_ROW_BITS) - 1
    }

    pub fn tile_col(self) -> i32 {
        sign_extend((self.hi() >> TILE_COL_SHIFT) & TILE_COL_MASK, TILE_COL_BITS) - 1
    }

    pub fn order(self) -> u32 {
        ((self.hi() & ORDER_HI_MASK) << ORDER_LO_BITS) | (self.lo() >> ORDER_LO_SHIFT)
    }

    pub fn local_col(self) -> u32 {
        (self.lo() >> LOCAL_COL_SHIFT) & LOCAL_COL_MASK
    }

    pub fn local_row(self) -> u32 {
        (self.lo() >> LOCAL_ROW_SHIFT) & LOCAL_ROW_MASK
    }

    pub fn double_area_multiplier(self) -> u32 {
        (self.lo() >> AREA_SHIFT) & AREA_MASK
    }

    pub fn cover(self) -> i32 {
        sign_extend(self.lo() & COVER_MASK, COVER_BITS)
    }

    /// Absolute pixel column of the segment.
    pub fn pixel_x(self) -> i32 {
        (self.tile_col() << TILE_WIDTH_SHIFT) + self.local_col() as i32
    }

    /// Absolute pixel row of the segment.
    pub fn pixel_y(self) -> i32 {
        (self.tile_row() << TILE_HEIGHT_SHIFT) + self.local_row() as i32
    }
}

impl Default for PixelSegment {
    fn default() -> Self {
        Self::SENTINEL
    }
}

impl fmt::Debug for PixelSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sentinel() {
            return f.write_str("PixelSegment::SENTINEL");
        }
        f.debug_struct("PixelSegment")
            .field("tile_row", &self.tile_row())
            .field("tile_col", &self.tile_col())
            .field("order", &self.order())
            .field("local_col", &self.local_col())
            .field("local_row", &self.local_row())
            .field("double_area_multiplier", &self.double_area_multiplier())
            .field("cover", &self.cover())
            .finish()
    }
}

/// Round to the nearest sub-pixel unit, ties toward negative infinity.
fn round_subpixel(value: f32) -> i32 {
    (value - 0.5).ceil() as i32
}

/// Pack the part of `line` between parameters `t0` and `t1`.
///
/// The interval must stay within a single pixel. Fields that do not fit
/// their width wrap, as they do in the GPU packer.
pub fn pack_segment(line: &Line, t0: f32, t1: f32) -> PixelSegment {
    let x0 = round_subpixel(t0 * line.dx + line.x0);
    let y0 = round_subpixel(t0 * line.dy + line.y0);
    let x1 = round_subpixel(t1 * line.dx + line.x0);
    let y1 = round_subpixel(t1 * line.dy + line.y0);

    let pixel_x = x0.min(x1) >> SUBPIXEL_SHIFT;
    let pixel_y = y0.min(y1) >> SUBPIXEL_SHIFT;

    let local_col = (pixel_x & ((1 << TILE_WIDTH_SHIFT) - 1)) as u32;
    let local_row = (pixel_y & ((1 << TILE_HEIGHT_SHIFT) - 1)) as u32;

    let right_edge = (pixel_x + 1) << SUBPIXEL_SHIFT;
    let double_area_multiplier = (x1 - x0).abs() + 2 * (right_edge - x0.max(x1));
    let cover = y1 - y0;

    PixelSegment::new_wrapping(
        line.order,
        pixel_y >> TILE_HEIGHT_SHIFT,
        pixel_x >> TILE_WIDTH_SHIFT,
        local_col,
        local_row,
        double_area_multiplier as u32,
        cover,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossing::Crossings;
    use crate::line::{prepare_line, segment_count};
    use crate::math::Vec2;

    #[test]
    fn fields_round_trip() {
        let segment = PixelSegment::new(1000, -2, 5, 3, 1, 40, -10);
        assert_eq!(segment.tile_row(), -2);
        assert_eq!(segment.tile_col(), 5);
        assert_eq!(segment.order(), 1000);
        assert_eq!(segment.local_col(), 3);
        assert_eq!(segment.local_row(), 1);
        assert_eq!(segment.double_area_multiplier(), 40);
        assert_eq!(segment.cover(), -10);
        assert!(!segment.is_sentinel());
    }

    #[test]
    fn cover_wraps_modulo_field_width() {
        let wrapped = |cover| PixelSegment::new_wrapping(0, 0, 0, 0, 0, 0, cover).cover();
        assert_eq!(wrapped(31), 31);
        assert_eq!(wrapped(-32), -32);
        assert_eq!(wrapped(32), -32);
        assert_eq!(wrapped(40), -24);
        assert_eq!(wrapped(-40), 24);
    }

    #[test]
    fn word_layout() {
        let segment = PixelSegment::new(1, 0, 0, 0, 0, 0, 0);
        assert_eq!(segment.hi(), 0x0008_0080);
        assert_eq!(segment.lo(), 0x0004_0000);

        // The seven high order bits live in the low bits of "hi".
        let segment = PixelSegment::new(0x1f_c000, -1, -1, 15, 3, 63, -1);
        assert_eq!(segment.hi(), 0x0000_007f);
        assert_eq!(segment.lo(), 0x0003_ffff);
        assert_eq!(segment.order(), 0x1f_c000);
    }

    #[test]
    fn extreme_fields() {
        let segment = PixelSegment::new((1 << 21) - 1, 4094, 2046, 15, 3, 63, 31);
        assert_eq!(segment.order(), (1 << 21) - 1);
        assert_eq!(segment.tile_row(), 4094);
        assert_eq!(segment.tile_col(), 2046);
        assert_eq!(segment.cover(), 31);
    }

    #[test]
    fn sentinel_is_all_ones() {
        let sentinel = PixelSegment::SENTINEL;
        assert_eq!(sentinel.hi(), 0xffff_ffff);
        assert_eq!(sentinel.lo(), 0xffff_ffff);
        assert!(sentinel.is_sentinel());
        assert!(PixelSegment::from_words(0xffff_ffff, 0xffff_ffff).is_sentinel());
        assert_eq!(format!("{sentinel:?}"), "PixelSegment::SENTINEL");
    }

    #[test]
    fn packed_order_sorts_by_tile() {
        let a = PixelSegment::new(9, 0, 3, 0, 0, 0, 0);
        let b = PixelSegment::new(1, 1, 0, 0, 0, 0, 0);
        let c = PixelSegment::new(2, 1, 0, 0, 0, 0, 0);
        let d = PixelSegment::new(0, -1, 7, 0, 0, 0, 0);
        let mut sorted = vec![c, a, b, d];
        sorted.sort();
        assert_eq!(sorted, [d, a, b, c]);
    }

    fn pack_line(p0: Vec2, p1: Vec2, order: u32) -> Vec<PixelSegment> {
        let line = prepare_line(p0, p1, order);
        let crossings = Crossings::new(&line);
        let count = segment_count(p0, p1, order);
        (0..count)
            .map(|i| {
                let (t0, t1) = crossings.bounds(i, count);
                pack_segment(&line, t0, t1)
            })
            .collect()
    }

    #[test]
    fn vertical_line_covers() {
        let segments = pack_line(Vec2::new(0.5, 0.5), Vec2::new(0.5, 2.5), 1);
        let covers: Vec<i32> = segments.iter().map(|s| s.cover()).collect();
        assert_eq!(covers, [8, 16, 8]);
        let rows: Vec<u32> = segments.iter().map(|s| s.local_row()).collect();
        assert_eq!(rows, [0, 1, 2]);
        for segment in &segments {
            assert_eq!(segment.local_col(), 0);
            assert_eq!(segment.double_area_multiplier(), 16);
            assert_eq!(segment.order(), 1);
        }
    }

    #[test]
    fn horizontal_line_areas() {
        let segments = pack_line(Vec2::new(0.5, 0.5), Vec2::new(2.5, 0.5), 1);
        let areas: Vec<u32> = segments.iter().map(|s| s.double_area_multiplier()).collect();
        assert_eq!(areas, [8, 16, 24]);
        let cols: Vec<u32> = segments.iter().map(|s| s.local_col()).collect();
        assert_eq!(cols, [0, 1, 2]);
        assert!(segments.iter().all(|s| s.cover() == 0));
    }

    #[test]
    fn oversized_order_wraps() {
        let segments = pack_line(Vec2::new(0.5, 0.5), Vec2::new(2.5, 0.5), (1 << 21) + 5);
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.order() == 5));
    }

    #[test]
    fn far_rows_wrap_tile_field() {
        let segments = pack_line(Vec2::new(0.5, 20000.5), Vec2::new(2.5, 20000.5), 1);
        let expected = PixelSegment::new_wrapping(1, 5000, 0, 0, 0, 8, 0);
        assert_eq!(segments[0], expected);
        assert_eq!(segments[0].tile_row(), 5000 - (1 << TILE_ROW_BITS));
        assert_eq!(segments[0].local_row(), 0);
    }

    /// Deterministic xorshift stream for line sweeps.
    struct XorShift(u64);

    impl XorShift {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn coord(&mut self, step: f32) -> f32 {
            (self.next() % 121) as f32 * step - 60.0 * step
        }
    }

    fn check_line(p0: Vec2, p1: Vec2) {
        let line = prepare_line(p0, p1, 0);
        let crossings = Crossings::new(&line);
        let count = segment_count(p0, p1, 0);
        let mut cover = 0;
        for i in 0..count {
            let (t0, t1) = crossings.bounds(i, count);
            if i == 0 {
                assert_eq!(t0, 0.0, "{p0:?} -> {p1:?}");
            }
            if i + 1 == count {
                assert_eq!(t1, 1.0, "{p0:?} -> {p1:?}");
            }
            let xs = [
                round_subpixel(t0 * line.dx + line.x0),
                round_subpixel(t1 * line.dx + line.x0),
            ];
            let ys = [
                round_subpixel(t0 * line.dy + line.y0),
                round_subpixel(t1 * line.dy + line.y0),
            ];
            let pixel_x = xs[0].min(xs[1]) >> SUBPIXEL_SHIFT;
            let pixel_y = ys[0].min(ys[1]) >> SUBPIXEL_SHIFT;
            assert!(xs[0].max(xs[1]) <= (pixel_x + 1) << SUBPIXEL_SHIFT, "{p0:?} -> {p1:?} #{i}");
            assert!(ys[0].max(ys[1]) <= (pixel_y + 1) << SUBPIXEL_SHIFT, "{p0:?} -> {p1:?} #{i}");
            cover += pack_segment(&line, t0, t1).cover();
        }
        let expected = round_subpixel(line.dy + line.y0) - round_subpixel(line.y0);
        assert_eq!(cover, expected, "{p0:?} -> {p1:?}");
    }

    #[test]
    fn snapped_lines_tile_their_pixels() {
        check_line(Vec2::new(6.75, 12.5), Vec2::new(2.75, 4.5));
        let mut rng = XorShift(0x9e37_79b9_7f4a_7c15);
        for step in [1.0, 0.5, 0.25, 0.125] {
            for _ in 0..500 {
                let p0 = Vec2::new(rng.coord(step), rng.coord(step));
                let p1 = Vec2::new(rng.coord(step), rng.coord(step));
                check_line(p0, p1);
            }
        }
    }

    #[test]
    fn unsnapped_lines_tile_their_pixels() {
        let mut rng = XorShift(0x2545_f491_4f6c_dd1d);
        for _ in 0..500 {
            let p0 = Vec2::new(rng.coord(0.37), rng.coord(0.29));
            let p1 = Vec2::new(rng.coord(0.41), rng.coord(0.23));
            check_line(p0, p1);
        }
    }

    #[test]
    fn negative_coordinates_use_floor_tiles() {
        let segments = pack_line(Vec2::new(-0.5, -0.5), Vec2::new(-0.5, 0.5), 2);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].tile_row(), -1);
        assert_eq!(segments[0].tile_col(), -1);
        assert_eq!(segments[0].local_col(), 15);
        assert_eq!(segments[0].local_row(), 3);
        assert_eq!(segments[0].pixel_x(), -1);
        assert_eq!(segments[0].pixel_y(), -1);
        assert_eq!(segments[1].tile_row(), 0);
        assert_eq!(segments[1].pixel_y(), 0);
        assert_eq!(segments[0].cover() + segments[1].cover(), 16);
    }
}
