//! Ordered pixel-grid crossings along a prepared line.
//!
//! A line crosses vertical grid lines at `t = a * j + c` and horizontal grid
//! lines at `t = b * k + d` (`j, k >= 0`). Output slots correspond to the
//! intervals between consecutive elements of the merged, ordered union of
//! both progressions. `Crossings::find` returns the element of a given rank
//! without materializing either sequence: both families estimate how many of
//! their own crossings precede the rank, the estimates are turned back into
//! crossing values, and the smaller candidate is the answer.
//!
//! The estimates subtract nearly equal products once the rank grows, so the
//! normalized coefficients are kept in [`Ff64`].

use crate::line::Line;
use crate::precision::Ff64;

/// Crossing solver for one line.
#[derive(Debug, Copy, Clone)]
pub struct Crossings {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    /// `a / (a + b)`
    a_norm: Ff64,
    /// `b / (a + b)`
    b_norm: Ff64,
    /// `(c - d) / (a + b)`
    cd_norm: Ff64,
}

impl Crossings {
    pub fn new(line: &Line) -> Self {
        let (a_norm, b_norm, cd_norm) = if line.a.is_infinite() || line.b.is_infinite() {
            (Ff64::ZERO, Ff64::ZERO, Ff64::ZERO)
        } else {
            let a = Ff64::from_f32(line.a);
            let b = Ff64::from_f32(line.b);
            let sum = a + b;
            let cd = Ff64::from_f32(line.c) - Ff64::from_f32(line.d);
            (a / sum, b / sum, cd / sum)
        };

        Self {
            a: line.a,
            b: line.b,
            c: line.c,
            d: line.d,
            a_norm,
            b_norm,
            cd_norm,
        }
    }

    /// Crossing of merged rank `rank`.
    ///
    /// Rank `-1` is the smallest crossing of the union (counting the
    /// coincident first elements of both families once), rank `0` the next
    /// one and so on. Lower ranks yield values at or below the first crossing.
    pub fn find(&self, rank: i32) -> f32 {
        let i = rank as f32;
        let a_inf = self.a.is_infinite();
        let b_inf = self.b.is_infinite();

        // Axis-aligned lines only ever cross one family of grid lines.
        if a_inf && b_inf {
            return i;
        }
        if a_inf {
            return self.b * i + self.d;
        }
        if b_inf {
            return self.a * i + self.c;
        }

        let i = Ff64::from_f32(i);
        let ja = (self.b_norm * i - self.cd_norm).ceil();
        let jb = (self.a_norm * i + self.cd_norm).ceil();

        let guess_a = self.a * ja + self.c;
        let guess_b = self.b * jb + self.d;
        guess_a.min(guess_b)
    }

    /// Parametric bounds `[t0, t1]` of the `local_index`-th of `count` pixel segments.
    ///
    /// The first segment starts at `t = 0` and the last one ends at `t = 1`.
    /// Those ranks can sit on a crossing that coincides with a line endpoint,
    /// where the rounded estimate may land on either side of it.
    pub fn bounds(&self, local_index: u32, count: u32) -> (f32, f32) {
        let i0 = local_index as i32 - (self.c != 0.0) as i32 - (self.d != 0.0) as i32;
        let t0 = if local_index == 0 {
            0.0
        } else {
            self.find(i0).max(0.0)
        };
        let t1 = if local_index + 1 >= count {
            1.0
        } else {
            self.find(i0 + 1).min(1.0)
        };
        (t0, t1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::{prepare_line, segment_count};
    use crate::math::Vec2;

    fn line(a: f32, b: f32, c: f32, d: f32) -> Line {
        Line {
            a,
            b,
            c,
            d,
            order: 0,
            ..Line::NONE
        }
    }

    fn brute_merge(line: &Line, terms: usize) -> Vec<f32> {
        let mut all: Vec<f32> = (0..terms)
            .map(|j| line.a * j as f32 + line.c)
            .chain((0..terms).map(|k| line.b * k as f32 + line.d))
            .collect();
        all.sort_by(|x, y| x.partial_cmp(y).unwrap());
        all
    }

    fn assert_matches_merge(line: Line, terms: i32) {
        let merged = brute_merge(&line, 2 * terms as usize);
        let crossings = Crossings::new(&line);
        for rank in -1..terms {
            assert_eq!(
                crossings.find(rank),
                merged[(rank + 1) as usize],
                "rank {rank} of {line:?}"
            );
        }
    }

    #[test]
    fn merges_integer_progressions() {
        let crossings = Crossings::new(&line(1.0, 2.0, 0.0, 0.0));
        let found: Vec<f32> = (0..10).map(|i| crossings.find(i)).collect();
        assert_eq!(found, [0.0, 1.0, 2.0, 2.0, 3.0, 4.0, 4.0, 5.0, 6.0, 6.0]);
        assert_matches_merge(line(1.0, 2.0, 0.0, 0.0), 40);
    }

    #[test]
    fn merges_offset_progressions() {
        assert_matches_merge(line(0.25, 0.375, 0.125, 0.0625), 100);
        assert_matches_merge(line(1.0, 3.0, 0.5, 0.0), 100);
    }

    #[test]
    fn low_ranks_stay_below_first_crossing() {
        let crossings = Crossings::new(&line(1.0, 2.0, 0.0, 0.0));
        assert!(crossings.find(-2) <= 0.0);
    }

    #[test]
    fn axis_aligned_lines_skip_estimation() {
        let crossings = Crossings::new(&line(f32::INFINITY, 0.5, 0.0, 0.25));
        assert_eq!(crossings.find(-1), -0.25);
        assert_eq!(crossings.find(0), 0.25);
        assert_eq!(crossings.find(3), 1.75);

        let crossings = Crossings::new(&line(0.5, f32::INFINITY, 0.25, 0.0));
        assert_eq!(crossings.find(2), 1.25);
    }

    #[test]
    fn bounds_tile_unit_interval() {
        let p0 = Vec2::new(0.5, 0.25);
        let p1 = Vec2::new(2.5, 1.25);
        let crossings = Crossings::new(&prepare_line(p0, p1, 0));
        let count = segment_count(p0, p1, 0);
        let bounds: Vec<(f32, f32)> =
            (0..count).map(|i| crossings.bounds(i, count)).collect();
        assert_eq!(bounds, [(0.0, 0.25), (0.25, 0.75), (0.75, 0.75), (0.75, 1.0)]);
    }

    #[test]
    fn bounds_of_vertical_line() {
        let crossings = Crossings::new(&prepare_line(Vec2::new(0.5, 0.5), Vec2::new(0.5, 2.5), 0));
        assert_eq!(crossings.bounds(0, 3), (0.0, 0.25));
        assert_eq!(crossings.bounds(1, 3), (0.25, 0.75));
        assert_eq!(crossings.bounds(2, 3), (0.75, 1.0));
    }

    #[test]
    fn bounds_of_point_line() {
        let p = Vec2::new(4.5, 1.5);
        let crossings = Crossings::new(&prepare_line(p, p, 0));
        assert_eq!(crossings.bounds(0, 1), (0.0, 1.0));
    }

    #[test]
    fn first_bounds_start_at_line_origin() {
        // x and y crossings coincide at every even x crossing here.
        let p0 = Vec2::new(6.75, 12.5);
        let p1 = Vec2::new(2.75, 4.5);
        let crossings = Crossings::new(&prepare_line(p0, p1, 0));
        let count = segment_count(p0, p1, 0);
        assert_eq!(count, 13);
        assert_eq!(crossings.find(-2), crossings.find(-1));
        assert_eq!(crossings.bounds(0, count), (0.0, 0.0625));
        assert_eq!(crossings.bounds(1, count).0, 0.0625);
    }

    #[test]
    fn last_bounds_end_at_line_end() {
        // The final x crossing lands on the end point and evaluates just below 1.
        let p0 = Vec2::new(-2.0, 16.0);
        let p1 = Vec2::new(-57.0, 42.0);
        let crossings = Crossings::new(&prepare_line(p0, p1, 0));
        let count = segment_count(p0, p1, 0);
        assert_eq!(count, 80);
        assert!(crossings.find(count as i32) < 1.0);
        assert_eq!(crossings.bounds(count - 1, count).1, 1.0);
    }
}
