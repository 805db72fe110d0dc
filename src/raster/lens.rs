//! Cumulative per-line segment counts.

use crate::line::segment_count;
use crate::math::Vec2;

use super::types::RasterError;
use super::utils::validate_points;

/// Inclusive running sum of [`segment_count`] over every line.
///
/// Entry `i` is the number of output slots produced by lines `0..=i`, the
/// layout `Rasterize` expects. Inactive lines repeat the previous entry.
pub fn line_lens(points: &[Vec2], orders: &[u32]) -> Result<Vec<u32>, RasterError> {
    validate_points(points.len(), orders.len())?;
    let mut total = 0u32;
    let mut lens = Vec::with_capacity(orders.len());
    for (k, &order) in orders.iter().enumerate() {
        total = total
            .checked_add(segment_count(points[k], points[k + 1], order))
            .ok_or(RasterError::InvalidInput("segment count overflow"))?;
        lens.push(total);
    }
    Ok(lens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::ORDER_NONE;

    #[test]
    fn running_sum_skips_inactive_lines() {
        let points = [
            Vec2::new(0.5, 0.5),
            Vec2::new(2.5, 0.5),
            Vec2::new(2.5, 2.5),
            Vec2::new(0.5, 0.5),
        ];
        let lens = line_lens(&points, &[0, ORDER_NONE, 0]).unwrap();
        assert_eq!(lens, [3, 3, 8]);
    }

    #[test]
    fn empty_input() {
        assert!(line_lens(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn rejects_mismatched_points() {
        let points = [Vec2::ZERO, Vec2::ZERO];
        assert!(line_lens(&points, &[0, 0]).is_err());
    }
}
