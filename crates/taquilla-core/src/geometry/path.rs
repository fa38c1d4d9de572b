//! Polyline measurement, sampling and smoothing.
//!
//! Freehand paths arrive as dense point lists. They are simplified once when
//! attached to a curved text element, then measured and sampled by arc length
//! every time the text is laid out.

use super::Point;
use tiny_skia::{Path, PathBuilder};

/// A position on a polyline together with the direction of travel there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Interpolated point on the polyline.
    pub point: Point,
    /// Direction of the containing segment in radians (`atan2(dy, dx)`).
    pub angle: f32,
}

/// Drop points that sit within `tolerance` of the last kept point.
///
/// Greedy forward scan: the first point is always kept, each following point
/// is kept only if it is farther than `tolerance` from the previously kept
/// point, and the original last point is appended if the scan dropped it.
/// Inputs of two points or fewer are returned unchanged.
///
/// # Example
///
/// ```ignore
/// let pts = [(0,0), (1,0), (2,0), (100,0)];
/// simplify(&pts, 5.0) // => [(0,0), (100,0)]
/// ```
pub fn simplify(points: &[Point], tolerance: f32) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut simplified = vec![points[0]];
    let mut last_kept = points[0];

    for &point in &points[1..] {
        if point.distance_to(last_kept) > tolerance {
            simplified.push(point);
            last_kept = point;
        }
    }

    // Make sure the path still ends where the user lifted their finger
    if let Some(&last) = points.last() {
        if simplified.last() != Some(&last) {
            simplified.push(last);
        }
    }

    simplified
}

/// Total Euclidean length of a polyline (0 for fewer than two points).
pub fn arc_length(points: &[Point]) -> f32 {
    points
        .windows(2)
        .map(|segment| segment[0].distance_to(segment[1]))
        .sum()
}

/// Sample the polyline at arc length `distance` from its first point.
///
/// Walks the cumulative segment lengths; the first segment whose end reaches
/// `distance` is interpolated linearly and its direction is returned as the
/// tangent angle. Zero-length segments never match, so repeated points do not
/// produce NaN. Distances past the end (floating point overshoot) fall back to
/// the last point with the angle of the final segment.
///
/// Returns `None` only for paths with fewer than two points.
pub fn point_at_distance(points: &[Point], distance: f32) -> Option<PathSample> {
    if points.len() < 2 {
        return None;
    }

    let mut travelled = 0.0f32;

    for segment in points.windows(2) {
        let (start, end) = (segment[0], segment[1]);
        let dx = end.x - start.x;
        let dy = end.y - start.y;
        let length = (dx * dx + dy * dy).sqrt();

        if length > 0.0 && travelled + length >= distance {
            let t = ((distance - travelled) / length).clamp(0.0, 1.0);
            return Some(PathSample {
                point: Point::new(start.x + dx * t, start.y + dy * t),
                angle: dy.atan2(dx),
            });
        }

        travelled += length;
    }

    let last = points[points.len() - 1];
    let second_last = points[points.len() - 2];
    Some(PathSample {
        point: last,
        angle: (last.y - second_last.y).atan2(last.x - second_last.x),
    })
}

/// Build a smoothed, renderable curve through the polyline.
///
/// The first point is a move-to. Two points give a straight line. With three
/// or more, every intermediate point becomes the control point of a quadratic
/// segment ending at the midpoint between it and its successor, and the last
/// point is reached with a straight line.
///
/// Returns `None` when there is nothing to stroke (fewer than two points).
pub fn build_smooth_path(points: &[Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;

    let mut pb = PathBuilder::new();
    pb.move_to(first.x, first.y);

    for (i, current) in rest.iter().enumerate() {
        match rest.get(i + 1) {
            Some(next) if points.len() > 2 => {
                let mid_x = (current.x + next.x) / 2.0;
                let mid_y = (current.y + next.y) / 2.0;
                pb.quad_to(current.x, current.y, mid_x, mid_y);
            }
            _ => pb.line_to(current.x, current.y),
        }
    }

    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn pts(coords: &[(f32, f32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_simplify_drops_points_within_tolerance() {
        let input = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (100.0, 0.0)]);
        let result = simplify(&input, 5.0);
        assert_eq!(result, pts(&[(0.0, 0.0), (100.0, 0.0)]));
    }

    #[test]
    fn test_simplify_forces_last_point() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (12.0, 0.0)]);
        let result = simplify(&input, 5.0);
        assert_eq!(result, pts(&[(0.0, 0.0), (10.0, 0.0), (12.0, 0.0)]));
    }

    #[test]
    fn test_simplify_short_inputs_unchanged() {
        assert!(simplify(&[], 5.0).is_empty());

        let one = pts(&[(3.0, 4.0)]);
        assert_eq!(simplify(&one, 5.0), one);

        let two = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        assert_eq!(simplify(&two, 5.0), two);
    }

    #[test]
    fn test_simplify_zero_tolerance_drops_only_duplicates() {
        let input = pts(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let result = simplify(&input, 0.0);
        assert_eq!(result, pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
    }

    #[test]
    fn test_arc_length() {
        assert_eq!(arc_length(&[]), 0.0);
        assert_eq!(arc_length(&pts(&[(5.0, 5.0)])), 0.0);
        assert_eq!(arc_length(&pts(&[(0.0, 0.0), (100.0, 0.0)])), 100.0);
        assert_eq!(
            arc_length(&pts(&[(0.0, 0.0), (3.0, 4.0), (3.0, 14.0)])),
            15.0
        );
    }

    #[test]
    fn test_arc_length_ignores_duplicate_points() {
        let path = pts(&[(0.0, 0.0), (0.0, 0.0), (10.0, 0.0), (10.0, 0.0)]);
        assert_eq!(arc_length(&path), 10.0);
    }

    #[test]
    fn test_point_at_distance_interpolates() {
        let path = pts(&[(0.0, 0.0), (100.0, 0.0)]);
        let sample = point_at_distance(&path, 40.0).unwrap();
        assert_eq!(sample.point, Point::new(40.0, 0.0));
        assert_eq!(sample.angle, 0.0);
    }

    #[test]
    fn test_point_at_distance_second_segment_angle() {
        let path = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let sample = point_at_distance(&path, 15.0).unwrap();
        assert!((sample.point.x - 10.0).abs() < 1e-5);
        assert!((sample.point.y - 5.0).abs() < 1e-5);
        assert!((sample.angle - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_point_at_distance_overshoot_falls_back_to_last() {
        let path = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let sample = point_at_distance(&path, 25.0).unwrap();
        assert_eq!(sample.point, Point::new(10.0, 10.0));
        assert!((sample.angle - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_point_at_distance_skips_zero_length_segments() {
        let path = pts(&[(0.0, 0.0), (0.0, 0.0), (0.0, 0.0), (0.0, 20.0)]);
        let sample = point_at_distance(&path, 0.0).unwrap();
        assert!(sample.point.x.is_finite() && sample.point.y.is_finite());
        assert_eq!(sample.point, Point::new(0.0, 0.0));
        assert!((sample.angle - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_point_at_distance_requires_two_points() {
        assert!(point_at_distance(&[], 0.0).is_none());
        assert!(point_at_distance(&pts(&[(1.0, 1.0)]), 0.0).is_none());
    }

    #[test]
    fn test_build_smooth_path_variants() {
        assert!(build_smooth_path(&[]).is_none());
        assert!(build_smooth_path(&pts(&[(1.0, 1.0)])).is_none());

        let line = build_smooth_path(&pts(&[(0.0, 0.0), (50.0, 0.0)])).unwrap();
        assert_eq!(line.len(), 2);

        // move + quad + quad + final line
        let curve = build_smooth_path(&pts(&[
            (0.0, 0.0),
            (10.0, 10.0),
            (20.0, 0.0),
            (30.0, 10.0),
        ]))
        .unwrap();
        assert_eq!(curve.len(), 4);
        let bounds = curve.bounds();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.right(), 30.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-500.0f32..500.0, -500.0f32..500.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Polylines whose x coordinate strictly increases, so "further along the
    /// path" and "further right" coincide.
    fn monotonic_polyline_strategy() -> impl Strategy<Value = Vec<Point>> {
        prop::collection::vec((1.0f32..50.0, -50.0f32..50.0), 1..20).prop_map(|steps| {
            let mut x = 0.0;
            let mut points = vec![Point::new(0.0, 0.0)];
            for (dx, y) in steps {
                x += dx;
                points.push(Point::new(x, y));
            }
            points
        })
    }

    proptest! {
        /// Property: simplification keeps both endpoints.
        #[test]
        fn prop_simplify_preserves_endpoints(
            points in prop::collection::vec(point_strategy(), 1..60),
            tolerance in 0.0f32..100.0,
        ) {
            let result = simplify(&points, tolerance);

            prop_assert!(!result.is_empty());
            prop_assert_eq!(result.first(), points.first());
            prop_assert_eq!(result.last(), points.last());
        }

        /// Property: simplification never adds points.
        #[test]
        fn prop_simplify_never_grows(
            points in prop::collection::vec(point_strategy(), 0..60),
            tolerance in 0.0f32..100.0,
        ) {
            prop_assert!(simplify(&points, tolerance).len() <= points.len());
        }

        /// Property: samples are defined everywhere on the path and advance
        /// in the order of their distances.
        #[test]
        fn prop_samples_advance_along_path(
            points in monotonic_polyline_strategy(),
            a in 0.0f32..=1.0,
            b in 0.0f32..=1.0,
        ) {
            let length = arc_length(&points);
            let (d1, d2) = if a <= b { (a * length, b * length) } else { (b * length, a * length) };

            let s1 = point_at_distance(&points, d1);
            let s2 = point_at_distance(&points, d2);
            prop_assert!(s1.is_some() && s2.is_some());

            let (p1, p2) = (s1.unwrap().point, s2.unwrap().point);
            prop_assert!(p1.x <= p2.x + 1e-3, "{:?} should precede {:?}", p1, p2);
            // A chord is never longer than the arc it spans
            prop_assert!(p1.distance_to(p2) <= (d2 - d1) + 1e-2);
        }

        /// Property: sampled points lie between the path's bounding extremes.
        #[test]
        fn prop_samples_stay_in_bounds(
            points in prop::collection::vec(point_strategy(), 2..20),
            t in 0.0f32..=1.0,
        ) {
            let length = arc_length(&points);
            let sample = point_at_distance(&points, t * length).unwrap();

            let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
            let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
            let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
            let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

            prop_assert!(sample.point.x >= min_x - 1e-3 && sample.point.x <= max_x + 1e-3);
            prop_assert!(sample.point.y >= min_y - 1e-3 && sample.point.y <= max_y + 1e-3);
            prop_assert!(sample.angle.is_finite());
        }
    }
}
