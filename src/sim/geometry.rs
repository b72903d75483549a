//! Exact segment/circle geometry for the drill trace
//!
//! The drill moves in straight steps, so each tick is a segment test against
//! the orebody circle. Only boundary crossings count: a segment that stays
//! inside the circle never reports a hit.

use glam::DVec2;

/// First contact of a segment with a circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Segment parameter in `[0, 1]` (0 = start, 1 = end)
    pub t: f64,
    /// Contact point
    pub point: DVec2,
}

/// Intersect segment `a -> b` with a circle.
///
/// Solves `|a + t(b - a) - center|² = radius²` and returns the smallest root
/// in `[0, 1]`, which is the entry point when the segment passes through.
/// A zero-length segment never hits.
pub fn segment_circle_intersection(
    a: DVec2,
    b: DVec2,
    center: DVec2,
    radius: f64,
) -> Option<SegmentHit> {
    let d = b - a;
    let f = a - center;

    let qa = d.length_squared();
    if qa == 0.0 {
        return None;
    }
    let qb = 2.0 * f.dot(d);
    let qc = f.length_squared() - radius * radius;

    let disc = qb * qb - 4.0 * qa * qc;
    if disc < 0.0 {
        return None;
    }

    let disc_sqrt = disc.sqrt();
    let t1 = (-qb - disc_sqrt) / (2.0 * qa);
    let t2 = (-qb + disc_sqrt) / (2.0 * qa);

    [t1, t2]
        .into_iter()
        .find(|t| (0.0..=1.0).contains(t))
        .map(|t| SegmentHit { t, point: a + d * t })
}

/// How far a missed ray passed from the target center.
///
/// Measured vertically at the target's x; a vertical ray is measured
/// horizontally instead.
pub fn miss_delta(origin: DVec2, angle_deg: f64, target_center: DVec2) -> f64 {
    if (angle_deg + 90.0).abs() < 0.001 {
        return (target_center.x - origin.x).abs();
    }
    let y_at_target = origin.y + angle_deg.to_radians().tan() * (target_center.x - origin.x);
    (y_at_target - target_center.y).abs()
}

/// Lateral error a one degree aiming mistake produces at `depth`
#[inline]
pub fn one_degree_offset(depth: f64) -> f64 {
    1.0_f64.to_radians().tan() * depth.abs()
}
