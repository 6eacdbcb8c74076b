//! Collision detection against polygon edges
//!
//! Everything in the game collides with asteroid outlines one edge at a time:
//! the player's hull edges with segment/segment tests, bullets with a swept
//! segment plus a circle test so fast shots cannot tunnel through thin edges.

use glam::Vec2;

use super::geometry::polygon_edges;
use super::pool::Pool;
use super::state::Bullet;

/// Below this the segments are treated as parallel
const PARALLEL_EPSILON: f32 = 1e-6;

/// Intersection point of two segments, if they cross
pub fn segment_intersection(a0: Vec2, a1: Vec2, b0: Vec2, b1: Vec2) -> Option<Vec2> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = da.perp_dot(db);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let offset = b0 - a0;
    let t = offset.perp_dot(db) / denom;
    let u = offset.perp_dot(da) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a0 + da * t)
    } else {
        None
    }
}

/// Closest point to `p` on the segment [a, b]
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < PARALLEL_EPSILON {
        return a; // Degenerate segment
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Does the circle touch the segment [p0, p1]?
pub fn segment_circle_intersects(center: Vec2, radius: f32, p0: Vec2, p1: Vec2) -> bool {
    closest_point_on_segment(center, p0, p1).distance_squared(center) <= radius * radius
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Unit normal of edge [p0, p1] pointing away from `center`
pub fn edge_outward_normal(p0: Vec2, p1: Vec2, center: Vec2) -> Vec2 {
    let normal = (p1 - p0).perp().normalize_or_zero();
    let midpoint = (p0 + p1) * 0.5;
    if normal.dot(midpoint - center) < 0.0 {
        -normal
    } else {
        normal
    }
}

/// Swept segment a bullet covered this frame, extended past its tip
pub fn bullet_sweep(bullet: &Bullet, tip_extension: f32) -> (Vec2, Vec2) {
    let heading = (bullet.position - bullet.prev_position).normalize_or_zero();
    let tip = bullet.position + heading * bullet.radius * tip_extension;
    (bullet.prev_position, tip)
}

/// Bullet vs one polygon edge
pub fn bullet_hits_edge(bullet: &Bullet, p0: Vec2, p1: Vec2, tip_extension: f32) -> bool {
    let (start, tip) = bullet_sweep(bullet, tip_extension);
    segment_intersection(p0, p1, start, tip).is_some()
        || segment_circle_intersects(bullet.position, bullet.radius, p0, p1)
}

/// Index of the first live bullet touching the edge.
///
/// Pool order decides ties, so which of several simultaneous hits wins is
/// not defined.
pub fn first_bullet_hit(
    bullets: &Pool<Bullet>,
    p0: Vec2,
    p1: Vec2,
    tip_extension: f32,
) -> Option<usize> {
    bullets
        .iter()
        .position(|bullet| bullet_hits_edge(bullet, p0, p1, tip_extension))
}

/// Does any edge of the hull (vertices relative to `origin`) cross [p0, p1]?
pub fn hull_hits_edge(vertices: &[Vec2], origin: Vec2, p0: Vec2, p1: Vec2) -> bool {
    polygon_edges(vertices, origin).any(|(v0, v1)| segment_intersection(p0, p1, v0, v1).is_some())
}
