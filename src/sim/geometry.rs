//! Integration, toroidal wrapping and polygon rotation

use glam::Vec2;

/// Semi-implicit Euler step, no substeps
#[inline]
pub fn integrate(position: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
    position + velocity * dt
}

/// Wrap one coordinate once it is `margin` past either edge.
///
/// The entity re-enters `margin` outside the opposite edge, so it only
/// reappears once fully off-screen.
#[inline]
pub fn wrap_axis(value: f32, min: f32, max: f32, margin: f32) -> f32 {
    let period = (max - min) + 2.0 * margin;
    if value > max + margin {
        value - period
    } else if value < min - margin {
        value + period
    } else {
        value
    }
}

/// Toroidal wrap on both axes
#[inline]
pub fn wrap_position(position: Vec2, world_min: Vec2, world_max: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        wrap_axis(position.x, world_min.x, world_max.x, margin),
        wrap_axis(position.y, world_min.y, world_max.y, margin),
    )
}

/// Strict bounds test used to retire bullets
#[inline]
pub fn out_of_bounds(position: Vec2, world_min: Vec2, world_max: Vec2) -> bool {
    position.x < world_min.x
        || position.x > world_max.x
        || position.y < world_min.y
        || position.y > world_max.y
}

/// Rotate every vertex in place about the origin.
///
/// Rotation accumulates in the vertex data itself.
pub fn rotate_vertices(vertices: &mut [Vec2], angle: f32) {
    let rotation = Vec2::from_angle(angle);
    for v in vertices.iter_mut() {
        *v = rotation.rotate(*v);
    }
}

/// Iterate a closed polygon's edges as (start, end) pairs, offset by `origin`
pub fn polygon_edges(vertices: &[Vec2], origin: Vec2) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i] + origin, vertices[(i + 1) % n] + origin))
}
