use glam::Vec2;

use crate::boid::Boid;

pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    distance_sq(p1, p2).sqrt()
}

#[inline]
pub fn distance_sq(p1: Vec2, p2: Vec2) -> f32 {
    (p1.x - p2.x).powi(2) + (p1.y - p2.y).powi(2)
}

pub fn distance_boid(b1: &Boid, b2: &Boid) -> f32 {
    distance(b1.position, b2.position)
}

/// Wraps a coordinate into `[0, bound)`, preserving the overflow: a
/// point leaving one edge reappears the same distance past the
/// opposite edge.
#[inline]
pub fn wrap(value: f32, bound: f32) -> f32 {
    let wrapped = value.rem_euclid(bound);
    // rem_euclid can round up to the bound itself for tiny negative inputs
    if wrapped >= bound {
        wrapped - bound
    } else {
        wrapped
    }
}
