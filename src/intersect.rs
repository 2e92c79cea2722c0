//! Ray/sphere intersection

use crate::math::Vector3;

/// Distance reported when a ray misses
pub const MISS: f32 = -1.0;

/// Distance along a unit-length ray to the near surface of a sphere.
///
/// Only the near root of the quadratic is considered. When it lies behind the
/// origin the result is [`MISS`], even if the far root is in front (a ray
/// starting inside the sphere never hits it). Tangent rays are misses.
pub fn sphere_distance(origin: &Vector3, dir: &Vector3, center: &Vector3, radius: f32) -> f32 {
    let p = center - origin;
    let b = -dir.dot(&p);
    let discriminant = b * b - p.dot(&p) + radius * radius;
    if discriminant <= 0.0 {
        return MISS;
    }

    let t = -discriminant.sqrt() - b;
    if t > 0.0 {
        t
    } else {
        MISS
    }
}

/// [`sphere_distance`] with the miss sentinel folded into `None`
pub fn intersect_sphere(
    origin: &Vector3,
    dir: &Vector3,
    center: &Vector3,
    radius: f32,
) -> Option<f32> {
    let t = sphere_distance(origin, dir, center, radius);
    (t > 0.0).then_some(t)
}
