//! Recursive mirror ray tracer
//!
//! Each ray finds the closest sphere, shades it with a single diffuse term and
//! bounces off it as a perfect mirror. The colors of everything seen along the
//! bounce chain are OR-ed together, while the glyph always comes from the
//! first surface hit.

use crate::color::ColorAttr;
use crate::intersect::intersect_sphere;
use crate::math::{normalized, reflect, MathError, Vector3};
use crate::scene::{Scene, Sphere, LIGHT_RADIUS};
use crate::{GRADIENT, MAX_DEPTH};

/// Brightness index above which an unreflected surface is drawn bright
const HIGHLIGHT_LEVEL: usize = 6;

/// Result of tracing one ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResult {
    Miss,
    Hit { glyph: char, color: ColorAttr },
}

impl HitResult {
    /// What a ray looking straight at the light sees
    pub const LIGHT: HitResult = HitResult::Hit {
        glyph: GRADIENT[GRADIENT.len() - 1],
        color: ColorAttr::BG_WHITE,
    };
}

/// Closest sphere in front of the ray and the distance to it
pub fn nearest_sphere<'a>(
    scene: &'a Scene,
    origin: &Vector3,
    dir: &Vector3,
) -> Option<(f32, &'a Sphere)> {
    scene
        .spheres
        .iter()
        .filter_map(|s| intersect_sphere(origin, dir, &s.center, s.radius).map(|t| (t, s)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
}

/// Map a diffuse intensity in `[0, 1]` to a gradient index
pub fn brightness_index(intensity: f32) -> usize {
    ((intensity * 16.0).floor() as i32).clamp(0, 16) as usize
}

/// Trace a unit-length ray at bounce `depth` (0 for camera rays)
pub fn trace_ray(
    scene: &Scene,
    origin: &Vector3,
    dir: &Vector3,
    depth: u32,
) -> Result<HitResult, MathError> {
    let nearest = nearest_sphere(scene, origin, dir);

    // The light bulb wins over anything behind it, at every depth
    if let Some(lt) = intersect_sphere(origin, dir, &scene.light, LIGHT_RADIUS) {
        if nearest.map_or(true, |(t, _)| lt < t) {
            return Ok(HitResult::LIGHT);
        }
    }

    let Some((t, sphere)) = nearest else {
        return Ok(HitResult::Miss);
    };

    let point = origin + dir * t;
    let normal = normalized(&(point - sphere.center))?;
    let to_light = normalized(&(scene.light - point))?;
    let diffuse = normal.dot(&to_light).max(0.0);
    let level = brightness_index(diffuse);
    let glyph = GRADIENT[level];

    if depth < MAX_DEPTH {
        let bounced = normalized(&reflect(dir, &normal))?;
        if let HitResult::Hit { color, .. } = trace_ray(scene, &point, &bounced, depth + 1)? {
            return Ok(HitResult::Hit {
                glyph,
                color: color | sphere.color,
            });
        }
    }

    let mut color = sphere.color;
    if level > HIGHLIGHT_LEVEL {
        color |= ColorAttr::BG_INTENSITY;
    }
    Ok(HitResult::Hit { glyph, color })
}
