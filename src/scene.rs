//! Scene definitions: orbiting mirror spheres and a point light

use crate::color::ColorAttr;
use crate::config::SphereConfig;
use crate::math::Vector3;

/// Radius of the small sphere drawn where the light is
pub const LIGHT_RADIUS: f32 = 0.2;

/// A reflective sphere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f32,
    pub center: Vector3,
    /// Added to the orbit angles so spheres don't move in lockstep
    pub phase: f32,
    pub color: ColorAttr,
}

impl Sphere {
    pub fn new(radius: f32, phase: f32, color: ColorAttr) -> Self {
        Self {
            radius,
            center: Vector3::zeros(),
            phase,
            color,
        }
    }

    /// Orbit position at frame `t`
    pub fn orbit(phase: f32, t: u64) -> Vector3 {
        let t = t as f64;
        let ph = phase as f64;
        Vector3::new(
            ((t / 30.0 + ph).cos() * 2.2) as f32,
            ((t / 25.0 + ph).sin() * 2.0) as f32,
            (-1.0 + (t / 50.0 + ph).sin() * 2.0) as f32,
        )
    }
}

impl From<&SphereConfig> for Sphere {
    fn from(cfg: &SphereConfig) -> Self {
        Sphere::new(cfg.radius, cfg.phase, cfg.color.iter().copied().collect())
    }
}

/// Light position at frame `t`
pub fn light_orbit(t: u64) -> Vector3 {
    let t = t as f64;
    Vector3::new(
        (t / 10.0).sin() as f32,
        (t / 33.0 + 6.0).sin() as f32,
        (-(t / 15.0).cos()) as f32,
    )
}

/// The spheres and the light
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub spheres: Vec<Sphere>,
    pub light: Vector3,
}

impl Default for Scene {
    fn default() -> Self {
        Self::three_spheres()
    }
}

impl Scene {
    /// Scene with the given spheres, positioned at frame 0
    pub fn new(spheres: Vec<Sphere>) -> Self {
        let mut scene = Self {
            spheres,
            light: Vector3::zeros(),
        };
        scene.update(0);
        scene
    }

    /// Red, green and blue spheres of different sizes
    pub fn three_spheres() -> Self {
        Self::new(vec![
            Sphere::new(0.8, 0.0, ColorAttr::BG_RED),
            Sphere::new(0.5, 10.0, ColorAttr::BG_GREEN),
            Sphere::new(1.5, 20.0, ColorAttr::BG_BLUE),
        ])
    }

    pub fn from_config(spheres: &[SphereConfig]) -> Self {
        Self::new(spheres.iter().map(Sphere::from).collect())
    }

    /// Move every sphere and the light to where they are at frame `t`.
    ///
    /// Positions depend only on `t`, never on the previous state.
    pub fn update(&mut self, t: u64) {
        for sphere in &mut self.spheres {
            sphere.center = Sphere::orbit(sphere.phase, t);
        }
        self.light = light_orbit(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorFlag;

    #[test]
    fn test_scene_creation() {
        let scene = Scene::three_spheres();
        assert_eq!(scene.spheres.len(), 3);
        assert_eq!(scene.spheres[2].radius, 1.5);
        assert_eq!(scene.spheres[1].color, ColorAttr::BG_GREEN);
    }

    #[test]
    fn test_new_scene_is_at_frame_zero() {
        let scene = Scene::three_spheres();
        let mut expected = scene.clone();
        expected.update(0);
        assert_eq!(scene, expected);
    }

    #[test]
    fn test_update_is_deterministic() {
        let mut a = Scene::three_spheres();
        let mut b = Scene::three_spheres();
        a.update(1234);
        b.update(1234);
        for (sa, sb) in a.spheres.iter().zip(&b.spheres) {
            assert_eq!(sa.center.x.to_bits(), sb.center.x.to_bits());
            assert_eq!(sa.center.y.to_bits(), sb.center.y.to_bits());
            assert_eq!(sa.center.z.to_bits(), sb.center.z.to_bits());
        }
        assert_eq!(a.light, b.light);
    }

    #[test]
    fn test_update_does_not_accumulate() {
        let mut stepped = Scene::three_spheres();
        for t in 1..=500 {
            stepped.update(t);
        }
        let mut jumped = Scene::three_spheres();
        jumped.update(500);
        assert_eq!(stepped, jumped);
    }

    #[test]
    fn test_phase_desynchronizes() {
        let mut scene = Scene::three_spheres();
        scene.update(42);
        assert_ne!(scene.spheres[0].center, scene.spheres[1].center);
    }

    #[test]
    fn test_orbit_formula() {
        let c = Sphere::orbit(0.0, 0);
        assert!((c.x - 2.2).abs() < 1e-6);
        assert!(c.y.abs() < 1e-6);
        assert!((c.z + 1.0).abs() < 1e-6);

        let l = light_orbit(0);
        assert!(l.x.abs() < 1e-6);
        assert!((l.y - 6.0f32.sin()).abs() < 1e-6);
        assert!((l.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_config() {
        let cfg = vec![SphereConfig {
            radius: 2.0,
            phase: 3.0,
            color: vec![ColorFlag::BackgroundRed, ColorFlag::BackgroundBlue],
        }];
        let scene = Scene::from_config(&cfg);
        assert_eq!(scene.spheres[0].radius, 2.0);
        assert_eq!(scene.spheres[0].color, ColorAttr::BG_RED | ColorAttr::BG_BLUE);
        assert_eq!(scene.spheres[0].center, Sphere::orbit(3.0, 0));
    }
}
