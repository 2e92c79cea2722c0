//! Vector math used by the tracer
//!
//! The vector types are nalgebra's `f32` vectors: arithmetic, negation, `dot`
//! and `magnitude` come from there. The only thing added here is a
//! normalization that refuses zero-length input instead of producing NaNs.

use thiserror::Error;

pub type Vector2 = nalgebra::Vector2<f32>;
pub type Vector3 = nalgebra::Vector3<f32>;

/// Vectors shorter than this cannot be normalized
pub const MIN_NORM: f32 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
}

/// Unit vector pointing the same way as `v`
pub fn normalized(v: &Vector3) -> Result<Vector3, MathError> {
    v.try_normalize(MIN_NORM).ok_or(MathError::ZeroLength)
}

/// Mirror `dir` around the surface normal `n`
pub fn reflect(dir: &Vector3, n: &Vector3) -> Vector3 {
    *dir - *n * (2.0 * n.dot(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_unit_length() {
        let v = normalized(&Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((v.magnitude() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalized_zero_vector() {
        assert_eq!(normalized(&Vector3::zeros()), Err(MathError::ZeroLength));
    }

    #[test]
    fn test_normalized_does_not_mutate() {
        let v = Vector3::new(0.0, 2.0, 0.0);
        let _ = normalized(&v);
        assert_eq!(v, Vector3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_vector_ops() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(b / 2.0, Vector3::new(2.0, 2.5, 3.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert!((a.dot(&b) - 32.0).abs() < 1e-6);

        let uv = Vector2::new(0.5, 1.0) * 2.0 - Vector2::new(1.0, 1.0);
        assert_eq!(uv, Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_reflect() {
        let v = Vector3::new(1.0, -1.0, 0.0);
        let n = Vector3::new(0.0, 1.0, 0.0);
        let r = reflect(&v, &n);
        assert!((r.x - 1.0).abs() < 0.001);
        assert!((r.y - 1.0).abs() < 0.001);
    }
}
