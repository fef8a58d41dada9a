//! Oriented plane (half-space boundary)
//!
//! A plane is stored as a unit normal and an offset along that normal:
//! every point `p` on the plane satisfies `normal · p == offset`.

use crate::Vec3;
use serde::{Serialize, Deserialize};

/// An oriented plane in 3D space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit normal pointing to the positive (kept) side
    pub normal: Vec3,
    /// Signed distance from the origin along the normal
    pub offset: f32,
}

impl Default for Plane {
    /// The XZ ground plane facing up
    fn default() -> Self {
        Self {
            normal: Vec3::Y,
            offset: 0.0,
        }
    }
}

impl Plane {
    /// Create a plane from a normal and offset
    ///
    /// The normal will be normalized automatically.
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self {
            normal: normal.normalized(),
            offset,
        }
    }

    /// Create a plane through `point` with the given `normal`
    ///
    /// The normal is stored as given and is expected to be unit length.
    /// Rigidly transformed unit axes already are, and re-normalizing them
    /// would perturb the stored value.
    pub fn from_normal_point(normal: Vec3, point: Vec3) -> Self {
        Self {
            normal,
            offset: normal.dot(point),
        }
    }

    /// Signed distance from a point to the plane
    ///
    /// Positive = on the normal side, negative = behind, zero = on the plane.
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }

    /// Whether `point` lies on the kept (non-negative) side
    pub fn contains(&self, point: Vec3) -> bool {
        self.signed_distance(point) >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_normal_point() {
        let plane = Plane::from_normal_point(Vec3::Y, Vec3::new(3.0, 2.0, -1.0));
        assert_eq!(plane.normal, Vec3::Y);
        assert_eq!(plane.offset, 2.0);
        assert_eq!(plane.signed_distance(Vec3::new(3.0, 2.0, -1.0)), 0.0);
    }

    #[test]
    fn test_new_normalizes() {
        let plane = Plane::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        assert_eq!(plane.normal, Vec3::Z);
    }

    #[test]
    fn test_signed_distance_and_contains() {
        let plane = Plane::from_normal_point(Vec3::X, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(plane.signed_distance(Vec3::new(4.0, 9.0, 9.0)), 3.0);
        assert!(plane.contains(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!plane.contains(Vec3::new(0.0, 0.0, 0.0)));
    }
}
