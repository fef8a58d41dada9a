//! 3D Rotor for representing rotations in 3D space
//!
//! A 3D rotor has a scalar and three bivector components, one for each
//! rotation plane (XY, XZ, YZ). It is isomorphic to a unit quaternion, and the
//! sandwich product is evaluated through that equivalence.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// The 3 rotation planes in 3D space
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationPlane {
    /// XY plane (rotation around Z). Positive angles turn X toward Y.
    XY,
    /// XZ plane (rotation around Y). Positive angles turn X toward Z.
    XZ,
    /// YZ plane (rotation around X). Positive angles turn Y toward Z.
    YZ,
}

/// 3D Rotor for representing rotations
///
/// R = s + b_xy*e12 + b_xz*e13 + b_yz*e23
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rotor3 {
    /// Scalar component
    pub s: f32,
    /// Bivector component for XY plane (e12)
    pub b_xy: f32,
    /// Bivector component for XZ plane (e13)
    pub b_xz: f32,
    /// Bivector component for YZ plane (e23)
    pub b_yz: f32,
}

impl Default for Rotor3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rotor3 {
    /// Identity rotor (no rotation)
    pub const IDENTITY: Self = Self {
        s: 1.0,
        b_xy: 0.0,
        b_xz: 0.0,
        b_yz: 0.0,
    };

    /// Create a rotor for rotation in a single plane
    ///
    /// R = cos(θ/2) - sin(θ/2) * B, where B is the unit bivector of the plane.
    pub fn from_plane_angle(plane: RotationPlane, angle: f32) -> Self {
        let half = angle * 0.5;
        let mut r = Self::IDENTITY;
        r.s = half.cos();

        match plane {
            RotationPlane::XY => r.b_xy = -half.sin(),
            RotationPlane::XZ => r.b_xz = -half.sin(),
            RotationPlane::YZ => r.b_yz = -half.sin(),
        }

        r
    }

    /// Create a rotor turning `angle` radians counter-clockwise around `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let half = angle * 0.5;
        Self::from_quaternion(half.cos(), axis * half.sin())
    }

    /// Compute the squared magnitude of the rotor
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.s * self.s + self.b_xy * self.b_xy + self.b_xz * self.b_xz + self.b_yz * self.b_yz
    }

    /// Compute the magnitude of the rotor
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize the rotor to unit magnitude
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv_mag = 1.0 / mag;
            Self {
                s: self.s * inv_mag,
                b_xy: self.b_xy * inv_mag,
                b_xz: self.b_xz * inv_mag,
                b_yz: self.b_yz * inv_mag,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector using the sandwich product: v' = R * v * R†
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let (w, u) = self.to_quaternion();
        let t = u.cross(v) * 2.0;
        v + t * w + u.cross(t)
    }

    /// Compose two rotations: result = self * other
    ///
    /// The composed rotation applies `other` first, then `self`.
    pub fn compose(&self, other: &Self) -> Self {
        let (aw, av) = self.to_quaternion();
        let (bw, bv) = other.to_quaternion();
        let w = aw * bw - av.dot(bv);
        let v = bv * aw + av * bw + av.cross(bv);
        Self::from_quaternion(w, v)
    }

    // e23 is dual to X, e13 to -Y, e12 to Z; the rotor bivector carries -sin(θ/2).
    #[inline]
    fn to_quaternion(self) -> (f32, Vec3) {
        (self.s, Vec3::new(-self.b_yz, self.b_xz, -self.b_xy))
    }

    #[inline]
    fn from_quaternion(w: f32, v: Vec3) -> Self {
        Self {
            s: w,
            b_xy: -v.z,
            b_xz: v.y,
            b_yz: -v.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Rotor3::IDENTITY.rotate(v), v));
    }

    #[test]
    fn test_xy_rotation_90() {
        let r = Rotor3::from_plane_angle(RotationPlane::XY, PI / 2.0);
        let rotated = r.rotate(Vec3::X);
        assert!(vec_approx_eq(rotated, Vec3::Y), "Expected Y, got {:?}", rotated);

        let rotated = r.rotate(Vec3::Y);
        assert!(vec_approx_eq(rotated, -Vec3::X), "Expected -X, got {:?}", rotated);
    }

    #[test]
    fn test_xz_rotation_90() {
        let r = Rotor3::from_plane_angle(RotationPlane::XZ, PI / 2.0);
        let rotated = r.rotate(Vec3::X);
        assert!(vec_approx_eq(rotated, Vec3::Z), "Expected Z, got {:?}", rotated);
    }

    #[test]
    fn test_yz_rotation_90() {
        let r = Rotor3::from_plane_angle(RotationPlane::YZ, PI / 2.0);
        let rotated = r.rotate(Vec3::Y);
        assert!(vec_approx_eq(rotated, Vec3::Z), "Expected Z, got {:?}", rotated);
    }

    #[test]
    fn test_axis_angle_matches_plane_angle() {
        // Counter-clockwise around Z is the XY plane rotation
        let a = Rotor3::from_axis_angle(Vec3::Z, 0.7);
        let b = Rotor3::from_plane_angle(RotationPlane::XY, 0.7);
        let v = Vec3::new(0.3, -1.2, 2.0);
        assert!(vec_approx_eq(a.rotate(v), b.rotate(v)));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let r = Rotor3::from_axis_angle(Vec3::new(1.0, 1.0, 0.5), 1.23);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(approx_eq(v.length(), r.rotate(v).length()));
    }

    #[test]
    fn test_compose_order() {
        // Apply XY 90° first (X -> Y), then YZ 90° (Y -> Z)
        let first = Rotor3::from_plane_angle(RotationPlane::XY, PI / 2.0);
        let second = Rotor3::from_plane_angle(RotationPlane::YZ, PI / 2.0);
        let composed = second.compose(&first);
        let rotated = composed.rotate(Vec3::X);
        assert!(vec_approx_eq(rotated, Vec3::Z), "Expected Z, got {:?}", rotated);
    }

    #[test]
    fn test_normalize() {
        let mut r = Rotor3::from_plane_angle(RotationPlane::XZ, PI / 4.0);
        r.s *= 2.0;
        r.b_xz *= 2.0;
        assert!(approx_eq(r.normalize().magnitude(), 1.0));
    }
}
