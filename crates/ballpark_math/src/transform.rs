//! Rigid transform (rotation + translation)
//!
//! This is the pose a tracked pointer device reports: an orientation and the
//! position of its origin in world space. There is no scale component.

use crate::{Rotor3, Vec3};
use serde::{Serialize, Deserialize};

/// A rigid transform: rotate, then translate
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Translation (the transformed origin)
    pub translation: Vec3,
    /// Orientation
    pub rotation: Rotor3,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Identity transform
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Rotor3::IDENTITY,
        }
    }

    /// Create a transform with just a translation
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Rotor3::IDENTITY,
        }
    }

    /// Create a transform from translation and rotation
    pub fn new(translation: Vec3, rotation: Rotor3) -> Self {
        Self { translation, rotation }
    }

    /// The world-space position of the local origin
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.translation
    }

    /// Transform a point from local space to world space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p) + self.translation
    }

    /// Transform a direction from local space to world space (no translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.rotation.rotate(d)
    }

    /// Translate by a world-space offset
    pub fn translate(&mut self, offset: Vec3) {
        self.translation += offset;
    }

    /// Rotate about the transform's own origin by a world-space rotor
    pub fn rotate(&mut self, rotor: Rotor3) {
        self.rotation = rotor.compose(&self.rotation).normalize();
    }
}
