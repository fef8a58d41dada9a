//! 3D Mathematics Library
//!
//! This crate provides the small set of geometric types the Ballpark viewer
//! needs to track pointer devices and express clipping planes.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Rotor3`] - 3D rotation using geometric algebra
//! - [`RigidTransform`] - Rotation followed by translation (a tracked device pose)
//! - [`Plane`] - Oriented half-space described by a unit normal and an offset

mod vec3;
mod rotor3;
pub mod transform;
pub mod plane;

pub use vec3::Vec3;
pub use rotor3::{Rotor3, RotationPlane};
pub use transform::RigidTransform;
pub use plane::Plane;
