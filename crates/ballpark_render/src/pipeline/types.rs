//! GPU-compatible data types for the park pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use crate::clip_planes::MAX_CLIP_PLANES;

/// A world-space vertex with normal and color
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Surface normal for lighting (zero for lines)
    pub normal: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, normal, color }
    }
}

/// Per-frame scene uniforms
/// Layout: 96 bytes total (must match park.wgsl SceneUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: [[f32; 4]; 4],
    /// Light direction (normalized) (12 bytes)
    pub light_dir: [f32; 3],
    /// 1.0 to shade with the light, 0.0 for flat color
    pub lighting: f32,
    /// Lighting parameters (16 bytes)
    pub ambient_strength: f32,
    pub diffuse_strength: f32,
    pub _padding: [f32; 2],
}

impl Default for SceneUniforms {
    fn default() -> Self {
        Self {
            view_proj: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            light_dir: [0.5, 1.0, 0.3],
            lighting: 1.0,
            ambient_strength: 0.3,
            diffuse_strength: 0.7,
            _padding: [0.0; 2],
        }
    }
}

/// Enabled clip-plane equations, packed in register order
/// Layout: 144 bytes total (must match park.wgsl ClipPlanes)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ClipPlaneUniforms {
    /// Plane equations (a, b, c, d); only the first `count` are used
    pub planes: [[f32; 4]; MAX_CLIP_PLANES],
    /// Number of enabled planes
    pub count: u32,
    pub _padding: [u32; 3],
}
