//! Rendering pipeline components
//!
//! One render pipeline draws the lit, clip-tested park; a second draws
//! overlay line segments (tool markers and highlights) on top.

pub mod types;
pub mod park_pipeline;

pub use types::{Vertex, SceneUniforms, ClipPlaneUniforms};
pub use park_pipeline::{ParkPipeline, perspective_matrix, look_at_matrix, mat4_mul};
