//! Ballpark Rendering Library
//!
//! This crate turns the application's clipping plane pool into live
//! clip-plane state and draws the park with wgpu.
//!
//! ## Key Components
//!
//! - [`clip_planes::ClipPlaneApi`] - Fixed-function style clip-plane register interface
//! - [`clip_planes::ClipPlaneRegisters`] - Register file backing the park shader
//! - [`coordinator::RenderCoordinator`] - Enables active planes around each draw
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::ParkPipeline`] - Lit, clipped park rendering plus overlay lines
//! - [`geometry::ParkGeometry`] - Procedural ballpark mesh

pub mod clip_planes;
pub mod coordinator;
pub mod context;
pub mod geometry;
pub mod pipeline;

pub use clip_planes::{plane_equation, ClipPlaneApi, ClipPlaneRegisters, MAX_CLIP_PLANES};
pub use coordinator::{ClipFrameStats, RenderCoordinator};
pub use context::{ContextError, RenderContext};
pub use geometry::{OverlayBatch, ParkGeometry};

// Re-export core types for convenience
pub use ballpark_core::{ClippingPlanePool, OverlaySink};
pub use ballpark_math::{Plane, Vec3};
