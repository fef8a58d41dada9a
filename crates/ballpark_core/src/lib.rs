//! Core types for the Ballpark viewer
//!
//! This crate owns the interactive analysis state that sits between the host
//! input framework and the renderer:
//!
//! - [`ClippingPlane`] - One pooled clipping plane (plane + allocated/active flags)
//! - [`ClippingPlanePool`] - Fixed-size pool of clipping planes
//! - [`SlotHandle`] - Exclusive ownership of one allocated pool slot
//! - [`ToolManager`] - Host-side registry of input tools, keyed by [`ToolKey`]
//! - [`ToolLocator`] - Adapter binding one pointer tool to an analysis behaviour
//! - [`ClippingPlaneLocator`] - Locator that drives a pooled clipping plane
//! - [`AnalysisTool`] - Mode selector choosing which locator new tools get
//! - [`ToolLifecycleRouter`] - Creates, feeds and destroys locators as tools come and go

mod clipping_plane;
mod tool;
mod locator;
mod analysis;
mod router;

pub use clipping_plane::{
    ClippingPlane, ClippingPlanePool, PoolError, SlotHandle, DEFAULT_POOL_CAPACITY,
};
pub use tool::{Tool, ToolCapabilities, ToolEvent, ToolKey, ToolManager};
pub use locator::{
    ClippingPlaneLocator, LocatorContext, LocatorState, OverlaySink, ToolLocator,
};
pub use analysis::{AnalysisTool, AnalysisToolError};
pub use router::ToolLifecycleRouter;

// Re-export commonly used types from ballpark_math for convenience
pub use ballpark_math::{Plane, RigidTransform, Rotor3, RotationPlane, Vec3};
