//! Application systems
//!
//! The window, the analysis state and the renderer, kept apart from the
//! event loop in main.rs.

mod analysis;
mod render;
mod window;

pub use analysis::{AnalysisStatus, AnalysisSystem};
pub use render::{view_axes, RenderError, RenderSystem};
pub use window::{compose_title, WindowError, WindowSystem};
