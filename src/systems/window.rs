//! Window management system
//!
//! Handles window creation, cursor capture/release, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{CursorGrabMode, Fullscreen, Window},
};
use crate::config::WindowConfig;
use super::analysis::AnalysisStatus;

/// Manages the application window and cursor state
pub struct WindowSystem {
    window: Arc<Window>,
    cursor_captured: bool,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| WindowError::CreationFailed(e.to_string()))?;

        Ok(Self {
            window: Arc::new(window),
            cursor_captured: false,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Check if cursor is captured
    pub fn is_cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Grab the cursor so mouse motion drives the pointer tool
    pub fn capture_cursor(&mut self) -> bool {
        let grab = self
            .window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));

        match grab {
            Ok(()) => {
                self.window.set_cursor_visible(false);
                self.cursor_captured = true;
                log::info!("Cursor captured - Escape to release");
                true
            }
            Err(e) => {
                log::warn!("Failed to capture cursor: {}", e);
                false
            }
        }
    }

    /// Release cursor
    pub fn release_cursor(&mut self) {
        if let Err(e) = self.window.set_cursor_grab(CursorGrabMode::None) {
            log::debug!("Cursor ungrab failed: {}", e);
        }
        self.window.set_cursor_visible(true);
        self.cursor_captured = false;
        log::info!("Cursor released - click to capture");
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let fullscreen = match self.window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };
        self.window.set_fullscreen(fullscreen);
    }

    /// Show tool and clipping plane counts in the title bar
    pub fn update_title(&self, status: &AnalysisStatus) {
        let title = compose_title(&self.base_title, status, self.cursor_captured);
        self.window.set_title(&title);
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Build the title bar text
pub fn compose_title(base: &str, status: &AnalysisStatus, cursor_captured: bool) -> String {
    let hint = if cursor_captured {
        "[Esc to release]"
    } else {
        "[Click to capture]"
    };
    format!(
        "{} - {} | tools {} | planes {}/{} active {} {}",
        base,
        status.mode,
        status.tool_count,
        status.allocated,
        status.capacity,
        status.active,
        hint
    )
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;
    use ballpark_core::AnalysisTool;

    fn status() -> AnalysisStatus {
        AnalysisStatus {
            mode: AnalysisTool::ClippingPlane,
            tool_count: 3,
            allocated: 2,
            active: 1,
            capacity: 6,
        }
    }

    #[test]
    fn test_title_shows_counts_and_mode() {
        let title = compose_title("Ballpark", &status(), false);
        assert_eq!(
            title,
            "Ballpark - Clipping Plane | tools 3 | planes 2/6 active 1 [Click to capture]"
        );
    }

    #[test]
    fn test_title_capture_hint() {
        assert!(compose_title("B", &status(), true).ends_with("[Esc to release]"));
    }

    #[test]
    fn test_window_error_display() {
        let err = WindowError::CreationFailed("no display".to_string());
        assert_eq!(err.to_string(), "Window creation failed: no display");
    }
}
