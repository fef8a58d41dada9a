//! Interactive analysis state
//!
//! Owns the host tools, the clipping plane pool and the locators bound to the
//! tools. The desktop emulates a VR pointer: one tool at a time is "driven" by
//! the mouse and keyboard, and its events reach the router before each frame.

use std::collections::HashMap;
use ballpark_core::{
    AnalysisTool, AnalysisToolError, ClippingPlanePool, LocatorContext, RigidTransform,
    ToolCapabilities, ToolEvent, ToolKey, ToolLifecycleRouter, ToolManager, Vec3,
};
use ballpark_input::{PointerController, ToolDriver};
use ballpark_render::OverlayBatch;
use crate::config::{AnalysisConfig, ClippingConfig};

/// Length of the axis marker drawn at each tool
const MARKER_LENGTH: f32 = 1.5;
/// Half-size of the plane outline drawn at each tool
const PLANE_OUTLINE_SIZE: f32 = 6.0;
const OUTLINE_IDLE: [f32; 4] = [1.0, 1.0, 1.0, 0.35];
const OUTLINE_ACTIVE: [f32; 4] = [1.0, 0.85, 0.2, 0.8];

/// Snapshot of the analysis state for the title bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalysisStatus {
    pub mode: AnalysisTool,
    pub tool_count: usize,
    pub allocated: usize,
    pub active: usize,
    pub capacity: usize,
}

/// Tools, pool and locators
pub struct AnalysisSystem {
    tools: ToolManager,
    pool: ClippingPlanePool,
    router: ToolLifecycleRouter,
    mode: AnalysisTool,
    /// Mode in effect when each tool was created, until its event is routed
    creation_modes: HashMap<ToolKey, AnalysisTool>,
    current: Option<ToolKey>,
    start_pose: RigidTransform,
}

impl AnalysisSystem {
    /// Create the analysis state from config
    ///
    /// An unusable pool capacity or mode index is logged and replaced by the
    /// default.
    pub fn new(clipping: &ClippingConfig, analysis: &AnalysisConfig, start: Vec3) -> Self {
        let pool = ClippingPlanePool::new(clipping.pool_capacity).unwrap_or_else(|e| {
            log::warn!("{}; using {} planes", e, ballpark_core::DEFAULT_POOL_CAPACITY);
            ClippingPlanePool::default()
        });
        let mode = AnalysisTool::from_index(analysis.default_tool).unwrap_or_else(|e| {
            log::warn!("{}; using {}", e, AnalysisTool::default());
            AnalysisTool::default()
        });
        log::info!("Clipping plane pool: {} planes, mode {}", pool.capacity(), mode);

        Self {
            tools: ToolManager::new(),
            pool,
            router: ToolLifecycleRouter::new(),
            mode,
            creation_modes: HashMap::new(),
            current: None,
            start_pose: RigidTransform::from_translation(start),
        }
    }

    /// Create a pointer tool at the start pose and drive it
    ///
    /// The button of the previously driven tool is released.
    pub fn create_tool(&mut self) -> ToolKey {
        if let Some(previous) = self.current {
            self.tools.release(previous);
        }
        let tool = self
            .tools
            .create_tool(ToolCapabilities::LOCATOR, self.start_pose);
        self.creation_modes.insert(tool, self.mode);
        self.tools.move_tool(tool, self.start_pose);
        self.current = Some(tool);
        tool
    }

    /// Destroy the driven tool; the next remaining tool becomes current
    pub fn destroy_current(&mut self) -> bool {
        let Some(tool) = self.current.take() else {
            return false;
        };
        let destroyed = self.tools.destroy_tool(tool);
        self.current = self.tools.keys().next();
        destroyed
    }

    /// Drive the tool after the current one, wrapping around
    ///
    /// The button of the tool being left is released.
    pub fn cycle_tool(&mut self) -> Option<ToolKey> {
        let keys: Vec<ToolKey> = self.tools.keys().collect();
        if keys.is_empty() {
            self.current = None;
            return None;
        }
        let next = match self.current.and_then(|c| keys.iter().position(|&k| k == c)) {
            Some(i) => keys[(i + 1) % keys.len()],
            None => keys[0],
        };
        if let Some(previous) = self.current.filter(|&c| c != next) {
            self.tools.release(previous);
        }
        self.current = Some(next);
        Some(next)
    }

    /// Choose the analysis tool that newly created pointers get
    ///
    /// Existing locators keep their behaviour.
    pub fn select_mode(&mut self, index: i32) -> Result<AnalysisTool, AnalysisToolError> {
        let mode = AnalysisTool::from_index(index)?;
        if mode != self.mode {
            log::info!("Analysis tool: {}", mode);
        }
        self.mode = mode;
        Ok(mode)
    }

    /// Feed the pointer controller's state to the driven tool
    pub fn drive(&mut self, controller: &mut PointerController, dt: f32) {
        if let Some(tool) = self.current {
            let mut driver = ToolDriver::new(&mut self.tools, tool);
            controller.update(&mut driver, dt);
        }
    }

    /// Move the driven tool back to the start pose
    pub fn center_display(&mut self) {
        if let Some(tool) = self.current {
            self.tools.move_tool(tool, self.start_pose);
        }
    }

    /// Route every queued tool event to the locators
    ///
    /// Must run before the pool is read for a frame. A created tool gets the
    /// mode that was selected when it was created.
    pub fn process_events(&mut self) -> usize {
        if !self.tools.has_pending_events() {
            return 0;
        }
        let mut ctx = LocatorContext::new(&mut self.pool);
        let mut count = 0;
        for event in self.tools.drain_events() {
            let mode = match &event {
                ToolEvent::Created { tool, .. } => {
                    self.creation_modes.remove(tool).unwrap_or(self.mode)
                }
                _ => self.mode,
            };
            self.router.dispatch(&event, mode, &mut ctx);
            count += 1;
        }
        count
    }

    /// Tool markers, plane outlines and locator handles
    pub fn draw_overlays(&self, batch: &mut OverlayBatch) {
        for key in self.tools.keys() {
            let Some(tool) = self.tools.get(key).filter(|t| t.is_locator()) else {
                continue;
            };
            batch.axes(&tool.transform, MARKER_LENGTH);
            let color = if tool.pressed { OUTLINE_ACTIVE } else { OUTLINE_IDLE };
            batch.square(&tool.transform, PLANE_OUTLINE_SIZE, color);
        }
        self.router.draw_overlays(self.current, batch);
    }

    /// Destroy every locator and tool (application shutdown)
    pub fn shutdown(&mut self) {
        let keys: Vec<ToolKey> = self.tools.keys().collect();
        for key in keys {
            self.tools.destroy_tool(key);
        }
        self.process_events();
        // Anything left was bound outside the tool registry
        self.router.clear(&mut LocatorContext::new(&mut self.pool));
        self.current = None;
    }

    pub fn pool(&self) -> &ClippingPlanePool {
        &self.pool
    }

    pub fn current_tool(&self) -> Option<ToolKey> {
        self.current
    }

    pub fn locator_count(&self) -> usize {
        self.router.locator_count()
    }

    pub fn status(&self) -> AnalysisStatus {
        AnalysisStatus {
            mode: self.mode,
            tool_count: self.tools.tool_count(),
            allocated: self.pool.allocated_count(),
            active: self.pool.active_count(),
            capacity: self.pool.capacity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballpark_core::OverlaySink;
    use winit::event::{ElementState, MouseButton};

    fn system(capacity: usize) -> AnalysisSystem {
        let clipping = ClippingConfig {
            pool_capacity: capacity,
            hardware_limit: None,
        };
        AnalysisSystem::new(&clipping, &AnalysisConfig::default(), Vec3::new(0.0, 2.0, 0.0))
    }

    #[test]
    fn test_create_tool_allocates_after_events() {
        let mut analysis = system(6);
        analysis.create_tool();
        assert_eq!(analysis.pool().allocated_count(), 0);

        analysis.process_events();
        assert_eq!(analysis.pool().allocated_count(), 1);
        assert_eq!(analysis.locator_count(), 1);

        // Plane sits at the start height, facing up
        let slot = analysis.pool().slot(0).unwrap();
        assert!((slot.plane().offset - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_created_tool_keeps_mode_from_creation() {
        let mut analysis = system(6);
        let tool = analysis.create_tool();
        assert_eq!(analysis.creation_modes.get(&tool), Some(&AnalysisTool::ClippingPlane));

        assert_eq!(analysis.process_events(), 1);
        assert!(analysis.creation_modes.is_empty());
        assert_eq!(analysis.locator_count(), 1);
        assert_eq!(analysis.pool().allocated_count(), 1);
    }

    #[test]
    fn test_process_events_without_events() {
        let mut analysis = system(6);
        assert_eq!(analysis.process_events(), 0);
        analysis.create_tool();
        analysis.process_events();
        assert_eq!(analysis.process_events(), 0);
    }

    #[test]
    fn test_zero_capacity_falls_back_to_default() {
        let analysis = system(0);
        assert_eq!(analysis.pool().capacity(), ballpark_core::DEFAULT_POOL_CAPACITY);
    }

    #[test]
    fn test_invalid_default_mode_falls_back() {
        let analysis = AnalysisSystem::new(
            &ClippingConfig::default(),
            &AnalysisConfig { default_tool: 7 },
            Vec3::ZERO,
        );
        assert_eq!(analysis.status().mode, AnalysisTool::ClippingPlane);
    }

    #[test]
    fn test_select_mode() {
        let mut analysis = system(6);
        assert_eq!(analysis.select_mode(0), Ok(AnalysisTool::ClippingPlane));
        assert_eq!(analysis.select_mode(3), Err(AnalysisToolError::UnknownMode(3)));
        assert_eq!(analysis.status().mode, AnalysisTool::ClippingPlane);
    }

    #[test]
    fn test_destroy_current_returns_slot() {
        let mut analysis = system(2);
        let first = analysis.create_tool();
        analysis.create_tool();
        analysis.process_events();
        assert_eq!(analysis.pool().allocated_count(), 2);

        assert!(analysis.destroy_current());
        analysis.process_events();
        assert_eq!(analysis.pool().allocated_count(), 1);
        assert_eq!(analysis.current_tool(), Some(first));
    }

    #[test]
    fn test_destroy_without_tools() {
        let mut analysis = system(6);
        assert!(!analysis.destroy_current());
    }

    #[test]
    fn test_cycle_wraps_and_releases() {
        let mut analysis = system(6);
        let a = analysis.create_tool();
        let b = analysis.create_tool();
        analysis.process_events();

        let mut controller = PointerController::new();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        analysis.drive(&mut controller, 0.016);
        analysis.process_events();
        assert_eq!(analysis.pool().active_count(), 1);

        // Leaving b releases its button
        assert_eq!(analysis.cycle_tool(), Some(a));
        analysis.process_events();
        assert_eq!(analysis.pool().active_count(), 0);
        assert_eq!(analysis.cycle_tool(), Some(b));
    }

    #[test]
    fn test_drive_presses_current_tool() {
        let mut analysis = system(6);
        analysis.create_tool();
        analysis.process_events();

        let mut controller = PointerController::new();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        analysis.drive(&mut controller, 0.016);
        analysis.process_events();
        assert_eq!(analysis.status().active, 1);

        controller.process_mouse_button(MouseButton::Left, ElementState::Released);
        analysis.drive(&mut controller, 0.016);
        analysis.process_events();
        assert_eq!(analysis.status().active, 0);
    }

    #[test]
    fn test_center_display_resets_plane() {
        let mut analysis = system(6);
        let tool = analysis.create_tool();
        analysis.tools.move_tool(tool, RigidTransform::from_translation(Vec3::new(0.0, 9.0, 0.0)));
        analysis.process_events();
        assert!((analysis.pool().slot(0).unwrap().plane().offset - 9.0).abs() < 1e-5);

        analysis.center_display();
        analysis.process_events();
        assert!((analysis.pool().slot(0).unwrap().plane().offset - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_overlays_per_tool() {
        let mut analysis = system(6);
        analysis.create_tool();
        analysis.create_tool();
        analysis.process_events();

        let mut batch = OverlayBatch::new();
        analysis.draw_overlays(&mut batch);
        // Three axes and four outline edges per tool
        assert_eq!(batch.line_count(), 2 * (3 + 4));

        batch.clear();
        batch.line(Vec3::ZERO, Vec3::X, [1.0; 4]);
        assert_eq!(batch.line_count(), 1);
    }

    #[test]
    fn test_overlays_skip_non_locator_tools() {
        let mut analysis = system(6);
        analysis.create_tool();
        analysis
            .tools
            .create_tool(ToolCapabilities::NAVIGATION, RigidTransform::identity());
        analysis.process_events();
        assert_eq!(analysis.locator_count(), 1);

        let mut batch = OverlayBatch::new();
        analysis.draw_overlays(&mut batch);
        assert_eq!(batch.line_count(), 3 + 4);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let mut analysis = system(6);
        for _ in 0..4 {
            analysis.create_tool();
        }
        analysis.process_events();
        analysis.shutdown();

        let status = analysis.status();
        assert_eq!(status.tool_count, 0);
        assert_eq!(status.allocated, 0);
        assert_eq!(analysis.locator_count(), 0);
        assert_eq!(analysis.current_tool(), None);
    }

    #[test]
    fn test_status_counts() {
        let mut analysis = system(1);
        analysis.create_tool();
        analysis.create_tool();
        analysis.process_events();

        let status = analysis.status();
        assert_eq!(status.tool_count, 2);
        assert_eq!(status.allocated, 1);
        assert_eq!(status.capacity, 1);
        assert_eq!(analysis.locator_count(), 2);
    }
}
