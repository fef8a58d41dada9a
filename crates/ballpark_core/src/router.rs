//! Tool lifecycle routing
//!
//! Turns host tool notifications into locator lifecycle: a locator is built
//! when a pointer tool appears, receives that tool's motion and button events,
//! and is destroyed (releasing its resources) when the tool goes away.

use ballpark_math::RigidTransform;
use crate::analysis::AnalysisTool;
use crate::locator::{LocatorContext, OverlaySink, ToolLocator};
use crate::tool::{ToolCapabilities, ToolEvent, ToolKey};

/// Owns the live locators, in creation order
#[derive(Default)]
pub struct ToolLifecycleRouter {
    locators: Vec<Box<dyn ToolLocator>>,
}

impl ToolLifecycleRouter {
    /// Create a router with no locators
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one host event
    pub fn dispatch(
        &mut self,
        event: &ToolEvent,
        mode: AnalysisTool,
        ctx: &mut LocatorContext<'_>,
    ) {
        match *event {
            ToolEvent::Created { tool, capabilities } => {
                self.on_tool_created(tool, capabilities, mode, ctx);
            }
            ToolEvent::Destroyed { tool, capabilities } => {
                self.on_tool_destroyed(tool, capabilities, ctx);
            }
            ToolEvent::Motion { tool, ref transform } => {
                self.on_motion(tool, transform, ctx);
            }
            ToolEvent::ButtonPress { tool } => {
                if let Some(locator) = self.find_mut(tool) {
                    locator.button_press(ctx);
                }
            }
            ToolEvent::ButtonRelease { tool } => {
                if let Some(locator) = self.find_mut(tool) {
                    locator.button_release(ctx);
                }
            }
        }
    }

    /// A host tool was created; bind a locator if it is a pointer tool
    pub fn on_tool_created(
        &mut self,
        tool: ToolKey,
        capabilities: ToolCapabilities,
        mode: AnalysisTool,
        ctx: &mut LocatorContext<'_>,
    ) {
        if !capabilities.contains(ToolCapabilities::LOCATOR) {
            return;
        }
        let locator = mode.create_locator(tool, ctx);
        log::info!("{} locator attached to {:?}", locator.name(), tool);
        self.locators.push(locator);
    }

    /// A host tool was destroyed; destroy its locator
    ///
    /// Returns false when no locator was bound to the tool.
    pub fn on_tool_destroyed(
        &mut self,
        tool: ToolKey,
        capabilities: ToolCapabilities,
        ctx: &mut LocatorContext<'_>,
    ) -> bool {
        if !capabilities.contains(ToolCapabilities::LOCATOR) {
            return false;
        }
        match self.locators.iter().position(|l| l.tool() == tool) {
            Some(index) => {
                let mut locator = self.locators.remove(index);
                locator.destroy(ctx);
                log::info!("{} locator detached from {:?}", locator.name(), tool);
                true
            }
            None => false,
        }
    }

    /// A pointer tool moved
    pub fn on_motion(
        &mut self,
        tool: ToolKey,
        transform: &RigidTransform,
        ctx: &mut LocatorContext<'_>,
    ) {
        if let Some(locator) = self.find_mut(tool) {
            locator.motion(transform, ctx);
        }
    }

    /// Let every locator draw its overlays
    ///
    /// The locator bound to `selected`, if any, is also highlighted.
    pub fn draw_overlays(&self, selected: Option<ToolKey>, sink: &mut dyn OverlaySink) {
        for locator in &self.locators {
            if Some(locator.tool()) == selected {
                locator.highlight(sink);
            }
            locator.draw(sink);
        }
        for locator in &self.locators {
            locator.draw_transparent(sink);
        }
    }

    /// Destroy every locator (application shutdown)
    pub fn clear(&mut self, ctx: &mut LocatorContext<'_>) {
        for mut locator in self.locators.drain(..) {
            locator.destroy(ctx);
        }
    }

    /// Number of live locators
    pub fn locator_count(&self) -> usize {
        self.locators.len()
    }

    /// Whether a locator is bound to `tool`
    pub fn has_locator(&self, tool: ToolKey) -> bool {
        self.locators.iter().any(|l| l.tool() == tool)
    }

    fn find_mut(&mut self, tool: ToolKey) -> Option<&mut Box<dyn ToolLocator>> {
        self.locators.iter_mut().find(|l| l.tool() == tool)
    }
}
