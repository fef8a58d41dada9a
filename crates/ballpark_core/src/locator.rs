//! Tool locators
//!
//! A locator binds one host pointer tool to one analysis behaviour for the
//! tool's lifetime. The host delivers motion and button events; the locator
//! turns them into changes on shared application resources, reached through a
//! [`LocatorContext`] rather than stored references so that locators never
//! outlive or alias the resources they edit.

use ballpark_math::{Plane, RigidTransform, Vec3};
use crate::clipping_plane::{ClippingPlanePool, SlotHandle};
use crate::tool::ToolKey;

/// Shared resources a locator may edit while handling an event
pub struct LocatorContext<'a> {
    /// The application's clipping plane pool
    pub clipping_planes: &'a mut ClippingPlanePool,
}

impl<'a> LocatorContext<'a> {
    /// Create a context over the application's resources
    pub fn new(clipping_planes: &'a mut ClippingPlanePool) -> Self {
        Self { clipping_planes }
    }
}

/// Receiver for locator overlay geometry (handles, highlights)
pub trait OverlaySink {
    /// Draw a line segment in world space
    fn line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]);

    /// Draw a translucent line segment, blended after the opaque scene
    fn transparent_line(&mut self, from: Vec3, to: Vec3, color: [f32; 4]) {
        self.line(from, to, color);
    }
}

/// Behaviour bound to one host pointer tool
pub trait ToolLocator {
    /// The tool this locator is bound to
    fn tool(&self) -> ToolKey;

    /// Human readable variant name (for logs and the window title)
    fn name(&self) -> &'static str;

    /// The tool moved to `transform`
    fn motion(&mut self, transform: &RigidTransform, ctx: &mut LocatorContext<'_>);

    /// The tool's button went down
    fn button_press(&mut self, ctx: &mut LocatorContext<'_>);

    /// The tool's button went up
    fn button_release(&mut self, ctx: &mut LocatorContext<'_>);

    /// The tool is being destroyed; release every shared resource
    fn destroy(&mut self, ctx: &mut LocatorContext<'_>);

    /// Draw a highlight marking the locator as selected
    fn highlight(&self, _sink: &mut dyn OverlaySink) {}

    /// Draw opaque interaction handles
    fn draw(&self, _sink: &mut dyn OverlaySink) {}

    /// Draw translucent interaction handles
    fn draw_transparent(&self, _sink: &mut dyn OverlaySink) {}
}

/// Lifecycle state of a [`ClippingPlaneLocator`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocatorState {
    /// No slot was free at construction; the locator does nothing
    Unbound,
    /// Holds a slot
    Bound { active: bool },
    /// Destroyed; its slot went back to the pool
    Released,
}

/// Locator that positions a pooled clipping plane with the tool's pose
///
/// The plane passes through the tool's origin with the tool's local up axis
/// as its normal. Holding the button enforces the plane while rendering.
#[derive(Debug)]
pub struct ClippingPlaneLocator {
    tool: ToolKey,
    slot: Option<SlotHandle>,
    released: bool,
}

impl ClippingPlaneLocator {
    /// Bind `tool` to the first free clipping plane
    ///
    /// When the pool is exhausted the locator stays unbound and ignores
    /// every event.
    pub fn new(tool: ToolKey, ctx: &mut LocatorContext<'_>) -> Self {
        let slot = ctx.clipping_planes.allocate();
        match &slot {
            Some(handle) => log::debug!(
                "Clipping plane locator for {:?} bound to slot {}",
                tool,
                handle.index()
            ),
            None => log::debug!(
                "No free clipping plane for {:?} ({} in use), locator disabled",
                tool,
                ctx.clipping_planes.capacity()
            ),
        }
        Self {
            tool,
            slot,
            released: false,
        }
    }

    /// Index of the bound pool slot, if any
    pub fn slot_index(&self) -> Option<usize> {
        self.slot.as_ref().map(SlotHandle::index)
    }

    /// Current lifecycle state
    pub fn state(&self, pool: &ClippingPlanePool) -> LocatorState {
        match &self.slot {
            Some(handle) => LocatorState::Bound {
                active: pool.is_active(handle),
            },
            None if self.released => LocatorState::Released,
            None => LocatorState::Unbound,
        }
    }

    /// The plane a tool at `transform` describes
    pub fn plane_for(transform: &RigidTransform) -> Plane {
        let normal = transform.transform_direction(Vec3::Y);
        Plane::from_normal_point(normal, transform.origin())
    }
}

impl ToolLocator for ClippingPlaneLocator {
    fn tool(&self) -> ToolKey {
        self.tool
    }

    fn name(&self) -> &'static str {
        "Clipping Plane"
    }

    fn motion(&mut self, transform: &RigidTransform, ctx: &mut LocatorContext<'_>) {
        if let Some(handle) = &self.slot {
            ctx.clipping_planes.set_plane(handle, Self::plane_for(transform));
        }
    }

    fn button_press(&mut self, ctx: &mut LocatorContext<'_>) {
        if let Some(handle) = &self.slot {
            ctx.clipping_planes.set_active(handle, true);
        }
    }

    fn button_release(&mut self, ctx: &mut LocatorContext<'_>) {
        if let Some(handle) = &self.slot {
            ctx.clipping_planes.set_active(handle, false);
        }
    }

    fn destroy(&mut self, ctx: &mut LocatorContext<'_>) {
        if let Some(handle) = self.slot.take() {
            log::debug!("Releasing clipping plane slot {} from {:?}", handle.index(), self.tool);
            ctx.clipping_planes.set_active(&handle, false);
            ctx.clipping_planes.release(handle);
            self.released = true;
        }
    }
}

impl Drop for ClippingPlaneLocator {
    fn drop(&mut self) {
        if let Some(handle) = &self.slot {
            log::error!(
                "Clipping plane locator for {:?} dropped without destroy; slot {} leaked",
                self.tool,
                handle.index()
            );
        }
    }
}
