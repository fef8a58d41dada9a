//! Host-side input tool registry
//!
//! Models the input-management layer of the display framework: tools are
//! created and destroyed at runtime, pointer tools report a rigid pose and a
//! single button. Every change is queued as a [`ToolEvent`] in arrival order so
//! the application can drain them before rendering the next frame.

use ballpark_math::RigidTransform;
use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Identity of a host input tool
    ///
    /// Generational, so a key kept after its tool was destroyed never
    /// matches a newer tool that reused the slot.
    pub struct ToolKey;
}

bitflags! {
    /// What a host tool can do
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ToolCapabilities: u8 {
        /// Reports a 6-DOF pose and button events (a locator tool)
        const LOCATOR = 1 << 0;
        /// Moves the navigation transform
        const NAVIGATION = 1 << 1;
        /// Drives menus and dialogs
        const WIDGET = 1 << 2;
    }
}

/// A notification from the host tool framework
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToolEvent {
    /// A tool was created
    Created {
        tool: ToolKey,
        capabilities: ToolCapabilities,
    },
    /// A tool was destroyed (it is no longer in the registry)
    Destroyed {
        tool: ToolKey,
        capabilities: ToolCapabilities,
    },
    /// A locator tool moved
    Motion {
        tool: ToolKey,
        transform: RigidTransform,
    },
    /// A locator tool's button went down
    ButtonPress { tool: ToolKey },
    /// A locator tool's button went up
    ButtonRelease { tool: ToolKey },
}

/// A live host tool
#[derive(Clone, Debug)]
pub struct Tool {
    /// What the tool can do
    pub capabilities: ToolCapabilities,
    /// Current pose in world space
    pub transform: RigidTransform,
    /// Whether the tool's button is held
    pub pressed: bool,
}

impl Tool {
    /// Whether this tool is a locator (pose + button)
    #[inline]
    pub fn is_locator(&self) -> bool {
        self.capabilities.contains(ToolCapabilities::LOCATOR)
    }
}

/// Registry of host tools and their pending events
#[derive(Default)]
pub struct ToolManager {
    tools: SlotMap<ToolKey, Tool>,
    events: Vec<ToolEvent>,
}

impl ToolManager {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool at `transform`
    pub fn create_tool(
        &mut self,
        capabilities: ToolCapabilities,
        transform: RigidTransform,
    ) -> ToolKey {
        let tool = self.tools.insert(Tool {
            capabilities,
            transform,
            pressed: false,
        });
        log::debug!("Created tool {:?} ({:?})", tool, capabilities);
        self.events.push(ToolEvent::Created { tool, capabilities });
        tool
    }

    /// Destroy a tool
    ///
    /// Returns false if the key does not name a live tool. No release event
    /// is emitted for a held button; destruction is the only notification.
    pub fn destroy_tool(&mut self, tool: ToolKey) -> bool {
        match self.tools.remove(tool) {
            Some(removed) => {
                log::debug!("Destroyed tool {:?}", tool);
                self.events.push(ToolEvent::Destroyed {
                    tool,
                    capabilities: removed.capabilities,
                });
                true
            }
            None => false,
        }
    }

    /// Move a tool to a new pose
    pub fn move_tool(&mut self, tool: ToolKey, transform: RigidTransform) -> bool {
        match self.tools.get_mut(tool) {
            Some(t) => {
                t.transform = transform;
                self.events.push(ToolEvent::Motion { tool, transform });
                true
            }
            None => false,
        }
    }

    /// Press a tool's button (ignored if already held)
    pub fn press(&mut self, tool: ToolKey) -> bool {
        match self.tools.get_mut(tool) {
            Some(t) if !t.pressed => {
                t.pressed = true;
                self.events.push(ToolEvent::ButtonPress { tool });
                true
            }
            _ => false,
        }
    }

    /// Release a tool's button (ignored if not held)
    pub fn release(&mut self, tool: ToolKey) -> bool {
        match self.tools.get_mut(tool) {
            Some(t) if t.pressed => {
                t.pressed = false;
                self.events.push(ToolEvent::ButtonRelease { tool });
                true
            }
            _ => false,
        }
    }

    /// Get a tool by key
    pub fn get(&self, tool: ToolKey) -> Option<&Tool> {
        self.tools.get(tool)
    }

    /// Number of live tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// Iterate over live tool keys
    pub fn keys(&self) -> impl Iterator<Item = ToolKey> + '_ {
        self.tools.keys()
    }

    /// Whether events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Take all queued events in arrival order
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, ToolEvent> {
        self.events.drain(..)
    }
}
