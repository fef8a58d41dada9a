//! Per-frame clip-plane programming
//!
//! Before the scene is drawn, every active pooled plane is loaded into a
//! clip-plane register, in pool order, until the API's register limit is
//! reached. After drawing, exactly those registers are disabled again, so no
//! clip state leaks into the next frame or into code that draws later.

use ballpark_core::ClippingPlanePool;
use crate::clip_planes::{plane_equation, ClipPlaneApi};

/// What the last frame did with the active planes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClipFrameStats {
    /// Active planes in the pool
    pub active: usize,
    /// Planes loaded into registers
    pub programmed: usize,
    /// Active planes left out because the API ran out of registers
    pub skipped: usize,
}

/// Brackets scene drawing with clip-plane enable and disable
#[derive(Debug, Default)]
pub struct RenderCoordinator {
    last_frame: ClipFrameStats,
}

/// Disables registers `0..enabled` when dropped
struct EnabledPlanes<'a, A: ClipPlaneApi + ?Sized> {
    api: &'a mut A,
    enabled: usize,
}

impl<A: ClipPlaneApi + ?Sized> Drop for EnabledPlanes<'_, A> {
    fn drop(&mut self) {
        for register in 0..self.enabled {
            self.api.disable_clip_plane(register);
        }
    }
}

impl RenderCoordinator {
    /// Create a coordinator
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics from the most recent frame
    pub fn last_frame(&self) -> ClipFrameStats {
        self.last_frame
    }

    /// Program the active planes, run `draw`, then disable what was enabled
    ///
    /// When more planes are active than `api` has registers, the earliest
    /// pool slots win. The disable step also runs when `draw` unwinds.
    pub fn render_frame<A, F, R>(&mut self, pool: &ClippingPlanePool, api: &mut A, draw: F) -> R
    where
        A: ClipPlaneApi + ?Sized,
        F: FnOnce(&mut A) -> R,
    {
        let max = api.max_clip_planes();
        let mut guard = EnabledPlanes { api, enabled: 0 };

        for (_, plane) in pool.active_planes().take(max) {
            let register = guard.enabled;
            guard.api.enable_clip_plane(register);
            guard.api.set_clip_plane(register, plane_equation(plane));
            guard.enabled += 1;
        }

        let active = pool.active_count();
        let stats = ClipFrameStats {
            active,
            programmed: guard.enabled,
            skipped: active - guard.enabled,
        };
        if stats.skipped != self.last_frame.skipped {
            log::debug!(
                "{} of {} active clipping planes exceed the {} available registers",
                stats.skipped,
                stats.active,
                max
            );
        }
        self.last_frame = stats;

        let output = draw(&mut *guard.api);
        drop(guard);
        output
    }
}
