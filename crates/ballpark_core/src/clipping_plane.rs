//! Pooled clipping planes
//!
//! The application owns a fixed number of clipping planes for its whole
//! lifetime. Interactive tools borrow one slot at a time through a
//! [`SlotHandle`]; ownership is the slot's `allocated` flag plus the handle,
//! which cannot be cloned, so a slot is never claimed by two owners.

use ballpark_math::Plane;

/// Pool size used when no capacity is configured
pub const DEFAULT_POOL_CAPACITY: usize = 6;

/// Exclusive claim on one allocated slot of a [`ClippingPlanePool`]
///
/// Handles are only produced by [`ClippingPlanePool::allocate`] and are
/// consumed by [`ClippingPlanePool::release`].
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SlotHandle(usize);

impl SlotHandle {
    /// Get the raw pool index of this handle
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One pool slot: a plane equation plus ownership and activation flags
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClippingPlane {
    plane: Plane,
    allocated: bool,
    active: bool,
}

impl ClippingPlane {
    /// The current plane equation
    #[inline]
    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Whether a locator currently owns this slot
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    /// Whether the plane should be enforced while rendering
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Fixed-capacity pool of clipping planes
#[derive(Debug)]
pub struct ClippingPlanePool {
    planes: Box<[ClippingPlane]>,
}

impl Default for ClippingPlanePool {
    fn default() -> Self {
        Self {
            planes: vec![ClippingPlane::default(); DEFAULT_POOL_CAPACITY].into_boxed_slice(),
        }
    }
}

impl ClippingPlanePool {
    /// Create a pool with `capacity` free slots
    pub fn new(capacity: usize) -> Result<Self, PoolError> {
        if capacity == 0 {
            return Err(PoolError::ZeroCapacity);
        }
        Ok(Self {
            planes: vec![ClippingPlane::default(); capacity].into_boxed_slice(),
        })
    }

    /// Number of slots (fixed for the pool's lifetime)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.planes.len()
    }

    /// Number of slots currently owned by a locator
    pub fn allocated_count(&self) -> usize {
        self.planes.iter().filter(|p| p.allocated).count()
    }

    /// Number of slots currently active
    pub fn active_count(&self) -> usize {
        self.planes.iter().filter(|p| p.active).count()
    }

    /// Claim the lowest-indexed free slot
    ///
    /// The slot starts inactive. Returns `None` without touching any slot
    /// when every slot is already allocated.
    pub fn allocate(&mut self) -> Option<SlotHandle> {
        let index = self.planes.iter().position(|p| !p.allocated)?;
        let slot = &mut self.planes[index];
        slot.active = false;
        slot.allocated = true;
        Some(SlotHandle(index))
    }

    /// Return a slot to the pool, clearing its active flag
    pub fn release(&mut self, handle: SlotHandle) {
        let slot = self.owned_slot_mut(&handle);
        slot.active = false;
        slot.allocated = false;
    }

    /// Replace the plane equation of an owned slot
    pub fn set_plane(&mut self, handle: &SlotHandle, plane: Plane) {
        self.owned_slot_mut(handle).plane = plane;
    }

    /// Enable or disable an owned slot for rendering
    pub fn set_active(&mut self, handle: &SlotHandle, active: bool) {
        self.owned_slot_mut(handle).active = active;
    }

    /// Plane equation of an owned slot
    pub fn plane(&self, handle: &SlotHandle) -> &Plane {
        &self.planes[handle.0].plane
    }

    /// Activation state of an owned slot
    pub fn is_active(&self, handle: &SlotHandle) -> bool {
        self.planes[handle.0].active
    }

    /// Inspect a slot by index
    pub fn slot(&self, index: usize) -> Option<&ClippingPlane> {
        self.planes.get(index)
    }

    /// Iterate over all slots in pool order
    pub fn iter(&self) -> impl Iterator<Item = &ClippingPlane> {
        self.planes.iter()
    }

    /// Iterate over `(index, plane)` for every active slot, in pool order
    pub fn active_planes(&self) -> impl Iterator<Item = (usize, &Plane)> {
        self.planes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.active)
            .map(|(i, p)| (i, &p.plane))
    }

    fn owned_slot_mut(&mut self, handle: &SlotHandle) -> &mut ClippingPlane {
        let slot = &mut self.planes[handle.0];
        debug_assert!(
            slot.allocated,
            "clipping plane slot {} used without being allocated",
            handle.0
        );
        slot
    }
}

/// Error constructing a [`ClippingPlanePool`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// A pool must hold at least one slot
    ZeroCapacity,
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::ZeroCapacity => write!(f, "Clipping plane pool capacity must be at least 1"),
        }
    }
}

impl std::error::Error for PoolError {}
