//! Integration tests for the tool lifecycle
//!
//! These tests drive the full host-tool → router → locator → pool path:
//! 1. Host tool creation binds locators to pool slots in index order
//! 2. Exhausting the pool degrades new tools instead of failing
//! 3. Tool destruction always returns slots to the pool
//! 4. Arbitrary allocate/release sequences keep the pool consistent

use ballpark_core::{
    AnalysisTool, ClippingPlaneLocator, ClippingPlanePool, LocatorContext, RigidTransform,
    Rotor3, RotationPlane, SlotHandle, ToolCapabilities, ToolKey, ToolLifecycleRouter,
    ToolLocator, ToolManager, Vec3,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

/// Drain host events into the router, the way the application does each frame
fn pump(tools: &mut ToolManager, router: &mut ToolLifecycleRouter, pool: &mut ClippingPlanePool) {
    let mut ctx = LocatorContext::new(pool);
    for event in tools.drain_events() {
        router.dispatch(&event, AnalysisTool::ClippingPlane, &mut ctx);
    }
}

// ==================== Scenario ====================

/// Seven tools on a six-slot pool, then a destroy and a re-create
#[test]
fn test_capacity_scenario() {
    let mut tools = ToolManager::new();
    let mut pool = ClippingPlanePool::new(6).unwrap();
    let mut router = ToolLifecycleRouter::new();

    let keys: Vec<ToolKey> = (0..7)
        .map(|_| tools.create_tool(ToolCapabilities::LOCATOR, RigidTransform::identity()))
        .collect();
    pump(&mut tools, &mut router, &mut pool);

    // L1..L6 hold slots 0..5, L7 got nothing
    assert_eq!(router.locator_count(), 7);
    assert_eq!(pool.allocated_count(), 6);

    // L3 goes away: slot 2 is free again
    tools.destroy_tool(keys[2]);
    pump(&mut tools, &mut router, &mut pool);
    assert!(!pool.slot(2).unwrap().is_allocated());
    assert_eq!(pool.allocated_count(), 5);
    assert!(!router.has_locator(keys[2]));

    // L8 takes the lowest free slot
    let l8 = tools.create_tool(ToolCapabilities::LOCATOR, RigidTransform::identity());
    pump(&mut tools, &mut router, &mut pool);
    assert!(pool.slot(2).unwrap().is_allocated());
    assert_eq!(pool.allocated_count(), 6);

    // Activate L1, L2, L4, L5, L6 and L8 (L7 is unbound and stays inert)
    for &tool in [keys[0], keys[1], keys[3], keys[4], keys[5], keys[6], l8].iter() {
        tools.press(tool);
    }
    pump(&mut tools, &mut router, &mut pool);
    assert_eq!(pool.active_count(), 6);

    // With room for four hardware planes, the first four active slots win
    let programmed: Vec<usize> = pool.active_planes().take(4).map(|(i, _)| i).collect();
    assert_eq!(programmed, vec![0, 1, 2, 3]);

    // Releasing L8's button frees its hardware register for slot 4
    tools.release(l8);
    pump(&mut tools, &mut router, &mut pool);
    let programmed: Vec<usize> = pool.active_planes().take(4).map(|(i, _)| i).collect();
    assert_eq!(programmed, vec![0, 1, 3, 4]);
}

/// The unbound seventh locator never touches the pool, even after a slot frees up
#[test]
fn test_unbound_locator_stays_unbound() {
    let mut pool = ClippingPlanePool::new(1).unwrap();
    let mut tools = ToolManager::new();
    let a = tools.create_tool(ToolCapabilities::LOCATOR, RigidTransform::identity());
    let b = tools.create_tool(ToolCapabilities::LOCATOR, RigidTransform::identity());

    let mut first = ClippingPlaneLocator::new(a, &mut LocatorContext::new(&mut pool));
    let mut second = ClippingPlaneLocator::new(b, &mut LocatorContext::new(&mut pool));
    assert_eq!(second.slot_index(), None);

    first.destroy(&mut LocatorContext::new(&mut pool));
    second.button_press(&mut LocatorContext::new(&mut pool));

    assert_eq!(pool.allocated_count(), 0);
    assert_eq!(pool.active_count(), 0);
}

// ==================== Lifecycle ====================

/// Destroying a tool mid-press releases and deactivates its slot
#[test]
fn test_destroy_while_pressed() {
    let mut tools = ToolManager::new();
    let mut pool = ClippingPlanePool::default();
    let mut router = ToolLifecycleRouter::new();

    let tool = tools.create_tool(ToolCapabilities::LOCATOR, RigidTransform::identity());
    tools.press(tool);
    pump(&mut tools, &mut router, &mut pool);
    assert_eq!(pool.active_count(), 1);

    tools.destroy_tool(tool);
    pump(&mut tools, &mut router, &mut pool);

    let slot = pool.slot(0).unwrap();
    assert!(!slot.is_allocated());
    assert!(!slot.is_active());
    assert_eq!(router.locator_count(), 0);
}

/// Motion events place the plane through the tool origin along its up axis
#[test]
fn test_plane_follows_tool_pose() {
    let mut tools = ToolManager::new();
    let mut pool = ClippingPlanePool::default();
    let mut router = ToolLifecycleRouter::new();

    let tool = tools.create_tool(ToolCapabilities::LOCATOR, RigidTransform::identity());
    let rotation = Rotor3::from_plane_angle(RotationPlane::XY, std::f32::consts::FRAC_PI_2);
    let pose = RigidTransform::new(Vec3::new(2.0, -1.0, 0.5), rotation);
    tools.move_tool(tool, pose);
    pump(&mut tools, &mut router, &mut pool);

    let plane = *pool.slot(0).unwrap().plane();
    // Up (+Y) turned 90° in the XY plane points along -X
    assert!((plane.normal - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    assert!((plane.offset - plane.normal.dot(pose.origin())).abs() < 1e-5);
    assert!(plane.signed_distance(pose.origin()).abs() < 1e-5);
}

/// Tools that are not pointer tools never reach the pool
#[test]
fn test_navigation_tools_do_not_allocate() {
    let mut tools = ToolManager::new();
    let mut pool = ClippingPlanePool::default();
    let mut router = ToolLifecycleRouter::new();

    let nav = tools.create_tool(ToolCapabilities::NAVIGATION, RigidTransform::identity());
    tools.create_tool(ToolCapabilities::WIDGET, RigidTransform::identity());
    pump(&mut tools, &mut router, &mut pool);
    tools.destroy_tool(nav);
    pump(&mut tools, &mut router, &mut pool);

    assert_eq!(router.locator_count(), 0);
    assert_eq!(pool.allocated_count(), 0);
}

// ==================== Pool properties ====================

/// Exclusivity and conservation over a long random allocate/release sequence
#[test]
fn test_random_allocate_release_sequence() {
    let capacity = 6;
    let mut pool = ClippingPlanePool::new(capacity).unwrap();
    let mut live: Vec<SlotHandle> = Vec::new();
    // Seeded so a failure reproduces
    let mut rng = StdRng::seed_from_u64(0x9E37_79B9_7F4A_7C15);
    let mut allocations = 0usize;
    let mut releases = 0usize;

    for _ in 0..2_000 {
        if rng.gen_range(0..3) != 0 || live.is_empty() {
            let before: Vec<_> = pool.iter().copied().collect();
            match pool.allocate() {
                Some(handle) => {
                    allocations += 1;
                    live.push(handle);
                }
                None => {
                    assert_eq!(live.len(), capacity);
                    let after: Vec<_> = pool.iter().copied().collect();
                    assert_eq!(before, after, "exhausted allocate must not change the pool");
                }
            }
        } else {
            let victim = rng.gen_range(0..live.len());
            let handle = live.swap_remove(victim);
            let index = handle.index();
            pool.release(handle);
            releases += 1;
            assert!(!pool.slot(index).unwrap().is_allocated());
        }

        let indices: HashSet<usize> = live.iter().map(SlotHandle::index).collect();
        assert_eq!(indices.len(), live.len(), "two live handles share a slot");
        assert_eq!(allocations - releases, pool.allocated_count());
        assert!(pool.allocated_count() <= capacity);
    }

    for handle in live.drain(..) {
        pool.release(handle);
    }
    assert_eq!(pool.allocated_count(), 0);
}
