//! Pointer controller for desktop locator emulation
//!
//! Controls:
//! - Mouse motion: move the pointer in the view plane
//! - Right-click + drag: rotate the pointer
//! - Mouse wheel: push the pointer away / pull it closer
//! - W/S, A/D, Space/Shift: move the pointer forward/back, left/right, up/down
//! - Left click: the pointer's button

use ballpark_core::{ToolKey, ToolManager};
use ballpark_math::{RigidTransform, Rotor3, Vec3};
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Pointer controller for handling input
pub struct PointerController {
    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,

    // Mouse state
    button_pressed: bool,
    rotation_mode: bool,  // Right-click held
    pending_dx: f32,
    pending_dy: f32,
    pending_wheel: f32,

    // View basis the mouse moves in
    view_right: Vec3,
    view_up: Vec3,

    // Configuration
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub rotation_sensitivity: f32,
    pub wheel_step: f32,
}

impl Default for PointerController {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,

            button_pressed: false,
            rotation_mode: false,
            pending_dx: 0.0,
            pending_dy: 0.0,
            pending_wheel: 0.0,

            view_right: Vec3::X,
            view_up: Vec3::Y,

            move_speed: 10.0,
            mouse_sensitivity: 0.05,
            rotation_sensitivity: 0.005,
            wheel_step: 1.0,
        }
    }

    /// Process keyboard input
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            KeyCode::Space => { self.up = pressed; true }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => { self.down = pressed; true }
            _ => false,
        }
    }

    /// Process mouse button input
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match button {
            MouseButton::Left => {
                self.button_pressed = pressed;
                true
            }
            MouseButton::Right => {
                self.rotation_mode = pressed;
                true
            }
            _ => false,
        }
    }

    /// Process mouse movement
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_dx += delta_x as f32;
        self.pending_dy += delta_y as f32;
    }

    /// Process mouse wheel (in lines; positive scrolls away from the viewer)
    pub fn process_scroll(&mut self, lines: f32) {
        self.pending_wheel += lines;
    }

    /// Set the screen-right and screen-up directions in world space
    ///
    /// Mouse motion moves the pointer along these axes; forward is
    /// `up × right`.
    pub fn set_view_axes(&mut self, right: Vec3, up: Vec3) {
        self.view_right = right.normalized();
        self.view_up = up.normalized();
    }

    /// Apply accumulated input to `target`
    ///
    /// The pose is only written when it changed. The button state is sent
    /// every call; targets ignore repeats. Returns the resulting pose.
    pub fn update<C: PointerControl>(&mut self, target: &mut C, dt: f32) -> RigidTransform {
        let mut pose = target.pose();
        let forward_dir = self.view_up.cross(self.view_right);

        // Keyboard movement
        let fwd = (self.forward as i32 - self.backward as i32) as f32;
        let rgt = (self.right as i32 - self.left as i32) as f32;
        let up_down = (self.up as i32 - self.down as i32) as f32;
        let mut offset = (forward_dir * fwd + self.view_right * rgt + self.view_up * up_down)
            * (self.move_speed * dt);

        // Wheel pushes along the view direction
        offset += forward_dir * (self.pending_wheel * self.wheel_step);

        if self.rotation_mode {
            // Right-click: horizontal mouse yaws about view up,
            // vertical mouse pitches about view right
            let yaw = Rotor3::from_axis_angle(self.view_up, self.pending_dx * self.rotation_sensitivity);
            let pitch = Rotor3::from_axis_angle(self.view_right, self.pending_dy * self.rotation_sensitivity);
            if self.pending_dx != 0.0 || self.pending_dy != 0.0 {
                pose.rotate(pitch.compose(&yaw));
            }
        } else {
            // Mouse down (positive delta_y) moves the pointer down
            offset += (self.view_right * self.pending_dx - self.view_up * self.pending_dy)
                * self.mouse_sensitivity;
        }

        pose.translate(offset);

        if pose != target.pose() {
            target.set_pose(pose);
        }
        target.set_button(self.button_pressed);

        // Reset pending mouse movement
        self.pending_dx = 0.0;
        self.pending_dy = 0.0;
        self.pending_wheel = 0.0;

        pose
    }

    /// Forget held keys and buttons (focus lost, tool switched)
    pub fn release_all(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
        self.button_pressed = false;
        self.rotation_mode = false;
    }

    /// Builder: set movement speed
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set mouse sensitivity
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set rotation sensitivity
    pub fn with_rotation_sensitivity(mut self, sensitivity: f32) -> Self {
        self.rotation_sensitivity = sensitivity;
        self
    }

    /// Builder: set distance moved per wheel line
    pub fn with_wheel_step(mut self, step: f32) -> Self {
        self.wheel_step = step;
        self
    }
}

/// Trait for pointer control
/// Allows the controller to drive different pointer implementations
pub trait PointerControl {
    fn pose(&self) -> RigidTransform;
    fn set_pose(&mut self, pose: RigidTransform);
    fn set_button(&mut self, pressed: bool);
}

/// Drives one host tool of a [`ToolManager`]
pub struct ToolDriver<'a> {
    tools: &'a mut ToolManager,
    tool: ToolKey,
}

impl<'a> ToolDriver<'a> {
    pub fn new(tools: &'a mut ToolManager, tool: ToolKey) -> Self {
        Self { tools, tool }
    }
}

impl PointerControl for ToolDriver<'_> {
    fn pose(&self) -> RigidTransform {
        self.tools
            .get(self.tool)
            .map(|t| t.transform)
            .unwrap_or_default()
    }

    fn set_pose(&mut self, pose: RigidTransform) {
        if !self.tools.move_tool(self.tool, pose) {
            log::warn!("Pointer moved a tool that no longer exists: {:?}", self.tool);
        }
    }

    fn set_button(&mut self, pressed: bool) {
        if pressed {
            self.tools.press(self.tool);
        } else {
            self.tools.release(self.tool);
        }
    }
}
