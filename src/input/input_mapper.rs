//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like CreateTool, Exit, etc.
//! Pointer keys (WASD, Space, Shift) are NOT mapped here - they go directly to PointerController.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not pointer movement)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Toggle cursor capture (Escape when captured, click when released)
    ToggleCursor,
    /// Exit application (Escape when not captured)
    Exit,
    /// Move the driven pointer back to its start position (R key)
    CenterDisplay,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Create a pointer tool and drive it (T key)
    CreateTool,
    /// Destroy the driven pointer tool (X key)
    DestroyTool,
    /// Drive the next pointer tool (Tab key)
    CycleTool,
    /// Pick the analysis tool for new pointers by menu index (1-9 keys)
    SelectAnalysisTool(i32),
    /// Show or hide the park model (P key)
    TogglePark,
    /// Turn lighting on or off (L key)
    ToggleLight,
}

/// Maps raw input events to semantic actions
///
/// Pointer keys (WASD, Space, Shift) are NOT mapped here - they go directly
/// to the PointerController. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map a key event from the window, ignoring OS auto-repeat
    ///
    /// Holding a key fires its action once.
    pub fn map_key_event(
        key: KeyCode,
        state: ElementState,
        repeat: bool,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        if repeat {
            return None;
        }
        Self::map_keyboard(key, state, cursor_captured)
    }

    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` for pointer keys
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => {
                if cursor_captured {
                    Some(InputAction::ToggleCursor)
                } else {
                    Some(InputAction::Exit)
                }
            }
            KeyCode::KeyR => Some(InputAction::CenterDisplay),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyT => Some(InputAction::CreateTool),
            KeyCode::KeyX => Some(InputAction::DestroyTool),
            KeyCode::Tab => Some(InputAction::CycleTool),
            KeyCode::KeyP => Some(InputAction::TogglePark),
            KeyCode::KeyL => Some(InputAction::ToggleLight),
            _ => Self::digit_index(key).map(InputAction::SelectAnalysisTool),
        }
    }

    /// Map mouse button to an action
    ///
    /// Returns `Some(ToggleCursor)` for left click when cursor not captured.
    /// Once captured, the left button is the pointer's button.
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed && !cursor_captured {
            Some(InputAction::ToggleCursor)
        } else {
            None
        }
    }

    /// Zero-based menu index for the digit keys 1-9
    fn digit_index(key: KeyCode) -> Option<i32> {
        let index = match key {
            KeyCode::Digit1 => 0,
            KeyCode::Digit2 => 1,
            KeyCode::Digit3 => 2,
            KeyCode::Digit4 => 3,
            KeyCode::Digit5 => 4,
            KeyCode::Digit6 => 5,
            KeyCode::Digit7 => 6,
            KeyCode::Digit8 => 7,
            KeyCode::Digit9 => 8,
            _ => return None,
        };
        Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_key_has_no_action() {
        for key in [KeyCode::KeyT, KeyCode::KeyX, KeyCode::KeyP, KeyCode::KeyL, KeyCode::Tab] {
            assert_eq!(
                InputMapper::map_key_event(key, ElementState::Pressed, true, true),
                None
            );
        }
    }

    #[test]
    fn test_first_press_maps_like_map_keyboard() {
        assert_eq!(
            InputMapper::map_key_event(KeyCode::KeyT, ElementState::Pressed, false, true),
            Some(InputAction::CreateTool)
        );
        assert_eq!(
            InputMapper::map_key_event(KeyCode::KeyT, ElementState::Released, false, true),
            None
        );
        assert_eq!(
            InputMapper::map_key_event(KeyCode::Escape, ElementState::Pressed, false, false),
            Some(InputAction::Exit)
        );
    }

    #[test]
    fn test_escape_when_captured_releases() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, true);
        assert_eq!(action, Some(InputAction::ToggleCursor));
    }

    #[test]
    fn test_escape_when_released_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed, false);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_pointer_keys_not_mapped() {
        // Handled by the pointer controller
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::KeyS, KeyCode::KeyD, KeyCode::Space] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed, true);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::KeyT, ElementState::Released, true);
        assert_eq!(action, None);
    }

    #[test]
    fn test_click_to_capture() {
        let action = InputMapper::map_mouse_button(MouseButton::Left, ElementState::Pressed, false);
        assert_eq!(action, Some(InputAction::ToggleCursor));
    }

    #[test]
    fn test_click_when_captured_is_tool_button() {
        let action = InputMapper::map_mouse_button(MouseButton::Left, ElementState::Pressed, true);
        assert_eq!(action, None);
    }

    #[test]
    fn test_tool_keys() {
        let map = |key| InputMapper::map_keyboard(key, ElementState::Pressed, true);
        assert_eq!(map(KeyCode::KeyT), Some(InputAction::CreateTool));
        assert_eq!(map(KeyCode::KeyX), Some(InputAction::DestroyTool));
        assert_eq!(map(KeyCode::Tab), Some(InputAction::CycleTool));
        assert_eq!(map(KeyCode::KeyR), Some(InputAction::CenterDisplay));
    }

    #[test]
    fn test_render_toggles() {
        let map = |key| InputMapper::map_keyboard(key, ElementState::Pressed, false);
        assert_eq!(map(KeyCode::KeyP), Some(InputAction::TogglePark));
        assert_eq!(map(KeyCode::KeyL), Some(InputAction::ToggleLight));
        assert_eq!(map(KeyCode::KeyF), Some(InputAction::ToggleFullscreen));
    }

    #[test]
    fn test_digits_select_by_index() {
        let map = |key| InputMapper::map_keyboard(key, ElementState::Pressed, true);
        assert_eq!(map(KeyCode::Digit1), Some(InputAction::SelectAnalysisTool(0)));
        assert_eq!(map(KeyCode::Digit9), Some(InputAction::SelectAnalysisTool(8)));
        assert_eq!(map(KeyCode::Digit0), None);
    }
}
