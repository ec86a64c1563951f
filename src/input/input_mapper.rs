//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard input to high-level actions like Respawn and Exit.
//! Tilt keys (arrows) are NOT mapped here - they go directly to MotionController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by special input (not tilt)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Rebuild the scene with fresh snow (R key)
    Respawn,
    /// Toggle collider outlines (C key)
    ToggleColliders,
}

/// Maps raw input events to semantic actions
///
/// Arrow keys are NOT mapped here - they go directly to the
/// MotionController. This mapper handles "special" keys only.
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` for special keys, `None` otherwise
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::Respawn),
            KeyCode::KeyC => Some(InputAction::ToggleColliders),
            _ => None,
        }
    }
}
