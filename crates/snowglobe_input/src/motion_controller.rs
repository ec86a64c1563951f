//! Device-motion synthesis for desktops
//!
//! Controls:
//! - Arrow keys: tilt (constant acceleration while held)
//! - Moving the window: shake (acceleration opposite to the displacement,
//!   like snow lagging behind a jerked globe)

use snowglobe_core::DeviceMotion;
use snowglobe_math::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Builds device-motion events from keyboard and window input
pub struct MotionController {
    left: bool,
    right: bool,
    up: bool,
    down: bool,

    last_window_position: Option<PhysicalPosition<i32>>,
    pending_shake: Vec2,

    // Configuration
    /// Acceleration reported while an arrow key is held
    pub tilt_acceleration: f32,
    /// Acceleration per pixel of window movement
    pub shake_sensitivity: f32,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(1.0, 0.05)
    }
}

impl MotionController {
    pub fn new(tilt_acceleration: f32, shake_sensitivity: f32) -> Self {
        Self {
            left: false,
            right: false,
            up: false,
            down: false,
            last_window_position: None,
            pending_shake: Vec2::ZERO,
            tilt_acceleration,
            shake_sensitivity,
        }
    }

    /// Process keyboard input, returning whether the key was consumed
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::ArrowLeft => { self.left = pressed; true }
            KeyCode::ArrowRight => { self.right = pressed; true }
            KeyCode::ArrowUp => { self.up = pressed; true }
            KeyCode::ArrowDown => { self.down = pressed; true }
            _ => false,
        }
    }

    /// Process a window move
    ///
    /// The first position only records where the window is.
    pub fn process_window_moved(&mut self, position: PhysicalPosition<i32>) {
        if let Some(last) = self.last_window_position {
            let delta = Vec2::new((position.x - last.x) as f32, (position.y - last.y) as f32);
            self.pending_shake -= delta * self.shake_sensitivity;
        }
        self.last_window_position = Some(position);
    }

    /// Release all held keys (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
        self.pending_shake = Vec2::ZERO;
    }

    fn tilt(&self) -> Vec2 {
        let axis = |negative: bool, positive: bool| match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down)) * self.tilt_acceleration
    }

    /// The motion event for this frame, if anything is moving
    ///
    /// Accumulated shake is consumed.
    pub fn sample(&mut self) -> Option<DeviceMotion> {
        let acceleration = self.tilt() + self.pending_shake;
        self.pending_shake = Vec2::ZERO;

        if acceleration == Vec2::ZERO {
            None
        } else {
            Some(DeviceMotion::new(acceleration.x, acceleration.y))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_produces_nothing() {
        let mut controller = MotionController::default();
        assert_eq!(controller.sample(), None);
    }

    #[test]
    fn test_arrow_tilt() {
        let mut controller = MotionController::new(2.0, 0.0);
        assert!(controller.process_keyboard(KeyCode::ArrowRight, ElementState::Pressed));
        assert!(controller.process_keyboard(KeyCode::ArrowUp, ElementState::Pressed));

        let motion = controller.sample().unwrap();
        assert_eq!(motion.acceleration(), Some(Vec2::new(2.0, -2.0)));

        // Held keys keep tilting
        assert!(controller.sample().is_some());

        controller.process_keyboard(KeyCode::ArrowRight, ElementState::Released);
        controller.process_keyboard(KeyCode::ArrowUp, ElementState::Released);
        assert_eq!(controller.sample(), None);
    }

    #[test]
    fn test_opposite_arrows_cancel() {
        let mut controller = MotionController::new(1.0, 0.0);
        controller.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);
        controller.process_keyboard(KeyCode::ArrowRight, ElementState::Pressed);
        assert_eq!(controller.sample(), None);
    }

    #[test]
    fn test_window_shake_is_consumed() {
        let mut controller = MotionController::new(1.0, 0.5);
        controller.process_window_moved(PhysicalPosition::new(100, 100));
        assert_eq!(controller.sample(), None);

        controller.process_window_moved(PhysicalPosition::new(110, 100));
        let motion = controller.sample().unwrap();
        assert_eq!(motion.acceleration(), Some(Vec2::new(-5.0, 0.0)));
        assert_eq!(controller.sample(), None);
    }

    #[test]
    fn test_other_keys_not_consumed() {
        let mut controller = MotionController::default();
        assert!(!controller.process_keyboard(KeyCode::KeyR, ElementState::Pressed));
    }
}
