//! Pointer tracking in canvas coordinates
//!
//! The window surface may be larger than the logical canvas (HiDPI), so
//! cursor positions are rescaled from physical pixels to canvas units.

use snowglobe_math::Vec2;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton};

/// A pointer event for the physics world
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at a canvas position
    Down(Vec2),
    /// Pointer moved to a canvas position
    Move(Vec2),
    /// Primary button released
    Up,
}

/// Tracks cursor position and the primary button
pub struct PointerTracker {
    canvas_size: Vec2,
    surface_size: Vec2,
    position: Vec2,
    pressed: bool,
}

impl PointerTracker {
    /// Create a tracker for a canvas drawn onto a surface of `surface` pixels
    pub fn new(canvas_width: f32, canvas_height: f32, surface: PhysicalSize<u32>) -> Self {
        let mut tracker = Self {
            canvas_size: Vec2::new(canvas_width, canvas_height),
            surface_size: Vec2::new(1.0, 1.0),
            position: Vec2::ZERO,
            pressed: false,
        };
        tracker.resize(surface);
        tracker
    }

    /// Update the surface size after a resize
    pub fn resize(&mut self, surface: PhysicalSize<u32>) {
        self.surface_size = Vec2::new(surface.width.max(1) as f32, surface.height.max(1) as f32);
    }

    /// Last known position in canvas units
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the primary button is held
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Convert a physical cursor position to canvas units
    pub fn to_canvas(&self, position: PhysicalPosition<f64>) -> Vec2 {
        let x = position.x as f32 / self.surface_size.x * self.canvas_size.x;
        let y = position.y as f32 / self.surface_size.y * self.canvas_size.y;
        Vec2::new(x, y)
    }

    /// Process a cursor move
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) -> PointerEvent {
        self.position = self.to_canvas(position);
        PointerEvent::Move(self.position)
    }

    /// Process a mouse button; only the left button drags
    pub fn process_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }

        match (state, self.pressed) {
            (ElementState::Pressed, false) => {
                self.pressed = true;
                Some(PointerEvent::Down(self.position))
            }
            (ElementState::Released, true) => {
                self.pressed = false;
                Some(PointerEvent::Up)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_scaled_to_canvas() {
        // 2x HiDPI surface for a 400 x 800 canvas
        let mut tracker = PointerTracker::new(400.0, 800.0, PhysicalSize::new(800, 1600));
        let event = tracker.process_cursor_moved(PhysicalPosition::new(400.0, 400.0));
        assert_eq!(event, PointerEvent::Move(Vec2::new(200.0, 200.0)));
    }

    #[test]
    fn test_press_and_release() {
        let mut tracker = PointerTracker::new(400.0, 800.0, PhysicalSize::new(400, 800));
        tracker.process_cursor_moved(PhysicalPosition::new(10.0, 20.0));

        assert_eq!(
            tracker.process_mouse_button(MouseButton::Left, ElementState::Pressed),
            Some(PointerEvent::Down(Vec2::new(10.0, 20.0)))
        );
        assert!(tracker.is_pressed());

        // Repeated press is ignored
        assert_eq!(
            tracker.process_mouse_button(MouseButton::Left, ElementState::Pressed),
            None
        );

        assert_eq!(
            tracker.process_mouse_button(MouseButton::Left, ElementState::Released),
            Some(PointerEvent::Up)
        );
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut tracker = PointerTracker::new(400.0, 800.0, PhysicalSize::new(400, 800));
        assert_eq!(
            tracker.process_mouse_button(MouseButton::Right, ElementState::Pressed),
            None
        );
    }
}
