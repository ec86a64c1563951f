//! Device motion events
//!
//! Mirrors what a motion sensor reports: the acceleration may be missing
//! entirely, and so may either axis.

use snowglobe_math::Vec2;

/// Acceleration along the screen axes
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionSample {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

/// A device-motion event
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DeviceMotion {
    pub acceleration: Option<MotionSample>,
}

impl DeviceMotion {
    /// Event with both axes present
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            acceleration: Some(MotionSample {
                x: Some(x),
                y: Some(y),
            }),
        }
    }

    /// Event without acceleration data
    pub fn empty() -> Self {
        Self::default()
    }

    /// The acceleration as a vector, if both axes are present
    pub fn acceleration(&self) -> Option<Vec2> {
        let sample = self.acceleration?;
        Some(Vec2::new(sample.x?, sample.y?))
    }
}
