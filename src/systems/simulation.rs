//! Scene simulation system
//!
//! Manages the simulation loop including:
//! - Delta time calculation
//! - Device motion → snowflake forces
//! - Fixed-step physics stepping

use std::time::Instant;
use snowglobe_core::{DeviceMotion, Scene, Vec2};

/// Longest frame the simulation will catch up on
const MAX_FRAME_TIME: f32 = 0.25;

/// Result of a simulation update
pub struct SimulationResult {
    /// Number of physics steps taken this frame
    pub steps: u32,
}

/// Where and how strongly device motion pushes the snow
#[derive(Clone, Copy, Debug)]
pub struct MotionForce {
    /// Point the force is applied at (the canvas centre)
    pub point: Vec2,
    /// Multiplier from acceleration to force
    pub scale: f32,
}

/// Manages the simulation loop
///
/// Physics advances in fixed steps fed by an accumulator, so the
/// simulation rate is independent of the frame rate.
pub struct SimulationSystem {
    last_frame: Instant,
    accumulator: f32,
    step: f32,
    /// Acceleration summed over frames that took no step
    pending_motion: Option<Vec2>,
}

impl SimulationSystem {
    /// Create a new simulation system stepping every `step` seconds
    pub fn new(step: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            accumulator: 0.0,
            step,
            pending_motion: None,
        }
    }

    /// Restart frame timing (e.g. after the scene was rebuilt)
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
        self.accumulator = 0.0;
        self.pending_motion = None;
    }

    /// Run one simulation frame
    ///
    /// # Arguments
    /// * `scene` - Scene to advance
    /// * `motion` - Device motion sampled this frame, if any
    /// * `force` - Where and how strongly motion is applied
    pub fn update(
        &mut self,
        scene: &mut Scene,
        motion: Option<DeviceMotion>,
        force: MotionForce,
    ) -> SimulationResult {
        // Cap dt to prevent spiral of death on first frame or after window focus
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(MAX_FRAME_TIME);
        self.last_frame = now;

        self.advance(scene, dt, motion, force)
    }

    /// Advance the scene by `dt` seconds of frame time
    ///
    /// Motion is applied before the first step taken; if no step fits in
    /// this frame it waits for the next one, adding to any motion already
    /// waiting. Events without acceleration data are ignored.
    pub fn advance(
        &mut self,
        scene: &mut Scene,
        dt: f32,
        motion: Option<DeviceMotion>,
        force: MotionForce,
    ) -> SimulationResult {
        if let Some(acceleration) = motion.as_ref().and_then(DeviceMotion::acceleration) {
            let pending = self.pending_motion.get_or_insert(Vec2::ZERO);
            *pending += acceleration;
        }
        self.accumulator += dt.clamp(0.0, MAX_FRAME_TIME);

        let mut steps = 0;
        while self.accumulator >= self.step {
            if let Some(pending) = self.pending_motion.take() {
                let motion = DeviceMotion::new(pending.x, pending.y);
                scene.apply_device_motion(&motion, force.point, force.scale);
            }
            scene.step(self.step);
            self.accumulator -= self.step;
            steps += 1;
        }

        SimulationResult { steps }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowglobe_core::{Category, FillStyle, PhysicsConfig, RigidBody2D};

    const FORCE: MotionForce = MotionForce {
        point: Vec2::new(200.0, 400.0),
        scale: 1.0,
    };

    fn floating_flake() -> Scene {
        let mut scene = Scene::new(PhysicsConfig::new(Vec2::ZERO));
        scene.add_body(
            RigidBody2D::new_circle(Vec2::new(100.0, 100.0), 5.0).with_air_friction(0.0),
            Category::Front,
            FillStyle::Transparent,
        );
        scene
    }

    fn flake_velocity(scene: &Scene) -> Vec2 {
        let key = scene.snowflakes()[0];
        scene.physics().get_body(key).unwrap().velocity
    }

    #[test]
    fn test_fixed_steps() {
        let mut sim = SimulationSystem::new(0.01);
        let mut scene = floating_flake();

        assert_eq!(sim.advance(&mut scene, 0.035, None, FORCE).steps, 3);
        // The leftover 5 ms carries into the next frame
        assert_eq!(sim.advance(&mut scene, 0.006, None, FORCE).steps, 1);
    }

    #[test]
    fn test_frame_time_capped() {
        let mut sim = SimulationSystem::new(1.0 / 64.0);
        let mut scene = floating_flake();
        assert_eq!(sim.advance(&mut scene, 10.0, None, FORCE).steps, 16);
    }

    #[test]
    fn test_motion_waits_for_a_step() {
        let mut sim = SimulationSystem::new(0.01);
        let mut scene = floating_flake();

        let result = sim.advance(&mut scene, 0.001, Some(DeviceMotion::new(1.0, 0.0)), FORCE);
        assert_eq!(result.steps, 0);
        assert_eq!(flake_velocity(&scene), Vec2::ZERO);

        sim.advance(&mut scene, 0.01, None, FORCE);
        assert!(flake_velocity(&scene).x > 0.0);
    }

    #[test]
    fn test_motion_accumulates_until_a_step() {
        let mut sim = SimulationSystem::new(1.0 / 60.0);
        let mut scene = floating_flake();

        // A shake in a frame too short for a step, then a tilt in the next
        let result = sim.advance(&mut scene, 1.0 / 144.0, Some(DeviceMotion::new(-5.0, 0.0)), FORCE);
        assert_eq!(result.steps, 0);
        let result = sim.advance(&mut scene, 1.0 / 60.0, Some(DeviceMotion::new(0.0, 5.0)), FORCE);
        assert_eq!(result.steps, 1);

        let velocity = flake_velocity(&scene);
        assert!(velocity.x < 0.0, "shake lost: {:?}", velocity);
        assert!(velocity.y > 0.0, "tilt lost: {:?}", velocity);
    }

    #[test]
    fn test_empty_motion_keeps_pending() {
        let mut sim = SimulationSystem::new(0.01);
        let mut scene = floating_flake();

        sim.advance(&mut scene, 0.001, Some(DeviceMotion::new(1.0, 0.0)), FORCE);
        sim.advance(&mut scene, 0.01, Some(DeviceMotion::empty()), FORCE);
        assert!(flake_velocity(&scene).x > 0.0);
    }

    #[test]
    fn test_motion_applied_once() {
        let mut sim = SimulationSystem::new(0.01);
        let mut scene = floating_flake();

        sim.advance(&mut scene, 0.02, Some(DeviceMotion::new(0.0, -1.0)), FORCE);
        let after_push = flake_velocity(&scene);
        assert!(after_push.y < 0.0);

        // No drag and no gravity: the velocity holds once the push is spent
        sim.advance(&mut scene, 0.02, None, FORCE);
        assert_eq!(flake_velocity(&scene), after_push);
    }

    #[test]
    fn test_default_construction() {
        let sim = SimulationSystem::default();
        assert!((sim.step - 1.0 / 60.0).abs() < 1e-9);
        assert!(sim.last_frame.elapsed().as_millis() < 100);
    }
}
