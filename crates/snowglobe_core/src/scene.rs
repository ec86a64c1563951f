//! The live scene: physics world plus how each body is painted
//!
//! Fill styles and categories live beside the physics world in secondary
//! maps keyed by [`BodyKey`], so the physics crate stays free of
//! presentation data.

use slotmap::SecondaryMap;

use crate::palette::Rgba;
use crate::DeviceMotion;
use snowglobe_math::Vec2;
use snowglobe_physics::{BodyKey, Category, PhysicsConfig, PhysicsWorld, RigidBody2D};

/// How a body is painted
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillStyle {
    /// Not drawn (walls, terrain)
    Transparent,
    /// Filled with a solid colour
    Solid(Rgba),
}

impl FillStyle {
    /// The fill colour, if visible
    pub fn color(&self) -> Option<Rgba> {
        match self {
            FillStyle::Transparent => None,
            FillStyle::Solid(color) => Some(*color),
        }
    }
}

/// The simulated scene
pub struct Scene {
    physics: PhysicsWorld,
    styles: SecondaryMap<BodyKey, FillStyle>,
    categories: SecondaryMap<BodyKey, Category>,
    /// Dynamic bodies in a depth layer, in insertion order
    snowflakes: Vec<BodyKey>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new(config: PhysicsConfig) -> Self {
        Self::with_physics(PhysicsWorld::with_config(config))
    }

    /// Create an empty scene around an existing physics world
    pub fn with_physics(physics: PhysicsWorld) -> Self {
        Self {
            physics,
            styles: SecondaryMap::new(),
            categories: SecondaryMap::new(),
            snowflakes: Vec::new(),
        }
    }

    /// Add a body with its category and fill style
    pub fn add_body(&mut self, body: RigidBody2D, category: Category, style: FillStyle) -> BodyKey {
        let is_snowflake = body.is_dynamic() && category.is_depth_layer();
        let key = self.physics.add_body(body);
        self.styles.insert(key, style);
        self.categories.insert(key, category);
        if is_snowflake {
            self.snowflakes.push(key);
        }
        key
    }

    /// The physics world
    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Mutable physics world (pointer input, direct body edits)
    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// Fill style of a body
    pub fn style(&self, key: BodyKey) -> Option<FillStyle> {
        self.styles.get(key).copied()
    }

    /// Category of a body
    pub fn category(&self, key: BodyKey) -> Option<Category> {
        self.categories.get(key).copied()
    }

    /// Keys of every snowflake
    pub fn snowflakes(&self) -> &[BodyKey] {
        &self.snowflakes
    }

    /// Bodies of one category
    pub fn bodies_in(&self, category: Category) -> impl Iterator<Item = (BodyKey, &RigidBody2D)> {
        self.physics
            .iter()
            .filter(move |(key, _)| self.categories.get(*key) == Some(&category))
    }

    /// Every body with its fill style
    pub fn styled_bodies(&self) -> impl Iterator<Item = (BodyKey, &RigidBody2D, FillStyle)> {
        self.physics.iter().map(move |(key, body)| {
            let style = self.styles.get(key).copied().unwrap_or(FillStyle::Transparent);
            (key, body, style)
        })
    }

    /// Total body count
    pub fn body_count(&self) -> usize {
        self.physics.body_count()
    }

    /// Push every snowflake with a device-motion event
    ///
    /// The acceleration, multiplied by `force_scale`, is applied at `point`.
    /// Events without acceleration data, or missing an axis, are ignored.
    /// Returns whether a force was applied.
    pub fn apply_device_motion(&mut self, motion: &DeviceMotion, point: Vec2, force_scale: f32) -> bool {
        let Some(acceleration) = motion.acceleration() else {
            return false;
        };

        let force = acceleration * force_scale;
        for &key in &self.snowflakes {
            self.physics.apply_force(key, point, force);
        }
        true
    }

    /// Advance the simulation
    pub fn step(&mut self, dt: f32) {
        self.physics.step(dt);
    }
}
