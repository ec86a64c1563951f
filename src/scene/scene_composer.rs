//! SceneComposer - builds the winter scene
//!
//! Provides a fluent API that lays out walls, terrain, stars and the three
//! depth layers of snow over a fresh physics world.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use snowglobe_core::palette::{self, PALE_GOLDENROD};
use snowglobe_core::{
    load_vertex_sets, AssetError, Category, FillStyle, PhysicsWorld, RigidBody2D, Scene,
};
use snowglobe_math::{vertices, Vec2, VertexSet};
use snowglobe_physics::{CollisionFilter, PhysicsMaterial, PointerConstraint};

use crate::config::{AppConfig, SceneConfig};

/// Air friction of a front-layer flake before jitter; further layers drift more slowly
const BASE_AIR_FRICTION: f32 = 0.01;

/// Terrain outlines loaded from the bundled vertex-set assets
#[derive(Clone, Debug)]
pub struct SceneAssets {
    /// Cottage outline parts, in asset units
    pub cottage: Vec<VertexSet>,
    /// Tree cluster outline parts, in asset units
    pub trees: Vec<VertexSet>,
}

impl SceneAssets {
    /// Load the assets named in the scene configuration
    pub fn load(config: &SceneConfig) -> Result<Self, AssetError> {
        Ok(Self {
            cottage: load_vertex_sets(&config.cottage_asset)?,
            trees: load_vertex_sets(&config.trees_asset)?,
        })
    }
}

/// Builder for the winter scene
///
/// # Example
/// ```ignore
/// let scene = SceneComposer::new(config.scene.clone(), world, Some(7))
///     .add_walls()
///     .add_terrain(&assets.cottage, Vec2::new(190.0, 660.0))
///     .add_stars()
///     .add_snowflakes()
///     .build();
/// ```
pub struct SceneComposer {
    scene: Scene,
    layout: SceneConfig,
    rng: StdRng,
}

impl SceneComposer {
    /// Create a composer over a physics world
    ///
    /// With a seed the composition is reproducible; without one a fresh
    /// seed is drawn from the OS.
    pub fn new(layout: SceneConfig, physics: PhysicsWorld, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            scene: Scene::with_physics(physics),
            layout,
            rng,
        }
    }

    /// Add the top wall and the two side walls
    ///
    /// The side walls stop `bottom_margin` above the canvas bottom, which is
    /// left open.
    pub fn add_walls(mut self) -> Self {
        let SceneConfig {
            width: w,
            height: h,
            wall_thickness: t,
            bottom_margin: bm,
            ..
        } = self.layout;

        let walls = [
            (Vec2::new(w / 2.0, t / 2.0), w, t),
            (Vec2::new(t / 2.0, h / 2.0 - bm / 2.0), t, h - bm),
            (Vec2::new(w - t / 2.0, h / 2.0 - bm / 2.0), t, h - bm),
        ];

        for (center, width, height) in walls {
            let wall = RigidBody2D::new_static_rect(center, width, height)
                .with_filter(CollisionFilter::terrain())
                .with_material(PhysicsMaterial::FRICTIONLESS);
            self.scene.add_body(wall, Category::Terrain, FillStyle::Transparent);
        }
        self
    }

    /// Add a static terrain shape from vertex sets
    ///
    /// The sets are scaled by `terrain_scale` about the origin, then moved
    /// so their area centroid sits on `anchor`. Sets with fewer than three
    /// points are skipped.
    pub fn add_terrain(mut self, sets: &[VertexSet], anchor: Vec2) -> Self {
        let parts: Vec<VertexSet> = sets.iter().filter(|set| set.len() >= 3).cloned().collect();
        if parts.is_empty() {
            log::warn!("Terrain at ({}, {}) has no usable outline", anchor.x, anchor.y);
            return self;
        }

        let scaled = vertices::scale_sets(&parts, self.layout.terrain_scale);
        let body = RigidBody2D::from_vertex_sets(anchor, &scaled)
            .with_static(true)
            .with_filter(CollisionFilter::terrain())
            .with_material(PhysicsMaterial::FRICTIONLESS);
        self.scene.add_body(body, Category::Terrain, FillStyle::Transparent);
        self
    }

    /// Add the decorative stars in the top third of the canvas
    pub fn add_stars(mut self) -> Self {
        for _ in 0..self.layout.star_count {
            let position = Vec2::new(
                uniform(&mut self.rng, 0.0, self.layout.width),
                uniform(&mut self.rng, 0.0, self.layout.height / 3.0),
            );
            let radius = uniform(&mut self.rng, 1.0, 3.0);

            let star = RigidBody2D::new_circle(position, radius)
                .with_static(true)
                .with_filter(CollisionFilter::passive());
            self.scene.add_body(star, Category::Passive, FillStyle::Solid(PALE_GOLDENROD));
        }
        self
    }

    /// Add one layer of snowflakes
    ///
    /// Flakes spawn between the walls in the upper half of the canvas, sized
    /// and slowed by the layer's depth scale, tinted from its base colour.
    pub fn add_snow_layer(mut self, category: Category) -> Self {
        let scale = palette::depth_scale(category);
        if scale <= 0.0 {
            log::warn!("{:?} is not a depth layer; no snow added", category);
            return self;
        }

        let SceneConfig {
            width: w,
            height: h,
            wall_thickness: t,
            flake_min_radius: min_radius,
            flake_max_radius: max_radius,
            flakes_per_layer,
            ..
        } = self.layout;
        let base = palette::base_color(category);

        for _ in 0..flakes_per_layer {
            let position = Vec2::new(
                uniform(&mut self.rng, t + max_radius, w - t - max_radius),
                uniform(&mut self.rng, t + max_radius, h / 2.0),
            );
            let radius = uniform(&mut self.rng, min_radius, max_radius) * scale;
            let air_friction = BASE_AIR_FRICTION / scale * uniform(&mut self.rng, 0.5, 1.5);
            let color = base
                .jittered(
                    uniform(&mut self.rng, 0.9, 1.5),
                    uniform(&mut self.rng, 0.9, 1.5),
                    uniform(&mut self.rng, 0.9, 1.5),
                )
                .to_rgba();

            let flake = RigidBody2D::new_circle(position, radius)
                .with_air_friction(air_friction)
                .with_filter(category.filter())
                .with_material(PhysicsMaterial::FRICTIONLESS);
            self.scene.add_body(flake, category, FillStyle::Solid(color));
        }
        self
    }

    /// Add every depth layer, back to front so nearer flakes draw on top
    pub fn add_snowflakes(self) -> Self {
        Category::DEPTH_LAYERS
            .iter()
            .rev()
            .fold(self, |composer, &category| composer.add_snow_layer(category))
    }

    /// Build the scene
    pub fn build(self) -> Scene {
        self.scene
    }
}

/// Uniform sample in `[low, high]`, or `low` when the range is empty
fn uniform(rng: &mut StdRng, low: f32, high: f32) -> f32 {
    if high > low {
        rng.gen_range(low..=high)
    } else {
        low
    }
}

/// Compose the full scene described by the configuration
pub fn compose_scene(config: &AppConfig, assets: &SceneAssets) -> Scene {
    let physics = PhysicsWorld::with_config(config.physics.to_physics_config())
        .with_pointer(PointerConstraint::new(config.physics.pointer_stiffness));

    let layout = &config.scene;
    let cottage = Vec2::new(layout.cottage_position[0], layout.cottage_position[1]);

    let mut composer = SceneComposer::new(layout.clone(), physics, layout.seed)
        .add_walls()
        .add_terrain(&assets.cottage, cottage);
    for &[x, y] in &layout.tree_positions {
        composer = composer.add_terrain(&assets.trees, Vec2::new(x, y));
    }
    let scene = composer.add_stars().add_snowflakes().build();

    log::info!(
        "Composed scene with {} bodies ({} snowflakes)",
        scene.body_count(),
        scene.snowflakes().len()
    );
    scene
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f32) -> VertexSet {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(size, 0.0),
            Vec2::new(size, size),
            Vec2::new(0.0, size),
        ]
    }

    fn composer(seed: u64) -> SceneComposer {
        SceneComposer::new(SceneConfig::default(), PhysicsWorld::new(), Some(seed))
    }

    #[test]
    fn test_empty_scene() {
        let scene = composer(1).build();
        assert_eq!(scene.body_count(), 0);
    }

    #[test]
    fn test_walls() {
        let scene = composer(1).add_walls().build();
        assert_eq!(scene.bodies_in(Category::Terrain).count(), 3);

        let mut bounds: Vec<_> = scene
            .bodies_in(Category::Terrain)
            .map(|(_, body)| body.collider.bounds())
            .collect();
        bounds.sort_by(|a, b| a.max.x.total_cmp(&b.max.x).then(a.max.y.total_cmp(&b.max.y)));

        // Left wall, top wall, right wall
        assert_eq!(bounds[0].min, Vec2::new(0.0, 0.0));
        assert_eq!(bounds[0].max, Vec2::new(4.0, 700.0));
        assert_eq!(bounds[1].max, Vec2::new(400.0, 4.0));
        assert_eq!(bounds[2].min, Vec2::new(396.0, 0.0));
        assert!(scene.styled_bodies().all(|(_, body, style)| {
            body.is_static() && style == FillStyle::Transparent
        }));
    }

    #[test]
    fn test_terrain_centered_on_anchor() {
        let anchor = Vec2::new(190.0, 660.0);
        let scene = composer(1).add_terrain(&[square(100.0)], anchor).build();

        let (_, body) = scene.bodies_in(Category::Terrain).next().unwrap();
        assert!(body.is_static());
        let bounds = body.collider.bounds();
        assert!((bounds.size().x - 15.0).abs() < 1e-4);
        assert!((bounds.center().x - anchor.x).abs() < 1e-3);
        assert!((bounds.center().y - anchor.y).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_terrain_skipped() {
        let line = vec![Vec2::ZERO, Vec2::new(10.0, 0.0)];
        let scene = composer(1).add_terrain(&[line], Vec2::ZERO).build();
        assert_eq!(scene.body_count(), 0);
    }

    #[test]
    fn test_stars() {
        let scene = composer(3).add_stars().build();
        assert_eq!(scene.bodies_in(Category::Passive).count(), 30);
        for (_, body) in scene.bodies_in(Category::Passive) {
            assert!(body.is_static());
            assert_eq!(body.filter, CollisionFilter::passive());
            let radius = body.radius().unwrap();
            assert!((1.0..=3.0).contains(&radius));
            assert!(body.position.y <= 800.0 / 3.0);
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = composer(42).add_snowflakes().build();
        let b = composer(42).add_snowflakes().build();
        let positions = |scene: &Scene| -> Vec<Vec2> {
            scene.physics().iter().map(|(_, body)| body.position).collect()
        };
        assert_eq!(positions(&a), positions(&b));
    }

    #[test]
    fn test_snow_layer_air_friction() {
        let scene = composer(5).add_snow_layer(Category::Back).build();
        for (_, body) in scene.bodies_in(Category::Back) {
            // 0.01 / 0.3 scaled by [0.5, 1.5]
            assert!(body.air_friction >= 0.01 / 0.3 * 0.5 - 1e-6);
            assert!(body.air_friction <= 0.01 / 0.3 * 1.5 + 1e-6);
            assert_eq!(body.material, PhysicsMaterial::FRICTIONLESS);
        }
    }

    #[test]
    fn test_snow_for_non_depth_category_ignored() {
        let scene = composer(5).add_snow_layer(Category::Terrain).build();
        assert_eq!(scene.body_count(), 0);
    }

    #[test]
    fn test_empty_range_uses_low() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(uniform(&mut rng, 5.0, 5.0), 5.0);
        assert_eq!(uniform(&mut rng, 5.0, 1.0), 5.0);
    }
}
