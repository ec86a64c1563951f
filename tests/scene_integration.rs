//! Integration tests for the composed winter scene
//!
//! Builds the scene from the bundled assets with a fixed seed and checks
//! the layout, the collision layering and the response to device motion.

use snowglobe::config::AppConfig;
use snowglobe::scene::{compose_scene, SceneAssets};
use snowglobe_core::palette::depth_scale;
use snowglobe_core::{Category, DeviceMotion, MotionSample, Scene, Vec2};
use snowglobe_physics::{CollisionFilter, CollisionLayer};

fn seeded_config(seed: u64) -> AppConfig {
    let mut config = AppConfig::default();
    config.scene.seed = Some(seed);
    config
}

fn compose(seed: u64) -> Scene {
    let config = seeded_config(seed);
    let assets = SceneAssets::load(&config.scene).unwrap();
    compose_scene(&config, &assets)
}

fn velocities(scene: &Scene) -> Vec<Vec2> {
    scene
        .snowflakes()
        .iter()
        .map(|&key| scene.physics().get_body(key).unwrap().velocity)
        .collect()
}

#[test]
fn test_body_counts() {
    let scene = compose(1);
    assert_eq!(scene.bodies_in(Category::Terrain).count(), 6);
    assert_eq!(scene.bodies_in(Category::Passive).count(), 30);
    for category in Category::DEPTH_LAYERS {
        assert_eq!(scene.bodies_in(category).count(), 200, "{:?}", category);
    }
    assert_eq!(scene.snowflakes().len(), 600);
}

#[test]
fn test_flake_sizes_and_spawn_bounds() {
    let scene = compose(2);
    for category in Category::DEPTH_LAYERS {
        let scale = depth_scale(category);
        for (_, body) in scene.bodies_in(category) {
            let radius = body.radius().unwrap();
            assert!(radius >= 2.0 * scale - 1e-4 && radius <= 8.0 * scale + 1e-4);
            assert!(body.position.x >= 12.0 && body.position.x <= 388.0);
            assert!(body.position.y >= 12.0 && body.position.y <= 400.0);
        }
    }
}

#[test]
fn test_flake_masks() {
    let scene = compose(3);
    for (_, body) in scene.bodies_in(Category::Front) {
        assert_eq!(body.filter.layer, CollisionLayer::FRONT);
        assert_eq!(body.filter.mask, CollisionLayer::TERRAIN | CollisionLayer::FRONT);
    }
    for (_, body) in scene.bodies_in(Category::Back) {
        assert_eq!(body.filter.mask, CollisionLayer::TERRAIN | CollisionLayer::BACK);
    }
}

#[test]
fn test_layers_never_touch_each_other() {
    let mut scene = compose(4);
    for _ in 0..120 {
        scene.step(1.0 / 60.0);
        for (a, b, _) in scene.physics().contacts() {
            let (ca, cb) = (scene.category(a).unwrap(), scene.category(b).unwrap());
            assert!(
                ca == cb || ca == Category::Terrain || cb == Category::Terrain,
                "{:?} touched {:?}",
                ca,
                cb
            );
        }
    }
}

#[test]
fn test_stars_never_collide() {
    let mut scene = compose(5);
    let stars: Vec<_> = scene.bodies_in(Category::Passive).map(|(key, _)| key).collect();
    for _ in 0..60 {
        scene.step(1.0 / 60.0);
    }
    for (a, b, _) in scene.physics().contacts() {
        assert!(!stars.contains(&a) && !stars.contains(&b));
    }
    for key in stars {
        let body = scene.physics().get_body(key).unwrap();
        assert_eq!(body.filter, CollisionFilter::passive());
        assert_eq!(body.velocity, Vec2::ZERO);
    }
}

#[test]
fn test_walls_contain_flakes() {
    let mut scene = compose(6);
    for _ in 0..180 {
        scene.step(1.0 / 60.0);
    }
    // Anything still above the open bottom is between the walls
    for &key in scene.snowflakes() {
        let body = scene.physics().get_body(key).unwrap();
        if body.position.y < 600.0 {
            assert!(body.position.x > 0.0 && body.position.x < 400.0);
        }
    }
}

#[test]
fn test_zero_motion_changes_nothing() {
    let mut scene = compose(7);
    let before = velocities(&scene);
    assert!(scene.apply_device_motion(&DeviceMotion::new(0.0, 0.0), Vec2::new(200.0, 400.0), 1.0));
    assert_eq!(velocities(&scene), before);

    let mut reference = compose(7);
    scene.step(1.0 / 60.0);
    reference.step(1.0 / 60.0);
    assert_eq!(velocities(&scene), velocities(&reference));
}

#[test]
fn test_motion_without_data_skipped() {
    let mut scene = compose(8);
    let center = Vec2::new(200.0, 400.0);
    assert!(!scene.apply_device_motion(&DeviceMotion::empty(), center, 1.0));

    let missing_axis = DeviceMotion {
        acceleration: Some(MotionSample { x: Some(3.0), y: None }),
    };
    assert!(!scene.apply_device_motion(&missing_axis, center, 1.0));
}

#[test]
fn test_motion_pushes_snow() {
    let mut scene = compose(9);
    let mut reference = compose(9);
    scene.apply_device_motion(&DeviceMotion::new(-5.0, 0.0), Vec2::new(200.0, 400.0), 1.0);
    scene.step(1.0 / 60.0);
    reference.step(1.0 / 60.0);

    // Contacts can redistribute individual flakes; the layer as a whole moves left
    let mean_x = |v: Vec<Vec2>| v.iter().map(|v| v.x).sum::<f32>() / v.len() as f32;
    assert!(mean_x(velocities(&scene)) < mean_x(velocities(&reference)) - 0.5);
}

#[test]
fn test_pointer_drags_flakes_only() {
    let mut scene = compose(10);

    // A star cannot be grabbed
    let (_, star) = scene.bodies_in(Category::Passive).next().unwrap();
    let star_position = star.position;
    let grabbed = scene.physics_mut().pointer_down(star_position);
    if let Some(key) = grabbed {
        assert!(scene.snowflakes().contains(&key));
    }
    scene.physics_mut().pointer_up();

    // A flake follows the pointer
    let key = scene.snowflakes()[0];
    let start = scene.physics().get_body(key).unwrap().position;
    let picked = scene.physics_mut().pointer_down(start).unwrap();
    let target = Vec2::new(200.0, 300.0);
    scene.physics_mut().pointer_move(target);
    let before = scene.physics().get_body(picked).unwrap().position.distance(target);
    for _ in 0..30 {
        scene.step(1.0 / 60.0);
    }
    let after = scene.physics().get_body(picked).unwrap().position.distance(target);
    assert!(after < before);
}

#[test]
fn test_same_seed_same_layout() {
    let positions = |scene: &Scene| -> Vec<Vec2> {
        scene.physics().iter().map(|(_, body)| body.position).collect()
    };
    assert_eq!(positions(&compose(11)), positions(&compose(11)));
    assert_ne!(positions(&compose(11)), positions(&compose(12)));
}
