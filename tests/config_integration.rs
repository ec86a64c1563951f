//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use snowglobe::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SNOW_WINDOW__TITLE", "Test From Env");
    std::env::set_var("SNOW_SCENE__SEED", "1234");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SNOW_WINDOW__TITLE");
    std::env::remove_var("SNOW_SCENE__SEED");

    assert_eq!(config.window.title, "Test From Env");
    assert_eq!(config.scene.seed, Some(1234));
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    let builtin = AppConfig::default();
    let config = AppConfig::load_from("config").unwrap();

    assert_eq!(config.scene.flakes_per_layer, builtin.scene.flakes_per_layer);
    assert_eq!(config.scene.tree_positions, builtin.scene.tree_positions);
    assert_eq!(config.physics.gravity, builtin.physics.gravity);
    assert_eq!(config.overlays.images, builtin.overlays.images);
    assert_eq!(config.rendering.backdrop_center, builtin.rendering.backdrop_center);
}

#[test]
#[serial]
fn test_user_config_overrides_default() {
    let dir = std::env::temp_dir().join(format!("snowglobe-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("default.toml"), "[scene]\nstar_count = 30\nflakes_per_layer = 200\n").unwrap();
    std::fs::write(dir.join("user.toml"), "[scene]\nflakes_per_layer = 5\n\n[debug]\nshow_colliders = true\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.scene.flakes_per_layer, 5);
    assert_eq!(config.scene.star_count, 30);
    assert!(config.debug.show_colliders);
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.title, "Snowglobe");
    assert_eq!(config.scene.width, 400.0);
}

#[test]
#[serial]
fn test_invalid_value_is_an_error() {
    std::env::set_var("SNOW_SCENE__FLAKES_PER_LAYER", "lots");
    let result = AppConfig::load_from("does/not/exist");
    std::env::remove_var("SNOW_SCENE__FLAKES_PER_LAYER");

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
