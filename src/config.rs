//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SNOW_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use snowglobe_math::Vec2;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Scene layout
    #[serde(default)]
    pub scene: SceneConfig,
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Device-motion configuration
    #[serde(default)]
    pub motion: MotionConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Overlay images
    #[serde(default)]
    pub overlays: OverlayConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SNOW_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // SNOW_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("SNOW_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Snowglobe".to_string(),
            vsync: true,
        }
    }
}

/// Scene layout: canvas, walls, flakes and terrain assets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Canvas width in canvas units (also the window's logical width)
    pub width: f32,
    /// Canvas height in canvas units (also the window's logical height)
    pub height: f32,
    /// Thickness of the three walls
    pub wall_thickness: f32,
    /// Gap left open below the side walls
    pub bottom_margin: f32,
    /// Smallest snowflake radius before depth scaling
    pub flake_min_radius: f32,
    /// Largest snowflake radius before depth scaling
    pub flake_max_radius: f32,
    /// Snowflakes per depth layer
    pub flakes_per_layer: usize,
    /// Number of stars
    pub star_count: usize,
    /// Scale applied to terrain vertex sets
    pub terrain_scale: f32,
    /// Vertex sets for the cottage
    pub cottage_asset: String,
    /// Vertex sets for a cluster of trees
    pub trees_asset: String,
    /// Cottage anchor [x, y]
    pub cottage_position: [f32; 2],
    /// Anchors of each tree cluster
    pub tree_positions: Vec<[f32; 2]>,
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 800.0,
            wall_thickness: 4.0,
            bottom_margin: 100.0,
            flake_min_radius: 2.0,
            flake_max_radius: 8.0,
            flakes_per_layer: 200,
            star_count: 30,
            terrain_scale: 0.15,
            cottage_asset: "assets/cottage.json".to_string(),
            trees_asset: "assets/trees.json".to_string(),
            cottage_position: [190.0, 660.0],
            tree_positions: vec![[20.0, 700.0], [350.0, 685.0]],
            seed: None,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity [x, y] in canvas units per second squared (positive y is down)
    pub gravity: [f32; 2],
    /// Simulation rate in steps per second
    pub step_rate: f32,
    /// Stiffness of the pointer drag constraint
    pub pointer_stiffness: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, 100.0],
            step_rate: 60.0,
            pointer_stiffness: 0.2,
        }
    }
}

impl PhysicsConfig {
    /// Convert to the physics crate's configuration
    pub fn to_physics_config(&self) -> snowglobe_physics::PhysicsConfig {
        snowglobe_physics::PhysicsConfig::new(Vec2::new(self.gravity[0], self.gravity[1]))
    }

    /// Length of one fixed step in seconds
    pub fn step_duration(&self) -> f32 {
        1.0 / self.step_rate.max(1.0)
    }
}

/// Device-motion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Multiplier from reported acceleration to force on each snowflake
    pub force_scale: f32,
    /// Acceleration reported while an arrow key is held
    pub tilt_acceleration: f32,
    /// Acceleration per pixel the window is moved
    pub shake_sensitivity: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            force_scale: 1.0,
            tilt_acceleration: 5.0,
            shake_sensitivity: 0.5,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Gradient centre as a fraction of the canvas [x, y]
    pub backdrop_center: [f32; 2],
    /// Gradient outer stop as a fraction of the farthest-corner radius
    pub backdrop_outer_stop: f32,
    /// Width of collider outlines and the drag line
    pub line_width: f32,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            backdrop_center: [0.5, 1.5],
            backdrop_outer_stop: 0.7,
            line_width: 1.0,
        }
    }
}

/// One image drawn over the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayImage {
    /// Image path
    pub path: String,
    /// Left edge in canvas units
    pub left: f32,
    /// Top edge in canvas units
    pub top: f32,
}

/// Overlay images
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Widest an overlay may be drawn; taller images keep their aspect
    pub max_width: f32,
    /// Images in draw order
    pub images: Vec<OverlayImage>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let image = |path: &str, left, top| OverlayImage {
            path: path.to_string(),
            left,
            top,
        };
        Self {
            max_width: 200.0,
            images: vec![
                image("assets/cottage.png", 90.0, 593.0),
                image("assets/trees.png", -71.0, 660.0),
                image("assets/trees.png", 261.0, 644.0),
            ],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Show physics colliders
    pub show_colliders: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_colliders: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
