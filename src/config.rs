//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`BALLPARK_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Clipping plane pool configuration
    #[serde(default)]
    pub clipping: ClippingConfig,
    /// Desktop pointer configuration
    #[serde(default)]
    pub pointer: PointerConfig,
    /// Analysis tool configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
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
    /// 3. Environment variables (`BALLPARK_*`)
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

        // Optional user overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // BALLPARK_CLIPPING__POOL_CAPACITY=4 -> clipping.pool_capacity = 4
        figment = figment.merge(Env::prefixed("BALLPARK_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Ballpark Viewer".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position [x, y, z]
    pub eye: [f32; 3],
    /// Look-at target [x, y, z]
    pub target: [f32; 3],
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 35.0, -45.0],
            target: [0.0, 0.0, 45.0],
            fov: 50.0,
            near: 0.5,
            far: 500.0,
        }
    }
}

/// Clipping plane configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClippingConfig {
    /// Number of pooled clipping planes
    pub pool_capacity: usize,
    /// Cap on the clip-plane registers the renderer reports (unset = all)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware_limit: Option<usize>,
}

impl Default for ClippingConfig {
    fn default() -> Self {
        Self {
            pool_capacity: ballpark_core::DEFAULT_POOL_CAPACITY,
            hardware_limit: None,
        }
    }
}

/// Desktop pointer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Where new pointer tools appear [x, y, z]
    pub start_position: [f32; 3],
    /// Keyboard movement speed (units per second)
    pub move_speed: f32,
    /// Mouse translation per pixel
    pub mouse_sensitivity: f32,
    /// Mouse rotation per pixel (radians)
    pub rotation_sensitivity: f32,
    /// Distance moved per wheel line
    pub wheel_step: f32,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 2.0, 20.0],
            move_speed: 10.0,
            mouse_sensitivity: 0.05,
            rotation_sensitivity: 0.005,
            wheel_step: 1.0,
        }
    }
}

/// Analysis tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Menu index of the tool new pointers get (0 = Clipping Plane)
    pub default_tool: i32,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// Light direction [x, y, z]
    pub light_dir: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Diffuse light strength
    pub diffuse_strength: f32,
    /// Draw the park model
    pub show_park: bool,
    /// Shade the park with the light (flat colors otherwise)
    pub lighting: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.45, 0.65, 0.90, 1.0],
            light_dir: [0.4, 1.0, -0.3],
            ambient_strength: 0.35,
            diffuse_strength: 0.65,
            show_park: true,
            lighting: true,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Show tool markers and plane outlines
    pub show_overlay: bool,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_overlay: true,
            log_level: "info".to_string(),
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
