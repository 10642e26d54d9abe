//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`W4D_SECTION__KEY`)

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use wire4d_math::{degree_to_radian, RotationOrder, Vec3};
use wire4d_render::{
    Camera4D, CameraModel, CameraSettings, CullPlanes, PipelineMode, RenderError, UvnMode,
};
use wire4d_screen::Color;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Screen and tile layout
    #[serde(default)]
    pub screen: ScreenConfig,
    /// Camera placement and projection
    #[serde(default)]
    pub camera: CameraConfig,
    /// Demo scene animation
    #[serde(default)]
    pub demo: DemoConfig,
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
    /// 3. Environment variables (`W4D_*`)
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

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // W4D_SCREEN__WIDTH=120 -> screen.width = 120
        figment = figment.merge(Env::prefixed("W4D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Camera for the configured screen, with `mcam` built
    pub fn build_camera(&self) -> Result<Camera4D, ConfigError> {
        let mut cam = Camera4D::new(self.camera.to_settings(&self.screen))?;
        cam.build_world_to_camera()?;
        Ok(cam)
    }
}

/// Screen configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Tile width in pixels
    pub region_width: usize,
    /// Tile height in pixels
    pub region_height: usize,
    /// Clear color [r, g, b]
    pub background: [u8; 3],
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 96,
            height: 48,
            region_width: 10,
            region_height: 10,
            background: [0, 0, 0],
        }
    }
}

impl ScreenConfig {
    pub fn background_color(&self) -> Color {
        Color::from(self.background)
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World position [x, y, z]
    pub position: [f64; 3],
    /// Euler angles in degrees [x, y, z]
    pub direction: [f64; 3],
    /// Near clipping distance
    pub near_clip: f64,
    /// Far clipping distance
    pub far_clip: f64,
    /// Horizontal field of view in degrees
    pub fov: f64,
    /// Order the Euler rotations are composed in
    pub rotation_order: RotationOrder,
    /// Look-at point; switches the camera to the UVN model when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<[f64; 3]>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -8.0],
            direction: [0.0, 0.0, 0.0],
            near_clip: 1.0,
            far_clip: 1000.0,
            fov: 90.0,
            rotation_order: RotationOrder::Xyz,
            target: None,
        }
    }
}

impl CameraConfig {
    /// Camera construction parameters for a screen of the configured size
    pub fn to_settings(&self, screen: &ScreenConfig) -> CameraSettings {
        let [px, py, pz] = self.position;
        let [dx, dy, dz] = self.direction.map(degree_to_radian);
        let (model, target) = match self.target {
            Some([tx, ty, tz]) => (CameraModel::Uvn, Vec3::new(tx, ty, tz)),
            None => (CameraModel::Euler, Vec3::ZERO),
        };
        CameraSettings {
            model,
            position: Vec3::new(px, py, pz),
            direction: Vec3::new(dx, dy, dz),
            target,
            near_clip_z: self.near_clip,
            far_clip_z: self.far_clip,
            fov: self.fov,
            viewport_width: screen.width,
            viewport_height: screen.height,
            rotation_order: self.rotation_order,
            uvn_mode: UvnMode::Simple,
        }
    }
}

/// Demo animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Frames to render before exiting
    pub frames: u32,
    /// Spin per frame in degrees [x, y, z]
    pub spin: [f64; 3],
    /// Batch polygons through a shared render list
    pub render_list: bool,
    /// Drop polygons facing away from the camera
    pub remove_back_faces: bool,
    /// Axes used for object culling ("x", "y", "z")
    pub cull_planes: Vec<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            frames: 36,
            spin: [4.0, 10.0, 0.0],
            render_list: true,
            remove_back_faces: true,
            cull_planes: vec!["x".to_string(), "y".to_string(), "z".to_string()],
        }
    }
}

impl DemoConfig {
    pub fn pipeline_mode(&self) -> PipelineMode {
        if self.render_list {
            PipelineMode::RenderList
        } else {
            PipelineMode::PerObject
        }
    }

    /// Parse the configured axis names
    pub fn cull_planes(&self) -> Result<CullPlanes, ConfigError> {
        self.cull_planes.iter().try_fold(CullPlanes::empty(), |planes, name| {
            let plane = match name.trim().to_ascii_lowercase().as_str() {
                "x" => CullPlanes::X,
                "y" => CullPlanes::Y,
                "z" => CullPlanes::Z,
                "all" => CullPlanes::ALL,
                other => {
                    return Err(ConfigError::Invalid(format!("unknown cull plane '{}'", other)))
                }
            };
            Ok(planes | plane)
        })
    }

    /// Spin per frame in radians
    pub fn spin_radians(&self) -> Vec3 {
        let [x, y, z] = self.spin.map(degree_to_radian);
        Vec3::new(x, y, z)
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Print the final frame as ASCII art
    pub ascii_dump: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ascii_dump: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub enum ConfigError {
    /// Sources could not be read or deserialised
    Load(Box<figment::Error>),
    /// A value parsed but is not usable
    Invalid(String),
    /// Runtime objects rejected the configured values
    Render(RenderError),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(Box::new(e))
    }
}

impl From<RenderError> for ConfigError {
    fn from(e: RenderError) -> Self {
        ConfigError::Render(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Load(e) => write!(f, "Configuration error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Configuration error: {}", msg),
            ConfigError::Render(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Load(e) => Some(e.as_ref()),
            ConfigError::Render(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}
