//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level voxpaint configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Voxel volume creation settings.
    pub volume: VolumeConfig,
    /// Painting tool settings.
    pub paint: PaintConfig,
    /// Collider synchronization settings.
    pub physics: PhysicsConfig,
    /// Tick rates and picking limits.
    pub simulation: SimulationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Initial fill pattern for a freshly created volume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum FillPatternConfig {
    /// Every cell whose center lies within `radius` of the origin.
    Sphere {
        /// Sphere radius in cells.
        radius: f32,
    },
    /// Axis-aligned cube spanning `-half_extent..=half_extent` on each axis.
    Cube {
        /// Half edge length in cells.
        half_extent: i32,
    },
    /// Only the origin cell.
    Single,
}

/// Volume configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VolumeConfig {
    /// RGBA fill color used for the initial pattern and the never-empty origin cell.
    pub fill_color: [f32; 4],
    /// Initial fill pattern.
    pub fill_pattern: FillPatternConfig,
    /// World-space size of one cell along each axis.
    pub scale: [f32; 3],
    /// World-space position of the grid origin.
    pub position: [f32; 3],
}

/// Painting tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaintConfig {
    /// Brush hue in `[0, 1]`.
    pub hue: f32,
    /// Brush saturation in `[0, 1]`.
    pub saturation: f32,
    /// Brush value (brightness) in `[0, 1]`.
    pub value: f32,
    /// Start in erase mode.
    pub erase: bool,
    /// Name of the brush selected at startup.
    pub brush: String,
    /// Directory holding per-brush RON records, relative to the config directory.
    pub brush_dir: PathBuf,
    /// Plane offset along the surface normal when no modifier is held, in cells.
    pub surface_offset_cells: i32,
}

/// Collider synchronization configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Keep one collision box per occupied cell.
    pub colliders: bool,
    /// Surface friction of voxel colliders.
    pub friction: f32,
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed physics tick rate (Hz).
    pub fixed_hz: u32,
    /// Maximum picking distance along the pointer ray, in world units.
    pub pick_distance: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to a file in debug builds.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            fill_color: [1.0, 1.0, 1.0, 1.0],
            fill_pattern: FillPatternConfig::Sphere { radius: 5.0 },
            scale: [1.0, 1.0, 1.0],
            position: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 0.8,
            value: 0.9,
            erase: false,
            brush: "PixelBrush".to_string(),
            brush_dir: PathBuf::from("brushes"),
            surface_offset_cells: 1,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            colliders: true,
            friction: 0.7,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fixed_hz: 60,
            pick_distance: 256.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

/// Returns the platform config directory for voxpaint, falling back to `./voxpaint`.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("voxpaint"))
        .unwrap_or_else(|| PathBuf::from("voxpaint"))
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Resolves the brush record directory against `config_dir`.
    ///
    /// Absolute `paint.brush_dir` values are returned unchanged.
    pub fn brush_dir(&self, config_dir: &Path) -> PathBuf {
        if self.paint.brush_dir.is_absolute() {
            self.paint.brush_dir.clone()
        } else {
            config_dir.join(&self.paint.brush_dir)
        }
    }
}
