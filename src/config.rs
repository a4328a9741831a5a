//! TOML configuration for the tracking pipeline.
//!
//! Every section and every field is optional; missing pieces fall back
//! to the built-in defaults, so a config file only needs to state what
//! it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithms::mesh::MeshConfig;
use crate::algorithms::selection::SelectionConfig;
use crate::core::types::{Rect2, Vec3};
use crate::engine::user::TrackedUser;

/// Default location of the tracking config, relative to the working
/// directory
pub const DEFAULT_CONFIG_PATH: &str = "configs/tracking.toml";

/// Failures while loading a config file
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    Io(String),
    #[error("failed to parse config file: {0}")]
    Parse(String),
}

fn default_world_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// Per-user placement settings from the `[user]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserSection {
    /// Mirror joint data about the sensor's vertical axis
    #[serde(default)]
    pub mirror_x: bool,
    /// Per-axis world scale
    #[serde(default = "default_world_scale")]
    pub world_scale: [f32; 3],
    /// World offset applied after scaling, meters
    #[serde(default)]
    pub world_translate: [f32; 3],
}

impl UserSection {
    /// Applies these settings to a user
    pub fn apply_to(&self, user: &mut TrackedUser) {
        user.set_mirror_x(self.mirror_x);
        user.set_world_scale(Vec3::new(
            self.world_scale[0],
            self.world_scale[1],
            self.world_scale[2],
        ));
        user.set_world_translate(Vec3::new(
            self.world_translate[0],
            self.world_translate[1],
            self.world_translate[2],
        ));
    }
}

impl Default for UserSection {
    fn default() -> Self {
        Self {
            mirror_x: false,
            world_scale: default_world_scale(),
            world_translate: [0.0; 3],
        }
    }
}

fn default_floor_x() -> f32 {
    -2.0
}

fn default_floor_y() -> f32 {
    0.5
}

fn default_floor_width() -> f32 {
    4.0
}

fn default_floor_height() -> f32 {
    3.0
}

/// Floor interaction bounds from the `[floor]` section, in floor-plane
/// meters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloorSection {
    #[serde(default = "default_floor_x")]
    pub x: f32,
    #[serde(default = "default_floor_y")]
    pub y: f32,
    #[serde(default = "default_floor_width")]
    pub width: f32,
    #[serde(default = "default_floor_height")]
    pub height: f32,
}

impl FloorSection {
    /// The bounds as a rectangle for the selection queries
    pub fn to_bounds_rect(&self) -> Rect2 {
        Rect2::new(self.x, self.y, self.width, self.height)
    }
}

impl Default for FloorSection {
    fn default() -> Self {
        Self {
            x: default_floor_x(),
            y: default_floor_y(),
            width: default_floor_width(),
            height: default_floor_height(),
        }
    }
}

/// Complete tracking configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Central-body selection thresholds
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Mesh reconstruction sampling
    #[serde(default)]
    pub mesh: MeshConfig,
    /// Per-user placement
    #[serde(default)]
    pub user: UserSection,
    /// Floor interaction bounds
    #[serde(default)]
    pub floor: FloorSection,
}

impl TrackingConfig {
    /// Loads a config file from an explicit path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Loads from [`DEFAULT_CONFIG_PATH`], falling back to the built-in
    /// defaults when the file does not exist
    pub fn load_default() -> Result<Self, ConfigLoadError> {
        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses a config from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigLoadError> {
        let config: TrackingConfig =
            toml::from_str(content).map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        config
            .mesh
            .validate()
            .map_err(|e| ConfigLoadError::Parse(e.to_string()))?;
        Ok(config)
    }
}
