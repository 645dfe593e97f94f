//! Demo configuration (RON)

use std::path::Path;

use brep_kernel::DEFAULT_SEWING_TOLERANCE;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "brep-demo.ron";

/// Edge lengths of the demo box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxDimensions {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}

impl Default for BoxDimensions {
    fn default() -> Self {
        Self {
            dx: 100.0,
            dy: 60.0,
            dz: 30.0,
        }
    }
}

impl BoxDimensions {
    pub fn new(dx: f32, dy: f32, dz: f32) -> Self {
        Self { dx, dy, dz }
    }

    /// Corner points p0..p7: bottom ring counter-clockwise, then the top ring
    pub fn corners(&self) -> [Vec3; 8] {
        let Self { dx, dy, dz } = *self;
        [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(dx, 0.0, 0.0),
            Vec3::new(dx, dy, 0.0),
            Vec3::new(0.0, dy, 0.0),
            Vec3::new(0.0, 0.0, dz),
            Vec3::new(dx, 0.0, dz),
            Vec3::new(dx, dy, dz),
            Vec3::new(0.0, dy, dz),
        ]
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(self.dx, self.dy, self.dz) * 0.5
    }

    pub fn is_valid(&self) -> bool {
        [self.dx, self.dy, self.dz]
            .iter()
            .all(|d| d.is_finite() && *d > 0.0)
    }
}

/// Demo settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Box size
    pub dimensions: BoxDimensions,
    /// Vertex merge distance used when sewing
    pub sewing_tolerance: f32,
    /// Color of individual faces (RGBA)
    pub face_color: [f32; 4],
    /// Color of the sewn shell (RGBA)
    pub shell_color: [f32; 4],
    /// Color of the solid (RGBA)
    pub solid_color: [f32; 4],
    /// Color of boundary edges (RGBA)
    pub edge_color: [f32; 4],
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            dimensions: BoxDimensions::default(),
            sewing_tolerance: DEFAULT_SEWING_TOLERANCE,
            face_color: [0.85, 0.65, 0.25, 1.0],
            shell_color: [0.35, 0.65, 0.85, 1.0],
            solid_color: [0.55, 0.75, 0.45, 1.0],
            edge_color: [0.05, 0.05, 0.05, 1.0],
        }
    }
}

impl DemoConfig {
    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron(&content)
    }

    /// Parse and validate configuration text
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        if !config.dimensions.is_valid() {
            return Err(ConfigError::Deserialize(format!(
                "box dimensions must be positive, got {:?}",
                config.dimensions
            )));
        }
        if !config.sewing_tolerance.is_finite() || config.sewing_tolerance < 0.0 {
            return Err(ConfigError::Deserialize(format!(
                "sewing tolerance must be non-negative, got {}",
                config.sewing_tolerance
            )));
        }
        Ok(config)
    }

    /// Load configuration, falling back to defaults
    ///
    /// A missing file is silent; an unreadable or malformed file is logged.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
