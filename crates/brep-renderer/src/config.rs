//! Renderer configuration structures
//!
//! This module provides configurable settings for the renderer that can be
//! serialized and loaded from configuration files.

use serde::{Deserialize, Serialize};

use crate::constants::{camera, grid, viewport};

/// Grid rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Whether the grid is enabled
    pub enabled: bool,
    /// Grid extent (half-size in each direction)
    pub size: f32,
    /// Grid line spacing
    pub spacing: f32,
    /// Grid line color (RGB)
    pub line_color: [f32; 3],
    /// X-axis color (RGB)
    pub x_axis_color: [f32; 3],
    /// Y-axis color (RGB)
    pub y_axis_color: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: grid::DEFAULT_SIZE,
            spacing: grid::DEFAULT_SPACING,
            line_color: grid::LINE_COLOR,
            x_axis_color: grid::X_AXIS_COLOR,
            y_axis_color: grid::Y_AXIS_COLOR,
        }
    }
}

/// Viewport rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewportConfig {
    /// Background clear color (RGBA)
    pub background_color: [f32; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        let c = viewport::CLEAR_COLOR;
        Self {
            background_color: [c.r as f32, c.g as f32, c.b as f32, c.a as f32],
        }
    }
}

impl ViewportConfig {
    /// Background color as a wgpu clear color
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.background_color;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    /// Field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane
    pub near_plane: f32,
    /// Far clipping plane
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: camera::DEFAULT_FOV_DEGREES,
            near_plane: camera::DEFAULT_NEAR,
            far_plane: camera::DEFAULT_FAR,
        }
    }
}

/// Complete renderer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RendererConfig {
    /// Grid settings
    #[serde(default)]
    pub grid: GridConfig,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Camera settings
    #[serde(default)]
    pub camera: CameraConfig,
}

impl RendererConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_color_matches_background() {
        let config = ViewportConfig {
            background_color: [0.5, 0.25, 0.0, 1.0],
        };
        let color = config.clear_color();
        assert_eq!(color.r, 0.5);
        assert_eq!(color.g, 0.25);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_defaults_follow_constants() {
        let config = RendererConfig::new();
        assert!(config.grid.enabled);
        assert_eq!(config.grid.spacing, grid::DEFAULT_SPACING);
        assert_eq!(config.camera.fov_degrees, camera::DEFAULT_FOV_DEGREES);
    }
}
