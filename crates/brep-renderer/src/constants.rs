//! Rendering constants

/// Viewport render target settings
pub mod viewport {
    /// MSAA sample count (1 disables multisampling)
    pub const SAMPLE_COUNT: u32 = 4;
    /// Depth buffer format
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
    /// Default background color
    pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
        r: 0.15,
        g: 0.15,
        b: 0.18,
        a: 1.0,
    };
}

/// Ground grid defaults
pub mod grid {
    /// Half extent of the grid in each direction
    pub const DEFAULT_SIZE: f32 = 300.0;
    /// Distance between grid lines
    pub const DEFAULT_SPACING: f32 = 10.0;
    /// Height of the grid plane, just below the XY plane
    pub const ELEVATION: f32 = -0.01;
    /// Regular line color (RGB)
    pub const LINE_COLOR: [f32; 3] = [0.3, 0.3, 0.3];
    /// X axis line color (RGB)
    pub const X_AXIS_COLOR: [f32; 3] = [0.8, 0.2, 0.2];
    /// Y axis line color (RGB)
    pub const Y_AXIS_COLOR: [f32; 3] = [0.2, 0.8, 0.2];
}

/// Camera defaults
pub mod camera {
    /// Vertical field of view
    pub const DEFAULT_FOV_DEGREES: f32 = 40.0;
    /// Near clipping plane
    pub const DEFAULT_NEAR: f32 = 0.1;
    /// Far clipping plane
    pub const DEFAULT_FAR: f32 = 100000.0;
    /// Initial orbit distance
    pub const DEFAULT_DISTANCE: f32 = 300.0;
    /// Initial yaw
    pub const DEFAULT_YAW_DEGREES: f32 = -60.0;
    /// Initial pitch
    pub const DEFAULT_PITCH_DEGREES: f32 = 30.0;
    /// Lowest pitch
    pub const MIN_PITCH_DEGREES: f32 = -89.0;
    /// Highest pitch
    pub const MAX_PITCH_DEGREES: f32 = 89.0;
    /// Pan speed relative to distance
    pub const PAN_SCALE: f32 = 0.002;
    /// Zoom step per scroll unit
    pub const ZOOM_SCALE: f32 = 0.1;
    /// Closest orbit distance
    pub const MIN_DISTANCE: f32 = 0.1;
    /// Farthest orbit distance
    pub const MAX_DISTANCE: f32 = 50000.0;
    /// Orbit distance as a multiple of the bounding radius when fitting
    pub const FIT_MARGIN: f32 = 2.5;
}

/// Face/edge layering
pub mod shading {
    /// Constant depth bias pushing faces behind their edges
    pub const FACE_DEPTH_BIAS: i32 = 2;
    /// Slope-scaled depth bias for faces
    pub const FACE_DEPTH_BIAS_SLOPE: f32 = 2.0;
    /// Default edge color (RGB)
    pub const EDGE_COLOR: [f32; 3] = [0.05, 0.05, 0.05];
}
