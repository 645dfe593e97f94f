//! Orbit camera for 3D viewport

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::CameraConfig;
use crate::constants::camera as constants;

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix
    pub view_proj: [[f32; 4]; 4],
    /// View matrix
    pub view: [[f32; 4]; 4],
    /// Projection matrix
    pub proj: [[f32; 4]; 4],
    /// Eye position (w = 1)
    pub eye: [f32; 4],
}

/// Orbit camera (Z up)
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Orbit center
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Width / height
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Orbit yaw around Z in radians
    pub yaw: f32,
    /// Orbit pitch above the XY plane in radians
    pub pitch: f32,
    /// Distance from target to eye
    pub distance: f32,
}

impl Camera {
    /// Create a new camera with default parameters
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Z,
            fov: constants::DEFAULT_FOV_DEGREES.to_radians(),
            aspect,
            near: constants::DEFAULT_NEAR,
            far: constants::DEFAULT_FAR,
            yaw: constants::DEFAULT_YAW_DEGREES.to_radians(),
            pitch: constants::DEFAULT_PITCH_DEGREES.to_radians(),
            distance: constants::DEFAULT_DISTANCE,
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Apply field of view and clipping planes
    pub fn apply_config(&mut self, config: &CameraConfig) {
        self.fov = config.fov_degrees.clamp(10.0, 120.0).to_radians();
        self.near = config.near_plane.max(0.001);
        self.far = config.far_plane.max(self.near + 1.0);
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(
            constants::MIN_PITCH_DEGREES.to_radians(),
            constants::MAX_PITCH_DEGREES.to_radians(),
        );
        self.update_position_from_orbit();
    }

    /// Pan the camera (move target)
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let scale = self.distance * constants::PAN_SCALE;
        self.target += right * (-delta_x * scale) + up * (delta_y * scale);
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * constants::ZOOM_SCALE))
            .clamp(constants::MIN_DISTANCE, constants::MAX_DISTANCE);
        self.update_position_from_orbit();
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.cos();
        let y = self.distance * self.pitch.cos() * self.yaw.sin();
        let z = self.distance * self.pitch.sin();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Fit camera to show the given bounding sphere
    pub fn fit_all(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        self.distance = (radius * constants::FIT_MARGIN).max(1.0);
        self.update_position_from_orbit();
    }

    /// Set to top view
    pub fn set_top_view(&mut self) {
        self.yaw = -90.0_f32.to_radians();
        self.pitch = constants::MAX_PITCH_DEGREES.to_radians();
        self.update_position_from_orbit();
    }

    /// Set to front view (looking along +Y)
    pub fn set_front_view(&mut self) {
        self.yaw = -90.0_f32.to_radians();
        self.pitch = 0.0;
        self.update_position_from_orbit();
    }

    /// Set to side view (looking along -X)
    pub fn set_side_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.update_position_from_orbit();
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Get camera uniform data
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();
        let view_proj = proj * view;

        CameraUniform {
            view_proj: view_proj.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }

    /// Convert screen coordinates to a world ray (origin, unit direction)
    ///
    /// `screen_x`/`screen_y` are measured from the top-left corner of a
    /// viewport of the given size.
    pub fn screen_to_ray(
        &self,
        screen_x: f32,
        screen_y: f32,
        screen_width: f32,
        screen_height: f32,
    ) -> (Vec3, Vec3) {
        let ndc_x = (2.0 * screen_x / screen_width) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen_y / screen_height);

        // View space looks down -Z
        let half_height = (self.fov * 0.5).tan();
        let view_dir = Vec3::new(ndc_x * half_height * self.aspect, ndc_y * half_height, -1.0);
        let world_dir = self.view_matrix().inverse().transform_vector3(view_dir);

        (self.position, world_dir.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_all_centers_target() {
        let mut camera = Camera::new(1.0);
        camera.fit_all(Vec3::new(50.0, 30.0, 15.0), 60.0);
        assert_eq!(camera.target, Vec3::new(50.0, 30.0, 15.0));
        assert!((camera.distance - 150.0).abs() < 1e-4);
        assert!((camera.position.distance(camera.target) - 150.0).abs() < 1e-2);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.0, 10.0);
        assert!(camera.pitch <= constants::MAX_PITCH_DEGREES.to_radians() + 1e-6);
        camera.orbit(0.0, -20.0);
        assert!(camera.pitch >= constants::MIN_PITCH_DEGREES.to_radians() - 1e-6);
    }

    #[test]
    fn test_standard_views() {
        let mut camera = Camera::new(1.0);
        camera.set_top_view();
        assert!(camera.position.z > camera.target.z + camera.distance * 0.99);

        camera.set_front_view();
        assert!(camera.position.y < camera.target.y);
        assert!((camera.position.z - camera.target.z).abs() < 1e-3);

        camera.set_side_view();
        assert!(camera.position.x > camera.target.x);
    }

    #[test]
    fn test_screen_center_ray_hits_target() {
        let mut camera = Camera::new(2.0);
        camera.fit_all(Vec3::new(50.0, 30.0, 15.0), 60.0);

        let (origin, dir) = camera.screen_to_ray(400.0, 200.0, 800.0, 400.0);
        assert_eq!(origin, camera.position);
        let expected = (camera.target - camera.position).normalize();
        assert!(dir.dot(expected) > 0.9999);

        // Top of the screen tilts the ray up
        let (_, up) = camera.screen_to_ray(400.0, 0.0, 800.0, 400.0);
        assert!(up.z > dir.z);
    }

    #[test]
    fn test_zoom_limits() {
        let mut camera = Camera::new(1.0);
        for _ in 0..500 {
            camera.zoom(5.0);
        }
        assert!(camera.distance >= constants::MIN_DISTANCE);
    }
}
