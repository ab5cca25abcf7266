use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::shading::CameraParams;
use crate::transform::{direction_from_eulers, Transform};

/// World up vector shared by the camera and the euler-driven lights.
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Perspective camera producing the per-draw camera parameter block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub transform: Transform,
    /// Viewport width:height ratio.
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    pub near: f32,
    pub far: f32,
    /// Point the camera keeps looking at; overrides the euler orientation.
    pub target: Option<Vec3>,
}

impl Camera {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            aspect: 1.0,
            fovy: 45.0,
            near: 0.1,
            far: 20.0,
            target: None,
        }
    }

    /// Unit vector the camera looks along, derived from the transform eulers.
    pub fn forward(&self) -> Vec3 {
        direction_from_eulers(self.transform.eulers)
    }

    /// World-to-view transform; the inverse of placing the camera at
    /// `transform.position` with the current orientation.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.position;
        let target = self.target.unwrap_or(eye + self.forward());
        Mat4::look_at_rh(eye, target, WORLD_UP)
    }

    /// View-to-clip transform for the wgpu 0..1 depth range.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy.to_radians(), self.aspect, self.near, self.far)
    }

    /// Populates the camera parameter block for the current pose.
    pub fn params(&self) -> CameraParams {
        CameraParams::new(
            self.transform.position,
            self.view_matrix(),
            self.projection_matrix(),
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Transform::origin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        let mut camera = Camera::new(Transform::new(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO));
        camera.target = Some(Vec3::ZERO);
        camera
    }

    #[test]
    fn view_maps_the_camera_position_to_the_view_origin() {
        let camera = test_camera();
        let at_origin = camera.view_matrix().transform_point3(camera.transform.position);
        assert!(at_origin.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn view_inverse_recovers_the_camera_position() {
        let camera = test_camera();
        let eye = camera.view_matrix().inverse().transform_point3(Vec3::ZERO);
        assert!(eye.abs_diff_eq(camera.transform.position, 1e-5));
    }

    #[test]
    fn rebuilding_the_view_from_the_same_pose_is_stable() {
        let camera = test_camera();
        assert_eq!(camera.view_matrix(), camera.view_matrix());
    }

    #[test]
    fn view_and_projection_are_invertible() {
        let mut camera = test_camera();
        camera.aspect = 16.0 / 9.0;
        assert!(camera.view_matrix().determinant().abs() > f32::EPSILON);
        assert!(camera.projection_matrix().determinant().abs() > f32::EPSILON);
    }

    #[test]
    fn euler_orientation_drives_the_view_when_no_target_is_set() {
        let mut camera = Camera::new(Transform::new(Vec3::ZERO, Vec3::new(0.0, 90.0, 0.0)));
        camera.target = None;
        // Looking along +X from the origin puts a point ahead on -Z in view
        // space.
        let ahead = camera.view_matrix().transform_point3(Vec3::new(3.0, 0.0, 0.0));
        assert!(ahead.abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-5));
    }

    #[test]
    fn params_carry_the_world_space_position() {
        let camera = test_camera();
        assert_eq!(camera.params().position, [0.0, 2.0, 6.0]);
    }
}
