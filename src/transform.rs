use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Position, orientation and scale of an entity in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in degrees, applied in Z-Y-X order.
    pub eulers: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Transform sitting at the world origin with no rotation.
    pub fn origin() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }

    pub fn new(position: Vec3, eulers: Vec3) -> Self {
        Self {
            position,
            eulers,
            scale: Vec3::ONE,
        }
    }

    /// Rotation part of the model matrix.
    pub fn rotation(&self) -> Mat4 {
        Mat4::from_rotation_z(self.eulers.z.to_radians())
            * Mat4::from_rotation_y(self.eulers.y.to_radians())
            * Mat4::from_rotation_x(self.eulers.x.to_radians())
    }

    /// Model matrix uploaded for meshes carrying this transform.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * self.rotation() * Mat4::from_scale(self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::origin()
    }
}

/// Maps orientation eulers (degrees) to a unit direction in the Y-up world:
/// `eulers.y` is the polar angle from +Y and `eulers.z` the azimuth around
/// it, measured from +X toward +Z.
pub fn direction_from_eulers(eulers: Vec3) -> Vec3 {
    let polar = eulers.y.to_radians();
    let azimuth = eulers.z.to_radians();
    Vec3::new(
        polar.sin() * azimuth.cos(),
        polar.cos(),
        polar.sin() * azimuth.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_yields_the_identity_matrix() {
        assert_eq!(Transform::origin().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn translation_lands_in_the_last_column() {
        let transform = Transform::new(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO);
        let matrix = transform.matrix();
        assert_eq!(matrix.w_axis.truncate(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn scale_is_applied_before_rotation_and_translation() {
        let mut transform = Transform::new(Vec3::ZERO, Vec3::ZERO);
        transform.scale = Vec3::splat(2.0);
        let point = transform.matrix().transform_point3(Vec3::ONE);
        assert!(point.abs_diff_eq(Vec3::splat(2.0), 1e-6));
    }

    #[test]
    fn euler_direction_covers_the_axes() {
        let down = direction_from_eulers(Vec3::new(0.0, 180.0, 0.0));
        assert!(down.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-6));

        let east = direction_from_eulers(Vec3::new(0.0, 90.0, 0.0));
        assert!(east.abs_diff_eq(Vec3::X, 1e-6));

        let south = direction_from_eulers(Vec3::new(0.0, 90.0, 90.0));
        assert!(south.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn euler_directions_are_unit_length() {
        for polar in [10.0f32, 45.0, 90.0, 135.0] {
            for azimuth in [0.0f32, 30.0, 200.0] {
                let direction = direction_from_eulers(Vec3::new(0.0, polar, azimuth));
                assert!((direction.length() - 1.0).abs() < 1e-5);
            }
        }
    }
}
