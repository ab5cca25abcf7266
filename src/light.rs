use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::shading::{DirectionalLightParams, PointLightParams, SpotLightParams};
use crate::transform::direction_from_eulers;

/// Sun-style light without a position; orientation comes from euler angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    /// Euler angles in degrees orienting the beam.
    pub eulers: Vec3,
    /// Linear radiance.
    pub color: Vec3,
}

impl DirectionalLight {
    pub fn new(eulers: Vec3, color: Vec3) -> Self {
        Self { eulers, color }
    }

    /// Unit vector pointing from the light toward the scene.
    pub fn direction(&self) -> Vec3 {
        direction_from_eulers(self.eulers)
    }

    /// Populates this light's parameter-block slot.
    pub fn params(&self) -> DirectionalLightParams {
        DirectionalLightParams::new(self.direction(), self.color)
    }
}

/// Cone light with a position, an orientation and a half-cone angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    pub position: Vec3,
    /// Euler angles in degrees orienting the cone axis.
    pub eulers: Vec3,
    /// Linear radiance.
    pub color: Vec3,
    /// Half-cone angle in degrees.
    pub angle: f32,
}

impl SpotLight {
    pub fn new(position: Vec3, eulers: Vec3, color: Vec3, angle: f32) -> Self {
        Self {
            position,
            eulers,
            color,
            angle,
        }
    }

    /// Unit vector pointing from the light toward the scene.
    pub fn direction(&self) -> Vec3 {
        direction_from_eulers(self.eulers)
    }

    /// Populates this light's parameter-block slot; the angle is converted
    /// to radians for the shading stage.
    pub fn params(&self) -> SpotLightParams {
        SpotLightParams::new(
            self.position,
            self.direction(),
            self.color,
            self.angle.to_radians(),
        )
    }
}

/// Omnidirectional light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    /// Linear radiance.
    pub color: Vec3,
}

impl PointLight {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }

    /// Populates this light's parameter-block slot.
    pub fn params(&self) -> PointLightParams {
        PointLightParams::new(self.position, self.color)
    }
}

/// Any light source a preview scene can hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Light {
    Directional(DirectionalLight),
    Spot(SpotLight),
    Point(PointLight),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_params_carry_the_derived_direction() {
        let light = DirectionalLight::new(Vec3::new(0.0, 180.0, 0.0), Vec3::ONE);
        let params = light.params();
        let direction = Vec3::from_array(params.direction);
        assert!(direction.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), 1e-6));
        assert_eq!(params.color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn spot_angle_is_converted_to_radians() {
        let light = SpotLight::new(
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::new(0.0, 180.0, 0.0),
            Vec3::ONE,
            45.0,
        );
        let params = light.params();
        assert!((params.angle - 45.0f32.to_radians()).abs() < 1e-6);
        assert_eq!(params.position, [0.0, 3.0, 0.0]);
    }

    #[test]
    fn point_params_copy_position_and_color() {
        let light = PointLight::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.2, 0.4, 0.6));
        let params = light.params();
        assert_eq!(params.position, [1.0, 2.0, 3.0]);
        assert_eq!(params.color, [0.2, 0.4, 0.6]);
    }
}
