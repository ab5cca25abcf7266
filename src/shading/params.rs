use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Number of directional-light slots allocated per draw.
///
/// Shared by the host-side buffer allocation and the generated shader; the
/// `direction` counter in [`LightCount`] never exceeds it.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Number of spot-light slots allocated per draw.
pub const MAX_SPOT_LIGHTS: usize = 8;

/// Number of point-light slots allocated per draw.
pub const MAX_POINT_LIGHTS: usize = 8;

/// Camera parameter block read by the vertex stage.
///
/// Matrices are stored as four column vectors of four floats each. `view` is
/// the inverse of the transform placing the camera at `position`, so
/// `view⁻¹ · origin = position` holds for every populated block.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraParams {
    /// Camera position in world space.
    pub position: [f32; 3],
    pub _padding: u32,
    /// World-to-view transform.
    pub view: [[f32; 4]; 4],
    /// View-to-clip transform.
    pub projection: [[f32; 4]; 4],
}

impl CameraParams {
    pub fn new(position: Vec3, view: Mat4, projection: Mat4) -> Self {
        Self {
            position: position.to_array(),
            _padding: 0,
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
        }
    }
}

/// Directional-light slot in the per-draw light array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DirectionalLightParams {
    /// Unit vector pointing from the light toward the scene, world space.
    pub direction: [f32; 3],
    pub _padding: u32,
    /// Linear radiance, components >= 0.
    pub color: [f32; 3],
    pub _padding2: u32,
}

impl DirectionalLightParams {
    pub fn new(direction: Vec3, color: Vec3) -> Self {
        Self {
            direction: direction.to_array(),
            _padding: 0,
            color: color.to_array(),
            _padding2: 0,
        }
    }
}

/// Spot-light slot in the per-draw light array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SpotLightParams {
    /// Apex of the cone in world space.
    pub position: [f32; 3],
    pub _padding: u32,
    /// Unit vector pointing from the light toward the scene, world space.
    pub direction: [f32; 3],
    pub _padding2: u32,
    /// Linear radiance, components >= 0.
    pub color: [f32; 3],
    /// Half-cone angle in radians, 0 < angle <= π/2.
    pub angle: f32,
}

impl SpotLightParams {
    pub fn new(position: Vec3, direction: Vec3, color: Vec3, angle: f32) -> Self {
        Self {
            position: position.to_array(),
            _padding: 0,
            direction: direction.to_array(),
            _padding2: 0,
            color: color.to_array(),
            angle,
        }
    }
}

/// Point-light slot in the per-draw light array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLightParams {
    pub position: [f32; 3],
    pub _padding: u32,
    pub color: [f32; 3],
    pub _padding2: u32,
}

impl PointLightParams {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: position.to_array(),
            _padding: 0,
            color: color.to_array(),
            _padding2: 0,
        }
    }
}

/// Per-draw light counters.
///
/// Each counter is the number of valid entries at the front of the matching
/// light array; the shading stage iterates exactly that many slots and never
/// reads past them. Zero counters are valid and mean the kind is absent.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct LightCount {
    pub direction: u32,
    pub spot: u32,
    pub point: u32,
    pub _padding: u32,
}

impl LightCount {
    /// Total number of lights across all kinds.
    pub fn total(&self) -> u32 {
        self.direction + self.spot + self.point
    }
}
