//! Shared shading parameter schema.
//!
//! The records here form the binary contract between host code and the WGSL
//! shading stage: fixed-layout, explicitly padded `#[repr(C)]` blocks that
//! are uploaded with [`bytemuck`] and read verbatim on the device. The Rust
//! definitions are the single canonical layout; the shader source is
//! generated from them by [`shader_source`] so the two sides cannot drift.
//!
//! Light arrays are fixed-capacity. A draw always uploads the full arrays
//! and a [`LightCount`] block whose counters bound the valid prefix of each
//! array; slots past a counter are zeroed and must not be read.

mod params;
mod shader;

pub use params::{
    CameraParams, DirectionalLightParams, LightCount, PointLightParams, SpotLightParams,
    MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};
pub use shader::shader_source;

use bytemuck::Zeroable;
use thiserror::Error;

/// Error raised when a draw carries more lights of one kind than the fixed
/// arrays can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{requested} {kind} lights exceed the fixed capacity of {capacity}")]
pub struct LightOverflow {
    pub kind: &'static str,
    pub requested: usize,
    pub capacity: usize,
}

/// Host-side staging area for one draw's light parameter blocks.
///
/// The arrays always span the full capacity so they can be uploaded as-is;
/// `count` bounds the prefix that holds meaningful entries and slots past it
/// stay zeroed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightPack {
    pub directional: [DirectionalLightParams; MAX_DIRECTIONAL_LIGHTS],
    pub spot: [SpotLightParams; MAX_SPOT_LIGHTS],
    pub point: [PointLightParams; MAX_POINT_LIGHTS],
    pub count: LightCount,
}

impl LightPack {
    /// Pack with every slot zeroed and all counters at zero.
    pub fn new() -> Self {
        Self {
            directional: Zeroable::zeroed(),
            spot: Zeroable::zeroed(),
            point: Zeroable::zeroed(),
            count: LightCount::default(),
        }
    }

    /// Writes a directional light into the next free slot, in arrival order.
    pub fn push_directional(&mut self, block: DirectionalLightParams) -> Result<(), LightOverflow> {
        let slot = self.count.direction as usize;
        if slot >= MAX_DIRECTIONAL_LIGHTS {
            return Err(LightOverflow {
                kind: "directional",
                requested: slot + 1,
                capacity: MAX_DIRECTIONAL_LIGHTS,
            });
        }
        self.directional[slot] = block;
        self.count.direction += 1;
        Ok(())
    }

    /// Writes a spot light into the next free slot, in arrival order.
    pub fn push_spot(&mut self, block: SpotLightParams) -> Result<(), LightOverflow> {
        let slot = self.count.spot as usize;
        if slot >= MAX_SPOT_LIGHTS {
            return Err(LightOverflow {
                kind: "spot",
                requested: slot + 1,
                capacity: MAX_SPOT_LIGHTS,
            });
        }
        self.spot[slot] = block;
        self.count.spot += 1;
        Ok(())
    }

    /// Writes a point light into the next free slot, in arrival order.
    pub fn push_point(&mut self, block: PointLightParams) -> Result<(), LightOverflow> {
        let slot = self.count.point as usize;
        if slot >= MAX_POINT_LIGHTS {
            return Err(LightOverflow {
                kind: "point",
                requested: slot + 1,
                capacity: MAX_POINT_LIGHTS,
            });
        }
        self.point[slot] = block;
        self.count.point += 1;
        Ok(())
    }

    /// Valid prefix of the directional array, exactly `count.direction` long.
    pub fn active_directional(&self) -> &[DirectionalLightParams] {
        &self.directional[..self.count.direction as usize]
    }

    /// Valid prefix of the spot array, exactly `count.spot` long.
    pub fn active_spot(&self) -> &[SpotLightParams] {
        &self.spot[..self.count.spot as usize]
    }

    /// Valid prefix of the point array, exactly `count.point` long.
    pub fn active_point(&self) -> &[PointLightParams] {
        &self.point[..self.count.point as usize]
    }
}

impl Default for LightPack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn directional(axis: f32) -> DirectionalLightParams {
        DirectionalLightParams::new(Vec3::new(axis, -1.0, 0.0).normalize(), Vec3::ONE)
    }

    #[test]
    fn counters_track_the_number_of_pushed_lights() {
        let mut pack = LightPack::new();
        pack.push_directional(directional(0.0)).unwrap();
        pack.push_directional(directional(1.0)).unwrap();
        pack.push_spot(SpotLightParams::new(
            Vec3::ZERO,
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::ONE,
            0.5,
        ))
        .unwrap();

        assert_eq!(pack.count.direction, 2);
        assert_eq!(pack.count.spot, 1);
        assert_eq!(pack.count.point, 0);
        assert_eq!(pack.active_directional().len(), 2);
        assert_eq!(pack.active_spot().len(), 1);
        assert!(pack.active_point().is_empty());
    }

    #[test]
    fn an_empty_pack_reports_zero_everywhere() {
        let pack = LightPack::new();
        assert_eq!(pack.count.total(), 0);
        assert!(pack.active_directional().is_empty());
        assert!(pack.active_spot().is_empty());
        assert!(pack.active_point().is_empty());
    }

    #[test]
    fn slots_past_the_counter_stay_zeroed() {
        let mut pack = LightPack::new();
        pack.push_point(PointLightParams::new(Vec3::splat(2.0), Vec3::ONE))
            .unwrap();

        for slot in &pack.point[pack.count.point as usize..] {
            assert_eq!(*slot, PointLightParams::new(Vec3::ZERO, Vec3::ZERO));
        }
    }

    #[test]
    fn pushing_past_capacity_is_rejected() {
        let mut pack = LightPack::new();
        for _ in 0..MAX_DIRECTIONAL_LIGHTS {
            pack.push_directional(directional(0.0)).unwrap();
        }

        let err = pack.push_directional(directional(0.0)).unwrap_err();
        assert_eq!(err.kind, "directional");
        assert_eq!(err.capacity, MAX_DIRECTIONAL_LIGHTS);
        assert_eq!(pack.count.direction as usize, MAX_DIRECTIONAL_LIGHTS);
    }

    #[test]
    fn arrival_order_is_preserved() {
        let mut pack = LightPack::new();
        let first = PointLightParams::new(Vec3::new(1.0, 0.0, 0.0), Vec3::X);
        let second = PointLightParams::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        pack.push_point(first).unwrap();
        pack.push_point(second).unwrap();

        assert_eq!(pack.active_point(), &[first, second]);
    }
}
