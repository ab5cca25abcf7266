//! Core building blocks for a portable 3D model preview runtime.
//!
//! The crate centers on the [`shading`] module: fixed-layout parameter
//! blocks for camera state and light sources that host code uploads and the
//! WGSL shading stage reads verbatim, together with the counters that bound
//! how many light-array entries a draw may touch. The remaining modules are
//! the producers and consumers of those blocks: the scene model, the OBJ
//! mesh loader and a wgpu renderer. Window and event-loop plumbing stays in
//! the binary so the library remains testable and easy to embed in headless
//! tools.

pub mod camera;
pub mod light;
pub mod obj;
pub mod render;
pub mod scene;
pub mod shading;
pub mod transform;

pub use camera::{Camera, WORLD_UP};
pub use light::{DirectionalLight, Light, PointLight, SpotLight};
pub use obj::{load_obj_from_str, ObjMesh, Vertex};
pub use render::Renderer;
pub use scene::{Scene, SceneObject};
pub use shading::{
    shader_source, CameraParams, DirectionalLightParams, LightCount, LightOverflow, LightPack,
    PointLightParams, SpotLightParams, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};
pub use transform::{direction_from_eulers, Transform};
