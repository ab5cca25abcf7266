use super::params::{MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS};

/// Returns the WGSL source for the preview pipeline.
///
/// The parameter-block structs mirror the `#[repr(C)]` records in
/// [`params`](super::params) field for field, and the light-array capacities
/// are spliced in from the same constants the host uses to size its uniform
/// buffers, so there is exactly one definition of the layout.
pub fn shader_source() -> String {
    SHADER_TEMPLATE
        .replace(
            "{{MAX_DIRECTIONAL_LIGHTS}}",
            &MAX_DIRECTIONAL_LIGHTS.to_string(),
        )
        .replace("{{MAX_SPOT_LIGHTS}}", &MAX_SPOT_LIGHTS.to_string())
        .replace("{{MAX_POINT_LIGHTS}}", &MAX_POINT_LIGHTS.to_string())
}

const SHADER_TEMPLATE: &str = r#"
struct CameraParams {
    position: vec3<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
}

struct DirectionalLight {
    direction: vec3<f32>,
    color: vec3<f32>,
}

struct SpotLight {
    position: vec3<f32>,
    direction: vec3<f32>,
    color: vec3<f32>,
    angle: f32,
}

struct PointLight {
    position: vec3<f32>,
    color: vec3<f32>,
}

struct LightCount {
    direction: u32,
    spot: u32,
    point: u32,
    _padding: u32,
}

struct ObjectParams {
    model: mat4x4<f32>,
    normal: mat3x4<f32>,
    color: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> camera: CameraParams;

@group(0) @binding(1)
var<uniform> directional_lights: array<DirectionalLight, {{MAX_DIRECTIONAL_LIGHTS}}>;

@group(0) @binding(2)
var<uniform> spot_lights: array<SpotLight, {{MAX_SPOT_LIGHTS}}>;

@group(0) @binding(3)
var<uniform> point_lights: array<PointLight, {{MAX_POINT_LIGHTS}}>;

@group(0) @binding(4)
var<uniform> light_count: LightCount;

@group(1) @binding(0)
var<uniform> object: ObjectParams;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world_position = object.model * vec4<f32>(input.position, 1.0);
    out.position = camera.projection * camera.view * world_position;
    out.world_pos = world_position.xyz;

    let world_normal = mat3x3<f32>(
        object.normal[0].xyz,
        object.normal[1].xyz,
        object.normal[2].xyz
    ) * input.normal;
    out.normal = normalize(world_normal);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let normal = normalize(input.normal);
    let ambient = 0.1;
    var lit = vec3<f32>(0.0);

    for (var i = 0u; i < light_count.direction; i = i + 1u) {
        let light = directional_lights[i];
        lit += max(dot(normal, -light.direction), 0.0) * light.color;
    }

    for (var i = 0u; i < light_count.spot; i = i + 1u) {
        let light = spot_lights[i];
        let to_frag = input.world_pos - light.position;
        let dist_sq = dot(to_frag, to_frag);
        let dir = to_frag / max(sqrt(dist_sq), 1e-4);
        if (dot(dir, light.direction) >= cos(light.angle)) {
            lit += max(dot(normal, -dir), 0.0) * light.color / (1.0 + dist_sq);
        }
    }

    for (var i = 0u; i < light_count.point; i = i + 1u) {
        let light = point_lights[i];
        let to_light = light.position - input.world_pos;
        let dist_sq = dot(to_light, to_light);
        lit += max(dot(normal, normalize(to_light)), 0.0) * light.color / (1.0 + dist_sq);
    }

    let color = (vec3<f32>(ambient) + lit) * object.color.rgb;
    return vec4<f32>(color, object.color.a);
}
"#;
