use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::light::{DirectionalLight, Light, PointLight, SpotLight};
use crate::shading::{LightOverflow, LightPack};
use crate::transform::Transform;

/// Runtime representation of a preview scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Scene {
    pub camera: Camera,
    pub objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
}

impl Scene {
    /// Creates an empty scene with a default camera.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the scene XML produced by the authoring tools.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid scene XML")?;
        let root = document.root_element();
        let mut scene = Scene::new();

        for node in root.children().filter(|node| node.is_element()) {
            match node.tag_name().name() {
                "camera" => scene.camera = parse_camera(&node)?,
                "object" => scene.objects.push(parse_object(&node)?),
                "light" => scene.lights.push(parse_light(&node)?),
                other => return Err(anyhow!("unknown scene element <{other}>")),
            }
        }

        Ok(scene)
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    /// Removes the first object with the given name.
    pub fn remove_object(&mut self, name: &str) -> bool {
        match self.objects.iter().position(|object| object.name == name) {
            Some(index) => {
                self.objects.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn remove_light(&mut self, index: usize) -> Option<Light> {
        (index < self.lights.len()).then(|| self.lights.remove(index))
    }

    /// Packs every scene light into the fixed-capacity parameter arrays, in
    /// arrival order.
    pub fn light_pack(&self) -> Result<LightPack, LightOverflow> {
        let mut pack = LightPack::new();
        for light in &self.lights {
            match light {
                Light::Directional(light) => pack.push_directional(light.params())?,
                Light::Spot(light) => pack.push_spot(light.params())?,
                Light::Point(light) => pack.push_point(light.params())?,
            }
        }
        Ok(pack)
    }
}

/// Mesh instance described by the authoring tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,
    /// Linear base color.
    #[serde(default = "default_color")]
    pub color: Vec3,
    #[serde(default)]
    pub transform: Transform,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            name: String::new(),
            mesh: None,
            color: default_color(),
            transform: Transform::origin(),
        }
    }
}

fn default_color() -> Vec3 {
    Vec3::ONE
}

fn parse_camera(node: &Node<'_, '_>) -> Result<Camera> {
    let mut camera = Camera::default();
    camera.transform.position = parse_vec3(
        optional_text(node, "position"),
        camera.transform.position,
    )?;
    camera.transform.eulers =
        parse_vec3(optional_text(node, "eulers"), camera.transform.eulers)?;
    camera.fovy = parse_f32(optional_text(node, "fov"), camera.fovy)?;
    camera.near = parse_f32(optional_text(node, "near"), camera.near)?;
    camera.far = parse_f32(optional_text(node, "far"), camera.far)?;
    if let Some(text) = optional_text(node, "target") {
        camera.target = Some(parse_vec3(Some(text), Vec3::ZERO)?);
    }
    Ok(camera)
}

fn parse_object(node: &Node<'_, '_>) -> Result<SceneObject> {
    let mut object = SceneObject::default();
    object.name = required_text(node, "name")?;
    object.mesh = optional_text(node, "mesh");
    object.color = parse_vec3(optional_text(node, "color"), object.color)?;
    object.transform.position = parse_vec3(optional_text(node, "position"), Vec3::ZERO)?;
    object.transform.eulers = parse_vec3(optional_text(node, "eulers"), Vec3::ZERO)?;
    object.transform.scale = parse_vec3(optional_text(node, "scale"), Vec3::ONE)?;
    Ok(object)
}

fn parse_light(node: &Node<'_, '_>) -> Result<Light> {
    let kind = required_text(node, "kind")?;
    let color = parse_vec3(optional_text(node, "color"), Vec3::ONE)?;
    let eulers = parse_vec3(optional_text(node, "eulers"), Vec3::ZERO)?;
    let position = parse_vec3(optional_text(node, "position"), Vec3::ZERO)?;

    match kind.as_str() {
        "directional" => Ok(Light::Directional(DirectionalLight::new(eulers, color))),
        "spot" => {
            let angle = parse_f32(optional_text(node, "angle"), 30.0)?;
            Ok(Light::Spot(SpotLight::new(position, eulers, color, angle)))
        }
        "point" => Ok(Light::Point(PointLight::new(position, color))),
        other => Err(anyhow!("unknown light kind {other:?}")),
    }
}

fn required_text(node: &Node<'_, '_>, tag: &str) -> Result<String> {
    optional_text(node, tag).ok_or_else(|| anyhow!("<{tag}> tag is missing"))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_vec3(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    let mut numbers = value
        .split_whitespace()
        .filter_map(|component| component.parse::<f32>().ok());
    let x = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    let y = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    let z = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    Ok(Vec3::new(x, y, z))
}

fn parse_f32(value: Option<String>, default: f32) -> Result<f32> {
    match value {
        Some(value) => value
            .parse::<f32>()
            .map_err(|err| anyhow!("failed to parse float: {err}")),
        None => Ok(default),
    }
}
