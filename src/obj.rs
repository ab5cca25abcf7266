use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Interleaved vertex consumed by the preview pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout matching the shader's vertex inputs.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// GPU-ready mesh produced from an OBJ file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Triangle corner as referenced by an OBJ face directive. Indices are kept
/// in OBJ form: one-based, negative for relative references, zero when
/// absent.
#[derive(Debug, Clone, Copy)]
struct Corner {
    position: i32,
    normal: i32,
}

/// Parses an OBJ document from memory.
///
/// Faces are fan-triangulated and vertices deduplicated per position/normal
/// pair. Files without normals get area-weighted generated ones. Texture
/// coordinates are accepted but not retained; the preview pipeline shades
/// from base colors.
pub fn load_obj_from_str(data: &str) -> Result<ObjMesh> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut corners: Vec<Corner> = Vec::new();

    for (line_no, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };
        match tag {
            "v" => positions.push(
                parse_vec3(parts)
                    .with_context(|| format!("invalid vertex on line {}", line_no + 1))?,
            ),
            "vn" => normals.push(
                parse_vec3(parts)
                    .with_context(|| format!("invalid normal on line {}", line_no + 1))?,
            ),
            "f" => {
                let polygon = parse_face(parts)
                    .with_context(|| format!("invalid face on line {}", line_no + 1))?;
                for i in 1..polygon.len() - 1 {
                    corners.extend([polygon[0], polygon[i], polygon[i + 1]]);
                }
            }
            _ => {}
        }
    }

    if positions.is_empty() {
        return Err(anyhow!("OBJ file does not define any vertices"));
    }

    let mut mesh = assemble(&positions, &normals, &corners)?;
    if mesh
        .vertices
        .iter()
        .any(|vertex| vertex.normal == [0.0; 3])
    {
        generate_normals(&mut mesh);
    }
    Ok(mesh)
}

fn parse_vec3<'a>(mut parts: impl Iterator<Item = &'a str>) -> Result<Vec3> {
    let mut component = || -> Result<f32> {
        Ok(parts
            .next()
            .ok_or_else(|| anyhow!("missing vector component"))?
            .parse::<f32>()?)
    };
    Ok(Vec3::new(component()?, component()?, component()?))
}

fn parse_face<'a>(parts: impl Iterator<Item = &'a str>) -> Result<Vec<Corner>> {
    let mut polygon = Vec::new();
    for part in parts {
        let mut refs = part.split('/');
        let position = refs
            .next()
            .ok_or_else(|| anyhow!("missing vertex index"))?
            .parse::<i32>()?;
        // The middle segment is the texture coordinate; skip it.
        let normal = refs
            .nth(1)
            .filter(|segment| !segment.is_empty())
            .map(str::parse::<i32>)
            .transpose()
            .unwrap_or(Some(0))
            .unwrap_or(0);
        polygon.push(Corner { position, normal });
    }
    if polygon.len() < 3 {
        return Err(anyhow!("faces must reference at least 3 vertices"));
    }
    Ok(polygon)
}

fn assemble(positions: &[Vec3], normals: &[Vec3], corners: &[Corner]) -> Result<ObjMesh> {
    let mut lookup: HashMap<(usize, Option<usize>), u32> = HashMap::new();
    let mut mesh = ObjMesh::default();

    for corner in corners {
        let position = resolve_index(corner.position, positions.len())
            .ok_or_else(|| anyhow!("face references vertex {} out of range", corner.position))?;
        let normal = resolve_index(corner.normal, normals.len());
        let index = match lookup.get(&(position, normal)) {
            Some(&index) => index,
            None => {
                let index = mesh.vertices.len() as u32;
                mesh.vertices.push(Vertex {
                    position: positions[position].to_array(),
                    normal: normal.map(|i| normals[i]).unwrap_or(Vec3::ZERO).to_array(),
                });
                lookup.insert((position, normal), index);
                index
            }
        };
        mesh.indices.push(index);
    }

    Ok(mesh)
}

/// Converts a one-based (or negative, relative) OBJ index into a zero-based
/// offset, rejecting anything outside the referenced list.
fn resolve_index(index: i32, len: usize) -> Option<usize> {
    if index > 0 {
        let zero_based = index as usize - 1;
        (zero_based < len).then_some(zero_based)
    } else if index < 0 {
        let back = (-index) as usize;
        (back <= len).then(|| len - back)
    } else {
        None
    }
}

fn generate_normals(mesh: &mut ObjMesh) {
    let mut accum = vec![Vec3::ZERO; mesh.vertices.len()];

    for triangle in mesh.indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        let p0 = Vec3::from_array(mesh.vertices[i0].position);
        let p1 = Vec3::from_array(mesh.vertices[i1].position);
        let p2 = Vec3::from_array(mesh.vertices[i2].position);
        let normal = (p1 - p0).cross(p2 - p0);
        if normal.length_squared() > f32::EPSILON {
            let normal = normal.normalize();
            accum[i0] += normal;
            accum[i1] += normal;
            accum[i2] += normal;
        }
    }

    for (vertex, normal) in mesh.vertices.iter_mut().zip(accum) {
        vertex.normal = normal.normalize_or_zero().to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_simple_triangle() {
        let obj = "\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = load_obj_from_str(obj).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertices.len(), 3);
    }

    #[test]
    fn quads_are_fan_triangulated() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = load_obj_from_str(obj).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(mesh.vertices.len(), 4);
    }

    #[test]
    fn negative_indices_reference_from_the_end() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = load_obj_from_str(obj).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }

    #[test]
    fn missing_normals_are_generated_unit_length() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = load_obj_from_str(obj).unwrap();
        for vertex in &mesh.vertices {
            let normal = Vec3::from_array(vertex.normal);
            assert!((normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn declared_normals_are_kept() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let mesh = load_obj_from_str(obj).unwrap();
        assert!(mesh
            .vertices
            .iter()
            .all(|vertex| vertex.normal == [0.0, 0.0, 1.0]));
    }

    #[test]
    fn out_of_range_face_index_is_an_error() {
        let obj = "v 0 0 0\nf 1 2 3\n";
        assert!(load_obj_from_str(obj).is_err());
    }

    #[test]
    fn empty_files_are_rejected() {
        assert!(load_obj_from_str("# nothing here\n").is_err());
    }
}
