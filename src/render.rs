use std::collections::{HashMap, HashSet};
use std::mem;
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytemuck::{bytes_of, cast_slice, Pod, Zeroable};
use glam::Mat3;
use log::error;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowId};

use crate::obj::{load_obj_from_str, ObjMesh, Vertex};
use crate::scene::SceneObject;
use crate::shading::{
    shader_source, CameraParams, DirectionalLightParams, LightCount, LightPack, PointLightParams,
    SpotLightParams, MAX_DIRECTIONAL_LIGHTS, MAX_POINT_LIGHTS, MAX_SPOT_LIGHTS,
};

/// GPU renderer backed by wgpu that draws a scene snapshot with the shared
/// parameter blocks bound at fixed slots.
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth: DepthBuffer,
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    directional_buffer: wgpu::Buffer,
    spot_buffer: wgpu::Buffer,
    point_buffer: wgpu::Buffer,
    count_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    mesh_cache: HashMap<String, MeshBuffers>,
    missing_meshes: HashSet<String>,
    asset_root: PathBuf,
    default_mesh: MeshBuffers,
}

impl Renderer {
    /// Initializes the GPU renderer for the provided window; meshes are
    /// loaded relative to `asset_root`.
    pub async fn new(window: Arc<Window>, asset_root: PathBuf) -> Result<Self> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(anyhow!("window has zero area"));
        }

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to acquire GPU adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("preview-device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|mode| {
                    matches!(
                        mode,
                        wgpu::PresentMode::Mailbox | wgpu::PresentMode::Immediate
                    )
                })
                .unwrap_or(wgpu::PresentMode::Fifo),
            desired_maximum_frame_latency: 2,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let depth = DepthBuffer::create(&device, config.width, config.height);

        let source = shader_source();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("preview-shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        // The frame bind group mirrors the schema: camera block, one array
        // per light kind, then the counters.
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame-bind-layout"),
            entries: &[
                uniform_entry(0, mem::size_of::<CameraParams>()),
                uniform_entry(
                    1,
                    mem::size_of::<[DirectionalLightParams; MAX_DIRECTIONAL_LIGHTS]>(),
                ),
                uniform_entry(2, mem::size_of::<[SpotLightParams; MAX_SPOT_LIGHTS]>()),
                uniform_entry(3, mem::size_of::<[PointLightParams; MAX_POINT_LIGHTS]>()),
                uniform_entry(4, mem::size_of::<LightCount>()),
            ],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("object-bind-layout"),
            entries: &[uniform_entry(0, mem::size_of::<ObjectParams>())],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("preview-pipeline-layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let camera_buffer = uniform_buffer(&device, "camera-params", mem::size_of::<CameraParams>());
        let directional_buffer = uniform_buffer(
            &device,
            "directional-lights",
            mem::size_of::<[DirectionalLightParams; MAX_DIRECTIONAL_LIGHTS]>(),
        );
        let spot_buffer = uniform_buffer(
            &device,
            "spot-lights",
            mem::size_of::<[SpotLightParams; MAX_SPOT_LIGHTS]>(),
        );
        let point_buffer = uniform_buffer(
            &device,
            "point-lights",
            mem::size_of::<[PointLightParams; MAX_POINT_LIGHTS]>(),
        );
        let count_buffer = uniform_buffer(&device, "light-count", mem::size_of::<LightCount>());

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame-bind-group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: directional_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: spot_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: point_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: count_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("preview-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::layout()],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        let default_mesh = MeshBuffers::from_mesh(&device, &default_cube(), "default-cube");

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            depth,
            pipeline,
            camera_buffer,
            directional_buffer,
            spot_buffer,
            point_buffer,
            count_buffer,
            frame_bind_group,
            object_layout,
            mesh_cache: HashMap::new(),
            missing_meshes: HashSet::new(),
            asset_root,
            default_mesh,
        })
    }

    /// Returns the identifier of the window owned by the renderer.
    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    /// Exposes the inner window for event handling.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Resizes the swap chain to match the new dimensions.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth = DepthBuffer::create(&self.device, new_size.width, new_size.height);
    }

    /// Writes the camera block and the light arrays plus counters for the
    /// next draw. The queue orders these writes before any subsequently
    /// submitted render pass, so the shading stage always reads a fully
    /// written parameter set.
    pub fn upload_frame(&self, camera: &CameraParams, lights: &LightPack) {
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytes_of(camera));
        self.queue
            .write_buffer(&self.directional_buffer, 0, cast_slice(&lights.directional));
        self.queue
            .write_buffer(&self.spot_buffer, 0, cast_slice(&lights.spot));
        self.queue
            .write_buffer(&self.point_buffer, 0, cast_slice(&lights.point));
        self.queue
            .write_buffer(&self.count_buffer, 0, bytes_of(&lights.count));
    }

    /// Draws the meshes in the provided scene snapshot.
    pub fn render(&mut self, objects: &[SceneObject]) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("preview-encoder"),
            });

        // Make sure every referenced mesh is resident before the pass.
        for object in objects {
            if let Some(name) = object.mesh.as_deref() {
                self.ensure_mesh_loaded(name);
            }
        }

        let bind_groups: Vec<(Option<&str>, wgpu::BindGroup)> = objects
            .iter()
            .map(|object| {
                let constants = ObjectParams::new(object);
                let buffer = self
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("object-params"),
                        contents: bytes_of(&constants),
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    });
                let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("object-bind-group"),
                    layout: &self.object_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                (object.mesh.as_deref(), bind_group)
            })
            .collect();

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("main-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: 0.5,
                        g: 0.5,
                        b: 0.5,
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);

        for (mesh_name, bind_group) in &bind_groups {
            let mesh = mesh_name
                .and_then(|name| self.mesh_cache.get(name))
                .unwrap_or(&self.default_mesh);

            pass.set_vertex_buffer(0, mesh.vertex.slice(..));
            pass.set_index_buffer(mesh.index.slice(..), wgpu::IndexFormat::Uint32);
            pass.set_bind_group(1, bind_group, &[]);
            pass.draw_indexed(0..mesh.index_count, 0, 0..1);
        }

        drop(pass); // explicit to satisfy lifetimes on some backends
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn ensure_mesh_loaded(&mut self, name: &str) {
        if self.mesh_cache.contains_key(name) || self.missing_meshes.contains(name) {
            return;
        }
        match self.load_mesh(name) {
            Ok(mesh) => {
                self.mesh_cache.insert(name.to_string(), mesh);
            }
            Err(err) => {
                error!("failed to load mesh {name}: {err:?}");
                self.missing_meshes.insert(name.to_string());
            }
        }
    }

    fn load_mesh(&self, name: &str) -> Result<MeshBuffers> {
        let path = self.asset_root.join(name);
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("unable to read mesh {}", path.display()))?;
        let mesh = load_obj_from_str(&contents)
            .with_context(|| format!("failed to parse OBJ mesh {name}"))?;
        Ok(MeshBuffers::from_mesh(&self.device, &mesh, name))
    }
}

fn uniform_entry(binding: u32, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(size as u64),
        },
        count: None,
    }
}

fn uniform_buffer(device: &wgpu::Device, label: &str, size: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: size as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Per-object constants bound in group 1.
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ObjectParams {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 3],
    color: [f32; 4],
}

impl ObjectParams {
    fn new(object: &SceneObject) -> Self {
        let model = object.transform.matrix();
        let normal = Mat3::from_mat4(model).inverse().transpose();
        Self {
            model: model.to_cols_array_2d(),
            normal: mat3_to_3x4(normal),
            color: object.color.extend(1.0).into(),
        }
    }
}

fn mat3_to_3x4(matrix: Mat3) -> [[f32; 4]; 3] {
    let cols = matrix.to_cols_array();
    [
        [cols[0], cols[1], cols[2], 0.0],
        [cols[3], cols[4], cols[5], 0.0],
        [cols[6], cols[7], cols[8], 0.0],
    ]
}

struct MeshBuffers {
    vertex: wgpu::Buffer,
    index: wgpu::Buffer,
    index_count: u32,
}

impl MeshBuffers {
    fn from_mesh(device: &wgpu::Device, mesh: &ObjMesh, label: &str) -> Self {
        let vertex = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-vertices")),
            contents: cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label}-indices")),
            contents: cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex,
            index,
            index_count: mesh.indices.len() as u32,
        }
    }
}

struct DepthBuffer {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthBuffer {
    const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24Plus;

    fn create(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth-texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

fn default_cube() -> ObjMesh {
    let vertices = DEFAULT_CUBE_VERTICES
        .chunks_exact(6)
        .map(|chunk| Vertex {
            position: [chunk[0], chunk[1], chunk[2]],
            normal: [chunk[3], chunk[4], chunk[5]],
        })
        .collect();
    ObjMesh {
        vertices,
        indices: DEFAULT_CUBE_INDICES.to_vec(),
    }
}

const DEFAULT_CUBE_VERTICES: &[f32] = &[
    // positions        // normals
    -0.5, -0.5, 0.5, 0.0, 0.0, 1.0, 0.5, -0.5, 0.5, 0.0, 0.0, 1.0, 0.5, 0.5, 0.5, 0.0, 0.0, 1.0,
    -0.5, 0.5, 0.5, 0.0, 0.0, 1.0, -0.5, -0.5, -0.5, 0.0, 0.0, -1.0, 0.5, -0.5, -0.5, 0.0, 0.0,
    -1.0, 0.5, 0.5, -0.5, 0.0, 0.0, -1.0, -0.5, 0.5, -0.5, 0.0, 0.0, -1.0, -0.5, -0.5, -0.5, -1.0,
    0.0, 0.0, -0.5, -0.5, 0.5, -1.0, 0.0, 0.0, -0.5, 0.5, 0.5, -1.0, 0.0, 0.0, -0.5, 0.5, -0.5,
    -1.0, 0.0, 0.0, 0.5, -0.5, -0.5, 1.0, 0.0, 0.0, 0.5, -0.5, 0.5, 1.0, 0.0, 0.0, 0.5, 0.5, 0.5,
    1.0, 0.0, 0.0, 0.5, 0.5, -0.5, 1.0, 0.0, 0.0, -0.5, -0.5, -0.5, 0.0, -1.0, 0.0, 0.5, -0.5,
    -0.5, 0.0, -1.0, 0.0, 0.5, -0.5, 0.5, 0.0, -1.0, 0.0, -0.5, -0.5, 0.5, 0.0, -1.0, 0.0, -0.5,
    0.5, -0.5, 0.0, 1.0, 0.0, 0.5, 0.5, -0.5, 0.0, 1.0, 0.0, 0.5, 0.5, 0.5, 0.0, 1.0, 0.0, -0.5,
    0.5, 0.5, 0.0, 1.0, 0.0,
];

const DEFAULT_CUBE_INDICES: &[u32] = &[
    0, 1, 2, 0, 2, 3, // front
    4, 6, 5, 4, 7, 6, // back
    8, 9, 10, 8, 10, 11, // left
    12, 14, 13, 12, 15, 14, // right
    16, 18, 17, 16, 19, 18, // bottom
    20, 21, 22, 20, 22, 23, // top
];

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};

    #[test]
    fn object_params_from_an_identity_transform() {
        let object = SceneObject::default();
        let params = ObjectParams::new(&object);
        assert_eq!(params.model, Mat4::IDENTITY.to_cols_array_2d());
        assert_eq!(params.normal, mat3_to_3x4(Mat3::IDENTITY));
        assert_eq!(params.color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn normal_matrix_columns_are_padded_to_vec4() {
        let padded = mat3_to_3x4(Mat3::from_diagonal(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(padded[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(padded[1], [0.0, 2.0, 0.0, 0.0]);
        assert_eq!(padded[2], [0.0, 0.0, 3.0, 0.0]);
    }

    #[test]
    fn default_cube_is_a_complete_mesh() {
        let cube = default_cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.indices.len(), 36);
        for vertex in &cube.vertices {
            let normal = Vec3::from_array(vertex.normal);
            assert!((normal.length() - 1.0).abs() < 1e-6);
        }
    }
}
