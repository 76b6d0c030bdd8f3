use std::mem::size_of;

use anyhow::{Context, Result};
use bytemuck::{bytes_of, cast_slice, Pod, Zeroable};
use glam::{Mat4, Vec4};
use log::debug;
use wgpu::util::DeviceExt;

use crate::{
    entity::{Entity, LightKind},
    geometry::{Shape, Vertex},
    scene::{Scene, MAX_LIGHTS},
};

#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
#[repr(C)]
struct LightData {
    /// `w` holds the light kind.
    position: Vec4,
    /// `w` holds the intensity.
    color: Vec4,
}

#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
#[repr(C)]
struct Globals {
    view_proj: Mat4,
    /// `w` holds the elapsed scene time.
    camera_position: Vec4,
    lights: [LightData; MAX_LIGHTS],
    /// `x` holds the light count.
    info: [u32; 4],
}

impl Globals {
    fn new(scene: &Scene, elapsed: f32) -> Self {
        let camera = scene.camera();

        let mut lights = [LightData::default(); MAX_LIGHTS];
        for (slot, light) in lights.iter_mut().zip(scene.lights()) {
            let kind = match light.kind {
                LightKind::Ambient => 0.,
                LightKind::Directional => 1.,
                LightKind::Point => 2.,
            };
            *slot = LightData {
                position: light.position.extend(kind),
                color: Vec4::new(light.color.r, light.color.g, light.color.b, light.intensity),
            };
        }

        Self {
            view_proj: camera.view_projection(),
            camera_position: camera.position.extend(elapsed),
            lights,
            info: [scene.lights().len().min(MAX_LIGHTS) as u32, 0, 0, 0],
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
#[repr(C)]
struct EntityData {
    model: Mat4,
    color: Vec4,
    /// Premultiplied by the emissive intensity.
    emissive: Vec4,
    /// Distortion, distortion speed, roughness, metalness.
    material: Vec4,
}

impl EntityData {
    fn new(entity: &Entity) -> Self {
        let material = entity.material();
        let emissive = material.emissive;

        Self {
            model: entity.transform().matrix(),
            color: Vec4::from(material.color.to_array()),
            emissive: Vec4::new(emissive.r, emissive.g, emissive.b, 0.) * material.emissive_intensity,
            material: Vec4::new(
                material.distort,
                material.distort_speed,
                material.roughness,
                material.metalness,
            ),
        }
    }
}

struct GpuMesh {
    shape: Shape,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

struct Draw {
    mesh: usize,
    entity: u32,
}

/// GPU state that lives exactly as long as one mounted scene.
struct SceneResources {
    meshes: Vec<GpuMesh>,
    opaque: Vec<Draw>,
    translucent: Vec<Draw>,
    entity_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct MeshRenderer {
    globals_buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    resources: Option<SceneResources>,
    scratch: Vec<EntityData>,
}

impl MeshRenderer {
    /// Uploads the geometry of `scene`. Entities sharing a shape share one
    /// mesh.
    pub fn prepare(&mut self, device: &wgpu::Device, scene: &Scene) {
        let mut meshes: Vec<GpuMesh> = Vec::new();
        let mut opaque = Vec::new();
        let mut translucent = Vec::new();

        for (index, entity) in scene.entities().iter().enumerate() {
            let mesh = match meshes.iter().position(|m| m.shape == *entity.shape()) {
                Some(mesh) => mesh,
                None => {
                    meshes.push(upload_mesh(device, *entity.shape()));
                    meshes.len() - 1
                }
            };
            let draw = Draw {
                mesh,
                entity: index as u32,
            };
            if entity.material().is_translucent() {
                translucent.push(draw);
            } else {
                opaque.push(draw);
            }
        }
        debug!(
            "Uploaded {} meshes for {} entities",
            meshes.len(),
            scene.entities().len()
        );

        let entity_count = scene.entities().len().max(1);
        let entity_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Entity Storage Buffer"),
            size: (entity_count * size_of::<EntityData>()) as _,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Mesh Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: entity_buffer.as_entire_binding(),
                },
            ],
        });

        self.scratch = Vec::with_capacity(scene.entities().len());
        self.resources = Some(SceneResources {
            meshes,
            opaque,
            translucent,
            entity_buffer,
            bind_group,
        });
    }

    pub fn update(&mut self, queue: &wgpu::Queue, scene: &Scene, elapsed: f32) {
        let resources = match &mut self.resources {
            Some(resources) => resources,
            None => return,
        };
        sort_back_to_front(&mut resources.translucent, scene);

        queue.write_buffer(
            &self.globals_buffer,
            0,
            bytes_of(&Globals::new(scene, elapsed)),
        );

        self.scratch.clear();
        self.scratch
            .extend(scene.entities().iter().map(EntityData::new));
        if !self.scratch.is_empty() {
            queue.write_buffer(&resources.entity_buffer, 0, cast_slice(&self.scratch));
        }
    }

    pub fn release(&mut self) {
        self.resources = None;
        self.scratch = Vec::new();
    }

    pub fn draw_opaque<'rpass>(&'rpass self, rpass: &mut impl wgpu::util::RenderEncoder<'rpass>) {
        if let Some(resources) = &self.resources {
            Self::draw_list(rpass, &self.opaque_pipeline, resources, &resources.opaque);
        }
    }

    pub fn draw_translucent<'rpass>(
        &'rpass self,
        rpass: &mut impl wgpu::util::RenderEncoder<'rpass>,
    ) {
        if let Some(resources) = &self.resources {
            Self::draw_list(
                rpass,
                &self.translucent_pipeline,
                resources,
                &resources.translucent,
            );
        }
    }

    fn draw_list<'rpass>(
        rpass: &mut impl wgpu::util::RenderEncoder<'rpass>,
        pipeline: &'rpass wgpu::RenderPipeline,
        resources: &'rpass SceneResources,
        draws: &[Draw],
    ) {
        if draws.is_empty() {
            return;
        }
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &resources.bind_group, &[]);
        for draw in draws {
            let mesh = &resources.meshes[draw.mesh];
            rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            // The instance index selects the entity's storage slot.
            rpass.draw_indexed(0..mesh.index_count, 0, draw.entity..draw.entity + 1);
        }
    }
}

/// Translucent entities are drawn without depth writes, so the farthest one
/// has to be blended first. Ties keep table order.
fn sort_back_to_front(draws: &mut [Draw], scene: &Scene) {
    let eye = scene.camera().position;
    let distance = |draw: &Draw| {
        scene.entities()[draw.entity as usize]
            .transform()
            .position
            .distance_squared(eye)
    };
    draws.sort_by(|a, b| distance(b).total_cmp(&distance(a)));
}

fn upload_mesh(device: &wgpu::Device, shape: Shape) -> GpuMesh {
    let mesh = shape.mesh();

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Mesh Vertex Buffer"),
        contents: cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Mesh Index Buffer"),
        contents: cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    GpuMesh {
        shape,
        vertex_buffer,
        index_buffer,
        index_count: mesh.indices.len() as u32,
    }
}

#[derive(Default)]
pub struct MeshRendererBuilder {
    color_format: Option<wgpu::TextureFormat>,
    depth_format: Option<wgpu::TextureFormat>,
}

impl MeshRendererBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color_target_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.color_format = Some(format);
        self
    }

    pub fn depth_format(mut self, format: wgpu::TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    pub fn build(self, device: &wgpu::Device) -> Result<MeshRenderer> {
        let color_format = self.color_format.context("No color format provided")?;
        let depth_format = self.depth_format.context("No depth format provided")?;

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mesh Globals Buffer"),
            size: size_of::<Globals>() as _,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Mesh Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(size_of::<Globals>() as _),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(size_of::<EntityData>() as _),
                    },
                    count: None,
                },
            ],
        });

        let shader_module = device.create_shader_module(&wgpu::include_wgsl!("mesh.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let make_pipeline = |label: &'static str,
                             blend: Option<wgpu::BlendState>,
                             depth_write_enabled: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader_module,
                    entry_point: "vs_main",
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: size_of::<Vertex>() as _,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
                    }],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader_module,
                    entry_point: "fs_main",
                    targets: &[wgpu::ColorTargetState {
                        format: color_format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    }],
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: depth_format,
                    depth_write_enabled,
                    depth_compare: wgpu::CompareFunction::LessEqual,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            })
        };

        let opaque_pipeline = make_pipeline("Opaque Mesh Pipeline", None, true);
        let translucent_pipeline = make_pipeline(
            "Translucent Mesh Pipeline",
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );

        Ok(MeshRenderer {
            globals_buffer,
            bind_group_layout,
            opaque_pipeline,
            translucent_pipeline,
            resources: None,
            scratch: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::Tick, scene::SceneAssembler, skins::SkinId, theme::ThemeMode, window::Viewport,
    };

    fn distances(draws: &[Draw], scene: &Scene) -> Vec<f32> {
        let eye = scene.camera().position;
        draws
            .iter()
            .map(|draw| {
                scene.entities()[draw.entity as usize]
                    .transform()
                    .position
                    .distance_squared(eye)
            })
            .collect()
    }

    #[test]
    fn translucent_draws_are_sorted_back_to_front() {
        let mut scene = SceneAssembler::new(Viewport::new(800, 600))
            .seed(2)
            .assemble(SkinId::Glass.config(), ThemeMode::Light)
            .unwrap();

        for elapsed in [0., 1.5, 7.25] {
            scene.advance(Tick {
                elapsed,
                delta: 1. / 60.,
            });
            let mut draws: Vec<Draw> = (0..scene.entities().len() as u32)
                .rev()
                .map(|entity| Draw { mesh: 0, entity })
                .collect();

            sort_back_to_front(&mut draws, &scene);

            let distances = distances(&draws, &scene);
            assert_eq!(distances.len(), scene.entities().len());
            assert!(
                distances.windows(2).all(|pair| pair[0] >= pair[1]),
                "{:?}",
                distances
            );
        }
    }
}
