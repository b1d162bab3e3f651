use super::helpers::{uniform_entry, DEPTH_FORMAT, HDR_FORMAT};
use crate::constants::{AMBIENT_LIGHT, GLASS_ALPHA, LIGHT_DIRECTION, SNOW_SPRITE_SCALE};
use crate::core::scene::{enclosure_shell, SceneNode, TriMesh};
use crate::core::snow::ParticleField;
use crate::core::{FrameView, ENCLOSURE_TINT, SNOW_POINT_SIZE};
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    cam_right: [f32; 4], // w: sprite size
    cam_up: [f32; 4],
    light_dir: [f32; 4], // w: ambient
    sky_top: [f32; 4],
    sky_bottom: [f32; 4],
    glass: [f32; 4], // w: alpha
}

impl SceneUniforms {
    pub(crate) fn from_frame(frame: &FrameView<'_>) -> Self {
        let view = frame.camera.view_matrix();
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();
        let light = Vec3::from(LIGHT_DIRECTION).normalize_or_zero();
        let (top, bottom) = frame.backdrop.gradient();
        Self {
            view_proj: frame.camera.view_projection().to_cols_array_2d(),
            cam_right: right.extend(SNOW_POINT_SIZE * SNOW_SPRITE_SCALE).to_array(),
            cam_up: up.extend(0.0).to_array(),
            light_dir: light.extend(AMBIENT_LIGHT).to_array(),
            sky_top: [top[0], top[1], top[2], 1.0],
            sky_bottom: [bottom[0], bottom[1], bottom[2], 1.0],
            glass: [ENCLOSURE_TINT[0], ENCLOSURE_TINT[1], ENCLOSURE_TINT[2], GLASS_ALPHA],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshVertex {
    position: [f32; 3],
    normal: [f32; 3],
    color: [f32; 3],
}

const MESH_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];
const SNOW_POS_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const SNOW_COLOR_ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

/// Flatten every mesh under `nodes` into world-space, flat-shaded triangles.
pub(crate) fn flatten_meshes(nodes: &[&SceneNode], out: &mut Vec<MeshVertex>) {
    out.clear();
    for root in nodes {
        root.traverse(Mat4::IDENTITY, &mut |node, world| {
            if let Some(mesh) = &node.mesh {
                push_mesh(mesh, world, out);
            }
        });
    }
}

fn push_mesh(mesh: &TriMesh, world: Mat4, out: &mut Vec<MeshVertex>) {
    for tri in mesh.triangles() {
        let [a, b, c] = tri.map(|p| world.transform_point3(p));
        let n = (b - a).cross(c - a).normalize_or_zero().to_array();
        for p in [a, b, c] {
            out.push(MeshVertex {
                position: p.to_array(),
                normal: n,
                color: mesh.color,
            });
        }
    }
}

/// Vertex buffer that grows to fit its largest upload.
struct GrowBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl GrowBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: u64) -> Self {
        Self {
            label,
            buffer: Self::alloc(device, label, capacity),
            capacity,
        }
    }

    fn alloc(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: size.max(wgpu::COPY_BUFFER_ALIGNMENT),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        if bytes.len() as u64 > self.capacity {
            self.capacity = (bytes.len() as u64).next_power_of_two();
            self.buffer = Self::alloc(device, self.label, self.capacity);
            log::debug!("[gpu] {} grown to {} bytes", self.label, self.capacity);
        }
        if !bytes.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
    }
}

/// Backdrop gradient, lit meshes and snow sprites drawn into the HDR target.
pub(crate) struct SceneResources {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    backdrop_pipeline: wgpu::RenderPipeline,
    mesh_pipeline: wgpu::RenderPipeline,
    snow_pipeline: wgpu::RenderPipeline,
    glass_pipeline: wgpu::RenderPipeline,
    mesh_vertices: GrowBuffer,
    mesh_count: u32,
    scratch: Vec<MeshVertex>,
    snow_positions: GrowBuffer,
    snow_colors: GrowBuffer,
    snow_count: u32,
    glass_vertices: GrowBuffer,
    glass_count: u32,
    glass_radius: f32,
}

fn depth_state(write: bool, compare: wgpu::CompareFunction) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: compare,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            )],
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let backdrop_pipeline = super::helpers::make_fullscreen_pipeline(
            device,
            "backdrop_pipeline",
            &layout,
            &shader,
            "fs_backdrop",
            HDR_FORMAT,
            Some(depth_state(false, wgpu::CompareFunction::Always)),
        );

        // Translucent passes test depth without writing it, blend over what
        // is already drawn, and keep front faces only.
        let pipeline = |label: &str,
                        vs: &str,
                        fs: &str,
                        buffers: &[wgpu::VertexBufferLayout<'_>],
                        translucent: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    cull_mode: translucent.then_some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(depth_state(!translucent, wgpu::CompareFunction::Less)),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: HDR_FORMAT,
                        blend: translucent.then_some(wgpu::BlendState::ALPHA_BLENDING),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };
        let mesh_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRS,
        };
        let mesh_pipeline = pipeline(
            "mesh_pipeline",
            "vs_mesh",
            "fs_mesh",
            std::slice::from_ref(&mesh_layout),
            false,
        );
        let snow_pipeline = pipeline(
            "snow_pipeline",
            "vs_snow",
            "fs_snow",
            &[
                wgpu::VertexBufferLayout {
                    array_stride: 12,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &SNOW_POS_ATTRS,
                },
                wgpu::VertexBufferLayout {
                    array_stride: 12,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &SNOW_COLOR_ATTRS,
                },
            ],
            false,
        );
        let glass_pipeline = pipeline(
            "glass_pipeline",
            "vs_mesh",
            "fs_glass",
            std::slice::from_ref(&mesh_layout),
            true,
        );

        Self {
            uniform_buffer,
            bind_group,
            backdrop_pipeline,
            mesh_pipeline,
            snow_pipeline,
            glass_pipeline,
            mesh_vertices: GrowBuffer::new(device, "mesh_vertices", 1 << 16),
            mesh_count: 0,
            scratch: Vec::new(),
            snow_positions: GrowBuffer::new(device, "snow_positions", 0),
            snow_colors: GrowBuffer::new(device, "snow_colors", 0),
            snow_count: 0,
            glass_vertices: GrowBuffer::new(device, "glass_vertices", 0),
            glass_count: 0,
            glass_radius: 0.0,
        }
    }

    pub(crate) fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, frame: &FrameView<'_>) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&SceneUniforms::from_frame(frame)),
        );

        flatten_meshes(&frame.nodes, &mut self.scratch);
        self.mesh_vertices
            .write(device, queue, bytemuck::cast_slice(&self.scratch));
        self.mesh_count = self.scratch.len() as u32;

        self.upload_snow(device, queue, frame.snow);

        if frame.enclosure_radius != self.glass_radius {
            self.scratch.clear();
            push_mesh(&enclosure_shell(frame.enclosure_radius), Mat4::IDENTITY, &mut self.scratch);
            self.glass_vertices
                .write(device, queue, bytemuck::cast_slice(&self.scratch));
            self.glass_count = self.scratch.len() as u32;
            self.glass_radius = frame.enclosure_radius;
            log::debug!("[gpu] glass shell radius {:.2}", self.glass_radius);
        }
    }

    fn upload_snow(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, snow: &ParticleField) {
        let count = snow.len() as u32;
        // A count change means fresh buffers, so both streams are rewritten.
        let resized = count != self.snow_count;
        if resized || snow.positions_dirty() {
            self.snow_positions
                .write(device, queue, bytemuck::cast_slice(snow.positions()));
        }
        if resized || snow.colors_dirty() {
            self.snow_colors
                .write(device, queue, bytemuck::cast_slice(snow.colors()));
        }
        self.snow_count = count;
    }

    pub(crate) fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.bind_group, &[]);

        rpass.set_pipeline(&self.backdrop_pipeline);
        rpass.draw(0..3, 0..1);

        if self.mesh_count > 0 {
            rpass.set_pipeline(&self.mesh_pipeline);
            rpass.set_vertex_buffer(0, self.mesh_vertices.buffer.slice(..));
            rpass.draw(0..self.mesh_count, 0..1);
        }

        if self.snow_count > 0 {
            rpass.set_pipeline(&self.snow_pipeline);
            rpass.set_vertex_buffer(0, self.snow_positions.buffer.slice(..));
            rpass.set_vertex_buffer(1, self.snow_colors.buffer.slice(..));
            rpass.draw(0..6, 0..self.snow_count);
        }

        if self.glass_count > 0 {
            rpass.set_pipeline(&self.glass_pipeline);
            rpass.set_vertex_buffer(0, self.glass_vertices.buffer.slice(..));
            rpass.draw(0..self.glass_count, 0..1);
        }
    }
}
