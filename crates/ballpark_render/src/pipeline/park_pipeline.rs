//! Render pipeline for the ballpark scene
//!
//! Draws the park triangles with lighting and per-fragment clip-plane tests,
//! then draws overlay line segments (unclipped, unlit) on top.

use wgpu::util::DeviceExt;

use super::types::{ClipPlaneUniforms, SceneUniforms, Vertex};
use crate::geometry::{OverlayBatch, ParkGeometry};

/// Initial overlay buffer size, in vertices
const INITIAL_LINE_CAPACITY: usize = 1024;

/// Render pipelines and buffers for one frame of the park view
pub struct ParkPipeline {
    /// Lit, clipped triangle pipeline
    park_pipeline: wgpu::RenderPipeline,
    /// Overlay line pipeline
    line_pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    clip_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    /// Park mesh
    park_buffer: Option<wgpu::Buffer>,
    park_vertex_count: u32,
    /// Overlay lines, rewritten every frame
    line_buffer: wgpu::Buffer,
    line_capacity: usize,
    line_vertex_count: u32,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl ParkPipeline {
    /// Create the park and overlay pipelines
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Park Bind Group Layout"),
            entries: &[
                // Scene uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // Clip planes
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Park Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Park Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/park.wgsl").into()),
        });

        let park_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            "Park Pipeline",
            "fs_main",
            wgpu::PrimitiveTopology::TriangleList,
            true,
        );
        let line_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader,
            surface_format,
            "Overlay Line Pipeline",
            "fs_line",
            wgpu::PrimitiveTopology::LineList,
            false,
        );

        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniform Buffer"),
            contents: bytemuck::bytes_of(&SceneUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let clip_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Clip Plane Buffer"),
            contents: bytemuck::bytes_of(&ClipPlaneUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Park Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: clip_buffer.as_entire_binding(),
                },
            ],
        });

        let line_buffer = Self::create_line_buffer(device, INITIAL_LINE_CAPACITY);

        Self {
            park_pipeline,
            line_pipeline,
            scene_buffer,
            clip_buffer,
            bind_group,
            park_buffer: None,
            park_vertex_count: 0,
            line_buffer,
            line_capacity: INITIAL_LINE_CAPACITY,
            line_vertex_count: 0,
            depth_texture: None,
            depth_size: (0, 0),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        label: &str,
        fragment_entry: &str,
        topology: wgpu::PrimitiveTopology,
        depth_write: bool,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::vertex_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Clipping opens the park up, so back faces must be drawn
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: depth_write,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_line_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Overlay Line Buffer"),
            size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Get the vertex buffer layout for Vertex
    fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        }
    }

    /// Upload the park mesh
    pub fn upload_park(&mut self, device: &wgpu::Device, geometry: &ParkGeometry) {
        self.park_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Park Vertex Buffer"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.park_vertex_count = geometry.vertex_count() as u32;
    }

    /// Upload this frame's overlay lines, growing the buffer if needed
    pub fn upload_overlay(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, overlay: &OverlayBatch) {
        let vertices = overlay.vertices();
        if vertices.len() > self.line_capacity {
            self.line_capacity = vertices.len().next_power_of_two();
            self.line_buffer = Self::create_line_buffer(device, self.line_capacity);
            log::debug!("Overlay line buffer grown to {} vertices", self.line_capacity);
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.line_buffer, 0, bytemuck::cast_slice(&vertices));
        }
        self.line_vertex_count = vertices.len() as u32;
    }

    /// Update scene uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &SceneUniforms) {
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Update the enabled clip planes
    pub fn update_clip_planes(&self, queue: &wgpu::Queue, uniforms: &ClipPlaneUniforms) {
        queue.write_buffer(&self.clip_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Ensure depth texture exists and is the right size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width: width.max(1),
                    height: height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Depth32Float,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture = Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Record the park and overlay passes
    ///
    /// The park mesh is skipped when `show_park` is false; overlays are
    /// always drawn.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
        show_park: bool,
    ) {
        let Some(depth_view) = self.depth_texture.as_ref() else {
            log::warn!("Depth texture not created; skipping frame");
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Park Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.bind_group, &[]);

        if let (true, Some(park)) = (show_park, self.park_buffer.as_ref()) {
            render_pass.set_pipeline(&self.park_pipeline);
            render_pass.set_vertex_buffer(0, park.slice(..));
            render_pass.draw(0..self.park_vertex_count, 0..1);
        }

        if self.line_vertex_count > 0 {
            render_pass.set_pipeline(&self.line_pipeline);
            render_pass.set_vertex_buffer(0, self.line_buffer.slice(..));
            render_pass.draw(0..self.line_vertex_count, 0..1);
        }
    }
}

/// Right-handed perspective projection with a 0..1 depth range
pub fn perspective_matrix(fov_y: f32, aspect: f32, near: f32, far: f32) -> [[f32; 4]; 4] {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, far * near * nf, 0.0],
    ]
}

/// Helper to create a look-at view matrix
pub fn look_at_matrix(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> [[f32; 4]; 4] {
    let f = normalize([
        target[0] - eye[0],
        target[1] - eye[1],
        target[2] - eye[2],
    ]);
    let s = normalize(cross(f, up));
    let u = cross(s, f);

    [
        [s[0], u[0], -f[0], 0.0],
        [s[1], u[1], -f[1], 0.0],
        [s[2], u[2], -f[2], 0.0],
        [-dot(s, eye), -dot(u, eye), dot(f, eye), 1.0],
    ]
}

/// Multiply two column-major 4x4 matrices (`a * b`)
pub fn mat4_mul(a: [[f32; 4]; 4], b: [[f32; 4]; 4]) -> [[f32; 4]; 4] {
    let mut result = [[0.0f32; 4]; 4];
    for (col, out) in result.iter_mut().enumerate() {
        for (row, value) in out.iter_mut().enumerate() {
            *value = (0..4).map(|k| a[k][row] * b[col][k]).sum();
        }
    }
    result
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
