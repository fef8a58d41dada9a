//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Park pipeline and overlay upload
//! - Clip-plane register programming around the park draw

use std::sync::Arc;
use winit::window::Window;
use ballpark_core::{ClippingPlanePool, Vec3};
use ballpark_render::{
    context::{ContextError, RenderContext},
    pipeline::{look_at_matrix, mat4_mul, perspective_matrix, ParkPipeline, SceneUniforms},
    ClipPlaneRegisters, OverlayBatch, ParkGeometry, RenderCoordinator,
};
use crate::config::{CameraConfig, RenderingConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Other(e.to_string())
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: ParkPipeline,
    registers: ClipPlaneRegisters,
    coordinator: RenderCoordinator,
    render_config: RenderingConfig,
    camera_config: CameraConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: CameraConfig,
        vsync: bool,
        hardware_limit: Option<usize>,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut pipeline = ParkPipeline::new(&context.device, context.config.format);
        pipeline.ensure_depth_texture(&context.device, context.size.width, context.size.height);

        let registers = ClipPlaneRegisters::with_limit(hardware_limit);
        log::info!("Clip plane registers: {}", ballpark_render::ClipPlaneApi::max_clip_planes(&registers));

        Ok(Self {
            context,
            pipeline,
            registers,
            coordinator: RenderCoordinator::new(),
            render_config,
            camera_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(&self.context.device, width, height);
    }

    /// Upload the park mesh to the GPU
    pub fn upload_park(&mut self, park: &ParkGeometry) {
        self.pipeline.upload_park(&self.context.device, park);
        log::info!(
            "Uploaded park: {} vertices, {} triangles",
            park.vertex_count(),
            park.triangle_count()
        );
    }

    /// Screen right and up in world space, for the pointer controller
    pub fn view_axes(&self) -> (Vec3, Vec3) {
        view_axes(&self.camera_config)
    }

    pub fn toggle_park(&mut self) -> bool {
        self.render_config.show_park = !self.render_config.show_park;
        log::info!("Show park: {}", self.render_config.show_park);
        self.render_config.show_park
    }

    pub fn toggle_lighting(&mut self) -> bool {
        self.render_config.lighting = !self.render_config.lighting;
        log::info!("Lighting: {}", self.render_config.lighting);
        self.render_config.lighting
    }

    /// Render a single frame
    ///
    /// Active planes of `pool` are loaded into the clip registers for the
    /// duration of the park draw and cleared afterwards.
    pub fn render_frame(
        &mut self,
        pool: &ClippingPlanePool,
        overlay: &OverlayBatch,
    ) -> Result<(), RenderError> {
        let Self {
            context,
            pipeline,
            registers,
            coordinator,
            render_config,
            camera_config,
        } = self;

        let proj = perspective_matrix(
            camera_config.fov.to_radians(),
            context.aspect_ratio(),
            camera_config.near,
            camera_config.far,
        );
        let view = look_at_matrix(camera_config.eye, camera_config.target, [0.0, 1.0, 0.0]);
        let uniforms = SceneUniforms {
            view_proj: mat4_mul(proj, view),
            light_dir: Vec3::from_array(render_config.light_dir).normalized().to_array(),
            lighting: if render_config.lighting { 1.0 } else { 0.0 },
            ambient_strength: render_config.ambient_strength,
            diffuse_strength: render_config.diffuse_strength,
            _padding: [0.0; 2],
        };
        pipeline.update_uniforms(&context.queue, &uniforms);
        pipeline.upload_overlay(&context.device, &context.queue, overlay);

        // Get surface texture
        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = render_config.background_color;
        let clear = wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        };
        let show_park = render_config.show_park;

        coordinator.render_frame(pool, registers, |regs| {
            pipeline.update_clip_planes(&context.queue, &regs.to_uniforms());
            pipeline.render(&mut encoder, &target, clear, show_park);
        });

        context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

/// Screen right and up in world space for a camera looking from `eye` at
/// `target` with world Y up
pub fn view_axes(camera: &CameraConfig) -> (Vec3, Vec3) {
    let eye = Vec3::from_array(camera.eye);
    let target = Vec3::from_array(camera.target);
    let forward = (target - eye).normalized();
    let mut right = forward.cross(Vec3::Y);
    if right.length_squared() < 1e-8 {
        // Looking straight up or down
        right = Vec3::X;
    }
    let right = right.normalized();
    let up = right.cross(forward).normalized();
    (right, up)
}
