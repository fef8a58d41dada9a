//! WGPU device, queue and surface management

use std::sync::Arc;
use winit::{dpi::PhysicalSize, window::Window};

/// Error creating the GPU context
#[derive(Debug)]
pub enum ContextError {
    /// The window surface could not be created
    Surface(String),
    /// No adapter can present to the surface
    NoAdapter,
    /// The adapter refused to open a device
    Device(String),
    /// The surface reports no usable texture format
    NoSurfaceFormat,
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::Surface(msg) => write!(f, "Failed to create surface: {}", msg),
            ContextError::NoAdapter => write!(f, "No suitable GPU adapter found"),
            ContextError::Device(msg) => write!(f, "Failed to create device: {}", msg),
            ContextError::NoSurfaceFormat => write!(f, "Surface has no supported formats"),
        }
    }
}

impl std::error::Error for ContextError {}

/// GPU state bound to one window
pub struct RenderContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
}

impl RenderContext {
    /// Create a context presenting with vsync
    pub async fn new(window: Arc<Window>) -> Result<Self, ContextError> {
        Self::with_vsync(window, true).await
    }

    /// Create a context, choosing Fifo (vsync) or Immediate presentation
    pub async fn with_vsync(window: Arc<Window>, vsync: bool) -> Result<Self, ContextError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .map_err(|e| ContextError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(ContextError::NoAdapter)?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Ballpark Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(|e| ContextError::Device(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(ContextError::NoSurfaceFormat)?;

        let present_mode = if vsync {
            wgpu::PresentMode::Fifo
        } else if caps.present_modes.contains(&wgpu::PresentMode::Immediate) {
            wgpu::PresentMode::Immediate
        } else {
            log::warn!("Immediate presentation unsupported, falling back to vsync");
            wgpu::PresentMode::Fifo
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
        })
    }

    /// Reconfigure the surface for a new window size (ignores zero sizes)
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Width / height of the surface
    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }
}
