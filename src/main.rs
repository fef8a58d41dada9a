//! Ballpark - interactive ballpark viewer
//!
//! Renders a park model and lets pointer tools slice it with clipping planes.
//! On the desktop a single emulated pointer is driven with mouse and keyboard.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use ballpark::config::AppConfig;
use ballpark::input::{InputAction, InputMapper};
use ballpark::systems::{AnalysisSystem, RenderError, RenderSystem, WindowSystem};
use ballpark_core::Vec3;
use ballpark_input::PointerController;
use ballpark_render::{OverlayBatch, ParkGeometry};

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    analysis: AnalysisSystem,
    controller: PointerController,
    overlay: OverlayBatch,
    park: ParkGeometry,
    last_frame: Instant,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let mut analysis = AnalysisSystem::new(
            &config.clipping,
            &config.analysis,
            Vec3::from_array(config.pointer.start_position),
        );
        // Start with one pointer so the desktop has something to drive
        analysis.create_tool();

        let controller = PointerController::new()
            .with_move_speed(config.pointer.move_speed)
            .with_mouse_sensitivity(config.pointer.mouse_sensitivity)
            .with_rotation_sensitivity(config.pointer.rotation_sensitivity)
            .with_wheel_step(config.pointer.wheel_step);

        let park = ParkGeometry::new();
        log::info!(
            "Built park: {} vertices, {} triangles",
            park.vertex_count(),
            park.triangle_count()
        );

        Self {
            config,
            window: None,
            render: None,
            analysis,
            controller,
            overlay: OverlayBatch::new(),
            park,
            last_frame: Instant::now(),
        }
    }

    fn cursor_captured(&self) -> bool {
        self.window.as_ref().is_some_and(|w| w.is_cursor_captured())
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::ToggleCursor => {
                if let Some(window) = &mut self.window {
                    if window.is_cursor_captured() {
                        window.release_cursor();
                        self.controller.release_all();
                    } else {
                        window.capture_cursor();
                    }
                }
            }
            InputAction::Exit => event_loop.exit(),
            InputAction::CenterDisplay => {
                self.analysis.center_display();
                log::info!("Pointer reset to start position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::CreateTool => {
                self.controller.release_all();
                let tool = self.analysis.create_tool();
                log::info!("Created pointer {:?}", tool);
            }
            InputAction::DestroyTool => {
                self.controller.release_all();
                if !self.analysis.destroy_current() {
                    log::info!("No pointer to destroy");
                }
            }
            InputAction::CycleTool => {
                self.controller.release_all();
                if let Some(tool) = self.analysis.cycle_tool() {
                    log::info!("Driving pointer {:?}", tool);
                }
            }
            InputAction::SelectAnalysisTool(index) => {
                if let Err(e) = self.analysis.select_mode(index) {
                    log::warn!("{}", e);
                }
            }
            InputAction::TogglePark => {
                if let Some(render) = &mut self.render {
                    render.toggle_park();
                }
            }
            InputAction::ToggleLight => {
                if let Some(render) = &mut self.render {
                    render.toggle_lighting();
                }
            }
        }
    }

    /// Drive the pointer, route tool events, then draw
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        // Cap dt so a stalled frame does not fling the pointer
        let dt = (now - self.last_frame).as_secs_f32().min(1.0 / 30.0);
        self.last_frame = now;

        self.analysis.drive(&mut self.controller, dt);
        self.analysis.process_events();

        self.overlay.clear();
        if self.config.debug.show_overlay {
            self.analysis.draw_overlays(&mut self.overlay);
        }

        if let Some(window) = &self.window {
            window.update_title(&self.analysis.status());
        }

        let Some(render) = &mut self.render else { return };
        match render.render_frame(self.analysis.pool(), &self.overlay) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => {
                let (width, height) = render.size();
                render.resize(width, height);
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let mut render = match RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            self.config.camera.clone(),
            self.config.window.vsync,
            self.config.clipping.hardware_limit,
        ) {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to initialise rendering: {}", e);
                event_loop.exit();
                return;
            }
        };
        render.upload_park(&self.park);

        let (right, up) = render.view_axes();
        self.controller.set_view_axes(right, up);

        window.update_title(&self.analysis.status());
        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size.width, size.height);
                }
            }

            WindowEvent::Focused(false) => self.controller.release_all(),

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let captured = self.cursor_captured();
                    if let Some(action) =
                        InputMapper::map_key_event(key, event.state, event.repeat, captured)
                    {
                        self.handle_action(action, event_loop);
                    }
                    // Held movement keys still reach the pointer
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let captured = self.cursor_captured();
                if let Some(action) = InputMapper::map_mouse_button(button, state, captured) {
                    // The capturing click is not a tool press
                    self.handle_action(action, event_loop);
                } else if captured || state == ElementState::Released {
                    self.controller.process_mouse_button(button, state);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.controller.process_scroll(lines);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if self.cursor_captured() {
                self.controller.process_mouse_motion(delta.0, delta.1);
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.analysis.shutdown();
        log::info!("All clipping planes returned to the pool");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Err(e) = &loaded {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting Ballpark viewer");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
