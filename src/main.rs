use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::{CursorGrabMode, Window, WindowId},
};

use roomview::controller::InputEvent;
use roomview::{logging, ui, view};
use roomview::{FrameLoopContext, LoopControl, ViewerConfig};

use view::{GpuContext, SceneRenderer};

/// Window plus everything that draws into it
struct Viewer {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: SceneRenderer,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    cursor_captured: bool,
}

impl Viewer {
    fn new(event_loop: &ActiveEventLoop, config: &ViewerConfig) -> Result<Self> {
        let attributes = Window::default_attributes()
            .with_title(config.window.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(config.window.width, config.window.height));
        let window = Arc::new(event_loop.create_window(attributes).context("failed to create window")?);

        let gpu = pollster::block_on(GpuContext::new(window.clone()))?;
        let renderer = SceneRenderer::new(&gpu.device, gpu.format, gpu.config.width, gpu.config.height);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format, egui_wgpu::RendererOptions::default());

        let mut viewer = Self {
            window,
            gpu,
            renderer,
            egui_ctx,
            egui_state,
            egui_renderer,
            cursor_captured: false,
        };
        viewer.capture_cursor(true);
        Ok(viewer)
    }

    /// Grab and hide the pointer for mouse look, or release it.
    fn capture_cursor(&mut self, capture: bool) {
        let result = if capture {
            self.window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined))
        } else {
            self.window.set_cursor_grab(CursorGrabMode::None)
        };
        match result {
            Ok(()) => {
                self.window.set_cursor_visible(!capture);
                self.cursor_captured = capture;
            }
            Err(e) => tracing::warn!(error = %e, "cursor grab not available"),
        }
    }

    fn resize(&mut self, width: u32, height: u32) -> bool {
        if !self.gpu.resize(width, height) {
            return false;
        }
        self.renderer.resize(&self.gpu.device, width, height);
        true
    }

    fn render(&mut self, frame: &mut FrameLoopContext) -> Result<(), wgpu::SurfaceError> {
        let output = self.gpu.surface.get_current_texture()?;
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.upload(&self.gpu.queue, frame);

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let logical_width = self.gpu.config.width as f32 / self.window.scale_factor() as f32;
        let full_output = self.egui_ctx.run(raw_input, |ctx| ui::build_ui(ctx, frame, logical_width));
        self.egui_state.handle_platform_output(&self.window, full_output.platform_output);

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self.egui_ctx.tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point,
        };

        let mut encoder = self.gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.gpu.device, &self.gpu.queue, *id, image_delta);
        }
        let egui_commands = self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &primitives,
            &screen_descriptor,
        );

        self.renderer.draw(&mut encoder, &view);

        // Overlay on top of the scene
        {
            let egui_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer.render(&mut egui_pass.forget_lifetime(), &primitives, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        self.gpu
            .queue
            .submit(egui_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();
        Ok(())
    }
}

struct App {
    config: ViewerConfig,
    frame: FrameLoopContext,
    viewer: Option<Viewer>,
    start: Instant,
    init_error: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        let frame = FrameLoopContext::new(&config);
        Self {
            config,
            frame,
            viewer: None,
            start: Instant::now(),
            init_error: None,
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = self.start.elapsed().as_secs_f64();
        if self.frame.update(now) == LoopControl::Exit {
            event_loop.exit();
            return;
        }

        let Some(viewer) = self.viewer.as_mut() else { return };
        match viewer.render(&mut self.frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => viewer.gpu.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                tracing::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => tracing::warn!(error = ?e, "skipping frame"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.viewer.is_some() {
            return;
        }
        match Viewer::new(event_loop, &self.config) {
            Ok(viewer) => {
                let size = viewer.window.inner_size();
                self.frame.scene.set_viewport(size.width, size.height);
                self.frame.handle_event(&InputEvent::PointerCapture { captured: viewer.cursor_captured });
                tracing::info!(width = size.width, height = size.height, "viewer initialized");
                self.viewer = Some(viewer);
            }
            Err(e) => {
                tracing::error!(error = ?e, "initialization failed");
                self.init_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(viewer) = self.viewer.as_mut() else { return };

        // Let egui see everything first; only clicks on its windows are swallowed
        let response = viewer.egui_state.on_window_event(&viewer.window, &event);
        if response.consumed && !viewer.cursor_captured {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if viewer.resize(size.width, size.height) {
                    self.frame.scene.set_viewport(size.width, size.height);
                }
            }
            WindowEvent::MouseInput { state: ElementState::Pressed, button: MouseButton::Left, .. } => {
                if !viewer.cursor_captured {
                    viewer.capture_cursor(true);
                    self.frame.handle_event(&InputEvent::PointerCapture { captured: viewer.cursor_captured });
                }
            }
            WindowEvent::Focused(false) => {
                viewer.capture_cursor(false);
                self.frame.handle_event(&InputEvent::PointerCapture { captured: viewer.cursor_captured });
                self.frame.handle_event(&InputEvent::FocusLost);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let Some(input) = self.frame.processor.translate(&other) {
                    self.frame.handle_event(&input);
                }
            }
        }
    }

    // Raw motion keeps looking when a grabbed pointer sits at the window edge
    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let Some(input) = self.frame.processor.translate_device(&event) {
            self.frame.handle_event(&input);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(viewer) = &self.viewer {
            viewer.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    logging::init();

    let config = ViewerConfig::from_env();
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut app = App::new(config);

    tracing::info!("starting roomview");
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.init_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
