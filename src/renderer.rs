//! Per-frame rendering and the window event loop.
//!
//! [`SceneRenderer`] owns the camera and turns a [`Scene`] into one frame:
//! apply a pending day/night switch, clear colour and depth, draw every object,
//! present. [`run`] opens the window and drives it from winit's event loop
//! until the window closes or Escape is pressed.
//!
//! Frames are paced by the surface's present mode; every animation advances a
//! fixed step per frame.

use std::{iter, sync::Arc};

use cgmath::{Deg, Matrix4};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::Window,
};

use crate::{
    camera::{Camera, Projection},
    config::SceneConfig,
    context::{Context, InitContext},
    scene::Scene,
};

pub const FOVY: Deg<f32> = Deg(65.0);
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 100.0;

/// Camera, projection and the pending input that affects the next frame.
#[derive(Debug, Clone)]
pub struct SceneRenderer {
    camera: Camera,
    projection: Projection,
    switch_time: bool,
}

impl SceneRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::default(),
            projection: Projection::new(width, height, FOVY, ZNEAR, ZFAR),
            switch_time: false,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Ask for a day/night switch on the next frame.
    ///
    /// Requests do not queue: several before one frame still switch once.
    pub fn request_switch_time(&mut self) {
        self.switch_time = true;
    }

    pub fn switch_pending(&self) -> bool {
        self.switch_time
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// View and projection for the current frame.
    pub fn frame_matrices(&self) -> (Matrix4<f32>, Matrix4<f32>) {
        (self.camera.view_matrix(), self.projection.calc_matrix())
    }

    /// Apply a pending switch to `scene`. Returns whether one was applied.
    pub fn apply_pending(&mut self, scene: &mut Scene) -> bool {
        if !std::mem::take(&mut self.switch_time) {
            return false;
        }
        scene.switch_time();
        true
    }

    pub fn render(&mut self, ctx: &Context, scene: &mut Scene) -> Result<(), wgpu::SurfaceError> {
        self.apply_pending(scene);

        let output = ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (view_matrix, projection_matrix) = self.frame_matrices();

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(ctx.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            scene.draw_all(&ctx.queue, &mut render_pass, &view_matrix, &projection_matrix);
        }

        ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Whether a window of this size has a surface to draw into.
///
/// A minimised window reports 0x0; nothing is rendered until it grows again.
pub fn is_drawable(width: u32, height: u32) -> bool {
    width > 0 && height > 0
}

/// Whether `key` is the configured day/night key.
pub fn matches_toggle_key(key: &Key, toggle: &str) -> bool {
    matches!(key, Key::Character(c) if c.as_str() == toggle)
}

struct AppState {
    ctx: Context,
    scene: Scene,
    renderer: SceneRenderer,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &SceneConfig) -> anyhow::Result<Self> {
        let ctx = Context::new(window).await?;
        let (width, height) = ctx.size();
        let renderer = SceneRenderer::new(width, height);
        let init: InitContext = (&ctx).into();
        let scene = Scene::load(&init, &config.assets, renderer.camera()).await;
        Ok(Self {
            ctx,
            scene,
            renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.ctx.resize(width, height) {
            self.renderer.resize(width, height);
        }
    }
}

struct App {
    async_runtime: tokio::runtime::Runtime,
    config: SceneConfig,
    state: Option<AppState>,
    /// Set when setup fails; [`run`] hands it back after the loop exits.
    error: Option<anyhow::Error>,
}

impl App {
    fn new(config: SceneConfig) -> anyhow::Result<Self> {
        Ok(Self {
            async_runtime: tokio::runtime::Runtime::new()?,
            config,
            state: None,
            error: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        if event.logical_key == Key::Named(NamedKey::Escape) {
            event_loop.exit();
            return;
        }
        if event.repeat {
            return;
        }
        if matches_toggle_key(&event.logical_key, &self.config.input.toggle_key) {
            if let Some(state) = &mut self.state {
                state.renderer.request_switch_time();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_config = &self.config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match self
            .async_runtime
            .block_on(AppState::new(window, &self.config))
        {
            Ok(state) => {
                state.ctx.window.request_redraw();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.resize(size.width, size.height);
                    if is_drawable(size.width, size.height) {
                        state.ctx.window.request_redraw();
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(state) = &mut self.state else {
                    return;
                };
                // Idle while minimised; the next non-zero resize restarts drawing
                let size = state.ctx.window.inner_size();
                if !is_drawable(size.width, size.height) {
                    return;
                }
                match state.renderer.render(&state.ctx, &mut state.scene) {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        return self.fail(event_loop, anyhow::anyhow!("surface out of memory"));
                    }
                    Err(e) => log::error!("Unable to render {}", e),
                }
                state.ctx.window.request_redraw();
            }
            _ => {}
        }
    }
}

/// Open the window and render until it is closed.
///
/// Returns an error if the window or graphics device cannot be set up.
pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
