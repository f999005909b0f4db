//! Standalone window backed by winit.
//!
//! ```no_run
//! # use pantheon::Viewer;
//! Viewer::builder()
//!     .with_title("Pantheon")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{
    error::SceneError,
    gpu::{render_context::RenderContext, Renderer},
    options::Options,
    scene::{Scene, SceneModels},
    InputEvent, InputProcessor,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Builder with default options and the configured title.
    const fn new() -> Self {
        Self {
            options: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(title) = self.title {
            options.display.title = title;
        }
        Viewer { options }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the pantheon.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub const fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the scene is quit.
    ///
    /// # Errors
    ///
    /// [`SceneError::Viewer`] if the event loop fails, or whatever error
    /// stopped start-up (no adapter, bad shader, missing model).
    pub fn run(self) -> Result<(), SceneError> {
        let event_loop =
            EventLoop::new().map_err(|e| SceneError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            input: InputProcessor::with_key_bindings(
                self.options.keybindings.clone(),
            ),
            options: self.options,
            window: None,
            running: None,
            start: Instant::now(),
            error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| SceneError::Viewer(e.to_string()))?;
        app.error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Renderer and scene, created together once the window exists.
struct Running {
    renderer: Renderer,
    scene: Scene,
}

/// Internal winit application handler.
struct ViewerApp {
    options: Options,
    input: InputProcessor,
    window: Option<Arc<Window>>,
    running: Option<Running>,
    start: Instant,
    /// Start-up failure reported by [`Viewer::run`].
    error: Option<SceneError>,
}

/// Compute the wgpu surface size.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ViewerApp {
    fn start_scene(&self, window: &Arc<Window>) -> Result<Running, SceneError> {
        let size = viewport_size(window.inner_size());
        let context = pollster::block_on(RenderContext::new(
            Arc::clone(window),
            size,
            self.options.display.vsync,
        ))?;
        let mut renderer = Renderer::new(context, &self.options.display)?;
        let models = SceneModels::load(&self.options.scene, |path| {
            renderer.load_model(path)
        })?;
        let scene = Scene::new(&self.options, models);
        Ok(Running { renderer, scene })
    }

    fn grab_cursor(window: &Window) {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
        match grabbed {
            Ok(()) => window.set_cursor_visible(false),
            Err(e) => log::warn!("Cursor grab unavailable: {e}"),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(running) = &mut self.running else {
            return;
        };
        let input = self.input.take_frame();
        let now = self.start.elapsed().as_secs_f64();

        match running.scene.frame(now, &input, &mut running.renderer) {
            Ok(()) => {}
            Err(SceneError::Surface(
                wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
            )) => {
                if let Some(w) = &self.window {
                    let (vp_w, vp_h) = viewport_size(w.inner_size());
                    if (vp_w, vp_h) == running.renderer.size() {
                        running.renderer.reconfigure();
                    } else {
                        running.renderer.resize(vp_w, vp_h);
                    }
                }
            }
            Err(SceneError::Surface(wgpu::SurfaceError::Timeout)) => {
                log::warn!("Surface timeout, skipping frame");
            }
            Err(e) => {
                log::error!("render error: {e}");
            }
        }

        if running.scene.is_closed() {
            event_loop.exit();
        } else if let Some(w) = &self.window {
            w.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let display = &self.options.display;
        let attrs = Window::default_attributes()
            .with_title(&display.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                display.width,
                display.height,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                self.error = Some(SceneError::Viewer(e.to_string()));
                event_loop.exit();
                return;
            }
        };

        match self.start_scene(&window) {
            Ok(running) => self.running = Some(running),
            Err(e) => {
                log::error!("Failed to start scene: {e}");
                self.error = Some(e);
                event_loop.exit();
                return;
            }
        }

        if self.options.camera.grab_cursor {
            Self::grab_cursor(&window);
        }

        self.start = Instant::now();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(running) = &mut self.running {
                running.scene.request_close();
            }
            event_loop.exit();
            return;
        }

        if self.window.is_none() || self.running.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(running) = &mut self.running {
                    running.renderer.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                self.input.handle_event(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.input.handle_event(InputEvent::Scroll {
                    delta: scroll_delta,
                });
            }

            WindowEvent::Focused(false) => {
                self.input.handle_event(InputEvent::FocusLost);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.input.handle_event(InputEvent::Key {
                    code: format!("{code:?}"),
                    pressed: event.state == ElementState::Pressed,
                });
            }

            _ => (),
        }
    }
}
