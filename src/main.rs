use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window as WinitWindow, WindowId},
};

use shape_viewer::cli::Cli;
use shape_viewer::config::ViewerConfig;
use shape_viewer::core::WinitController;
use shape_viewer::frame::{FpsCounter, FrameIterator};
use shape_viewer::gui::{show_fps, show_panel, PanelEvent};
use shape_viewer::renderer::{FrameInput, Renderer, RendererAssets};
use shape_viewer::texture;
use shape_viewer::window::Window;
use shape_viewer::{Viewer, ViewerCommand};

const WINDOW_TITLE: &str = "Shape Viewer";

// === Application ===

struct App {
    viewer: Viewer,
    window_size: (u32, u32),
    window: Option<Window>,
    renderer: Option<Renderer>,
    input: WinitController,
    frames: FrameIterator,
    fps: FpsCounter,
}

impl App {
    fn new(config: &ViewerConfig) -> Self {
        Self {
            viewer: Viewer::new(config),
            window_size: config.window_size,
            window: None,
            renderer: None,
            input: WinitController::new(),
            frames: FrameIterator::new(),
            fps: FpsCounter::default(),
        }
    }

    fn create_renderer(&self, window: Arc<WinitWindow>) -> Result<Renderer> {
        let assets = RendererAssets {
            color_map: texture::color_map_or_fallback(&self.viewer.asset_dir),
            environment: texture::environment_or_fallback(&self.viewer.asset_dir),
        };
        pollster::block_on(Renderer::new(window, &self.viewer.library, assets)).context("Failed to initialize renderer")
    }

    fn load_color_map(&mut self) {
        let Some(path) = texture::pick_image_file() else {
            log::info!("No texture selected");
            return;
        };
        match texture::load_image(&path) {
            Ok(image) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.set_color_map(&image);
                }
            }
            Err(e) => log::warn!("Keeping current color map: {}", e),
        }
    }

    /// Controls and scene for the next frame
    fn update(&mut self) -> bool {
        let Some(renderer) = self.renderer.as_ref() else {
            return false;
        };
        let Some(frame) = self.frames.next() else {
            return false;
        };
        if let Some(fps) = self.fps.tick(frame.delta) {
            log::debug!("FPS: {:.1}", fps);
        }

        let (width, height) = renderer.size();
        self.viewer
            .update(&self.input, Vec2::new(width as f32, height as f32), frame.time_ms);
        self.input.reset_deltas();
        true
    }

    /// Render the scene and panel. Returns the panel's events for this frame.
    fn draw(&mut self, event_loop: &ActiveEventLoop) -> Vec<PanelEvent> {
        let mut events = Vec::new();
        let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) else {
            return events;
        };

        let helper_lines = self.viewer.helper_lines();
        let gizmo_lines = self.viewer.gizmo_lines();
        let Viewer {
            params,
            light,
            scene,
            camera,
            show_ui,
            ..
        } = &mut self.viewer;
        let input = FrameInput {
            scene,
            camera,
            helper_lines: &helper_lines,
            gizmo_lines: &gizmo_lines,
        };
        let (show_ui, projection, fps) = (*show_ui, camera.projection, self.fps.fps());

        let result = window.draw(renderer, &input, |ctx| {
            if show_ui {
                show_fps(ctx, fps);
                events = show_panel(ctx, params, light, projection);
            }
        });

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => log::warn!("Surface timeout, skipping frame"),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::error!("Render error: {}", e),
        }
        events
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if !self.update() {
            return;
        }
        let events = self.draw(event_loop);
        for event in events {
            if let Some(ViewerCommand::PickColorMap) = self.viewer.handle_panel_event(event) {
                self.load_color_map();
            }
        }
    }
}

/// Button releases always reach the controller so drags end even over the panel
fn is_release(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::MouseInput {
            state: ElementState::Released,
            ..
        } | WindowEvent::KeyboardInput {
            event: KeyEvent {
                state: ElementState::Released,
                ..
            },
            ..
        } | WindowEvent::Focused(false)
    )
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let (width, height) = self.window_size;
        let window = match event_loop.create_window(
            WinitWindow::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(width, height)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let renderer = match self.create_renderer(window.clone()) {
            Ok(r) => r,
            Err(e) => {
                log::error!("{:#}", e);
                event_loop.exit();
                return;
            }
        };

        let (width, height) = renderer.size();
        self.viewer.resize(width, height);
        self.window = Some(Window::new(window));
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        // Let egui handle the event first
        let consumed = match (&mut self.renderer, &self.window) {
            (Some(renderer), Some(window)) => renderer.handle_event(window.inner(), &event),
            _ => false,
        };
        if !consumed || is_release(&event) {
            self.input.process_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } if !consumed => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.viewer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::from_cli(&cli)?;
    log::info!(
        "Starting with shape {:?}, material {:?}, assets in {}",
        config.params.shape,
        config.params.material,
        config.asset_dir.display()
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(&config);

    log::info!("Controls: left drag orbit or transform, right drag pan, wheel zoom, X/Y/Z axis, Escape quits");
    event_loop.run_app(&mut app)?;

    Ok(())
}
