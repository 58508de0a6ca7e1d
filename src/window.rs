use std::sync::Arc;

use winit::window::Window as WinitWindow;

use crate::renderer::{FrameInput, Renderer};

/// Wrapper around winit Window with imperative draw API
#[derive(Clone)]
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }

    /// Draw one frame with the GUI built by `ui`
    pub fn draw(
        &self,
        renderer: &mut Renderer,
        frame: &FrameInput<'_>,
        ui: impl FnMut(&egui::Context),
    ) -> Result<(), wgpu::SurfaceError> {
        renderer.render(&self.inner, frame, ui)
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }
}
