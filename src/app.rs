use std::path::PathBuf;

use glam::Vec2;

use crate::camera::{OrbitCamera, Projection};
use crate::config::ViewerConfig;
use crate::controls::{OrbitControls, TransformControls};
use crate::core::Controller;
use crate::geometry::GeometryLibrary;
use crate::gui::PanelEvent;
use crate::helpers::{gizmo_lines, gizmo_size, shadow_camera_lines, spot_light_lines};
use crate::params::{LightParams, Params};
use crate::scene::Scene;
use crate::simulate::{apply_light_params, on_animation_changed, on_material_changed, simulate};
use crate::types::LineVertex;

/// Work a panel event leaves for the event loop, which owns the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    PickColorMap,
}

pub struct Viewer {
    pub params: Params,
    pub light: LightParams,
    pub scene: Scene,
    pub camera: OrbitCamera,
    pub orbit: OrbitControls,
    pub transform: TransformControls,
    pub library: GeometryLibrary,
    pub asset_dir: PathBuf,
    pub show_ui: bool,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Self {
        let params = config.params;
        let light = config.light;

        let mut scene = Scene::new(&params, &light);
        on_material_changed(params.material, &mut scene);
        on_animation_changed(params.animation, &mut scene);

        let (width, height) = config.window_size;
        let mut camera = OrbitCamera::new(params.camera_position(), width, height);
        camera.projection = config.projection;

        Self {
            params,
            light,
            scene,
            camera,
            orbit: OrbitControls::default(),
            transform: TransformControls::default(),
            library: GeometryLibrary::build(),
            asset_dir: config.asset_dir.clone(),
            show_ui: config.show_ui,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Run the change handler for one panel interaction
    pub fn handle_panel_event(&mut self, event: PanelEvent) -> Option<ViewerCommand> {
        log::debug!("Panel event: {:?}", event);
        match event {
            PanelEvent::MaterialChanged(material) => on_material_changed(material, &mut self.scene),
            PanelEvent::AnimationChanged(animation) => on_animation_changed(animation, &mut self.scene),
            PanelEvent::LightChanged => apply_light_params(&self.light, &mut self.scene),
            PanelEvent::ToggleProjection => self.camera.toggle_projection(),
            PanelEvent::ResetView => self.camera.reset(self.params.camera_position()),
            PanelEvent::LoadTexture => return Some(ViewerCommand::PickColorMap),
        }
        None
    }

    /// Controls first, then the per-frame scene update
    pub fn update(&mut self, input: &impl Controller, viewport: Vec2, time_ms: f64) {
        let bounds = self.library.get(self.scene.mesh.shape).bounds();
        self.transform.update(
            input,
            &self.camera,
            self.scene.gizmo,
            &mut self.scene.mesh.transform,
            &bounds,
            viewport,
        );
        self.orbit.enabled = !self.transform.dragging();
        self.orbit.update(input, &mut self.camera, viewport.y);

        simulate(&self.params, &mut self.scene, time_ms);
    }

    pub fn projection(&self) -> Projection {
        self.camera.projection
    }

    /// Spotlight cone and shadow-camera frustum
    pub fn helper_lines(&self) -> Vec<LineVertex> {
        let light = &self.scene.spot_light;
        let mut lines = spot_light_lines(light);
        lines.extend(shadow_camera_lines(light));
        lines
    }

    /// Empty while the transform controls are disabled
    pub fn gizmo_lines(&self) -> Vec<LineVertex> {
        if !self.scene.gizmo.enabled {
            return Vec::new();
        }
        let position = self.scene.mesh.transform.position;
        gizmo_lines(
            position,
            self.scene.gizmo.mode,
            self.transform.axis,
            gizmo_size(&self.camera, position),
        )
    }
}
