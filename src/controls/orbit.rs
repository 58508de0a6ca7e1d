use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::{OrbitCamera, Projection};
use crate::core::controller::{Button, Controller};

/// Keeps the camera off the poles
const POLAR_EPSILON: f32 = 1e-6;

/// Orbit, pan and zoom around the camera target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub enabled: bool,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    /// Distance factor per wheel notch
    pub zoom_scale: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: true,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_scale: 0.95,
            min_distance: 1.0,
            max_distance: f32::INFINITY,
        }
    }
}

impl OrbitControls {
    /// Apply this frame's input. Returns true when the camera moved.
    pub fn update(&self, input: &impl Controller, camera: &mut OrbitCamera, viewport_height: f32) -> bool {
        if !self.enabled {
            return false;
        }

        let (dx, dy) = input.pointer_delta();
        let moved = dx != 0.0 || dy != 0.0;
        let mut changed = false;

        if moved && input.is_down(Button::MouseLeft) {
            self.rotate(camera, dx, dy, viewport_height);
            changed = true;
        } else if moved && (input.is_down(Button::MouseRight) || input.is_down(Button::MouseMiddle)) {
            self.pan(camera, dx, dy, viewport_height);
            changed = true;
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.dolly(camera, scroll);
            changed = true;
        }
        changed
    }

    /// Left drag: a full viewport height of motion turns a full circle
    pub fn rotate(&self, camera: &mut OrbitCamera, dx: f32, dy: f32, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= 0.0 {
            return;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        theta -= TAU * dx / height * self.rotate_speed;
        phi -= TAU * dy / height * self.rotate_speed;
        phi = phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);

        camera.position = camera.target
            + radius * Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos());
    }

    /// Right drag: move target and camera together in the view plane
    pub fn pan(&self, camera: &mut OrbitCamera, dx: f32, dy: f32, viewport_height: f32) {
        let forward = camera.forward();
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        let scale = camera.world_per_pixel(viewport_height) * self.pan_speed;

        let offset = (-right * dx + up * dy) * scale;
        camera.target += offset;
        camera.position += offset;
    }

    /// Wheel: positive steps move in
    pub fn dolly(&self, camera: &mut OrbitCamera, steps: f32) {
        let factor = self.zoom_scale.powf(steps);
        match camera.projection {
            Projection::Perspective => {
                let offset = camera.position - camera.target;
                let radius = (offset.length() * factor).clamp(self.min_distance, self.max_distance);
                camera.position = camera.target + offset.normalize_or_zero() * radius;
            }
            Projection::Orthographic => {
                camera.ortho.zoom = (camera.ortho.zoom / factor).max(1e-3);
            }
        }
    }
}
