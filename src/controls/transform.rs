use glam::{Quat, Vec2, Vec3};

use crate::camera::OrbitCamera;
use crate::core::controller::{Button, Controller};
use crate::math::{intersect_aabb, intersect_plane, Ray, AABB};
use crate::params::ModeControl;
use crate::scene::{GizmoState, Transform};

const MIN_SCALE: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    fn component(self, v: &mut Vec3) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
            Axis::Z => &mut v.z,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    start: Transform,
    plane_normal: Vec3,
    /// Cursor hit on the drag plane at press time
    anchor: Vec3,
    /// Pointer motion in pixels since press
    motion: Vec2,
}

/// Drag-to-transform for the picked mesh
#[derive(Debug, Clone)]
pub struct TransformControls {
    /// Constraint axis, free when `None`
    pub axis: Option<Axis>,
    /// Radians per pixel of horizontal motion
    pub rotate_speed: f32,
    /// Log-scale per pixel of vertical motion
    pub scale_speed: f32,
    drag: Option<Drag>,
}

impl Default for TransformControls {
    fn default() -> Self {
        Self {
            axis: None,
            rotate_speed: 0.01,
            scale_speed: 0.01,
            drag: None,
        }
    }
}

impl TransformControls {
    pub fn dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Same key twice frees the axis again
    pub fn toggle_axis(&mut self, axis: Axis) {
        self.axis = if self.axis == Some(axis) { None } else { Some(axis) };
        log::debug!("Transform axis constraint: {:?}", self.axis);
    }

    /// Apply this frame's input to `transform`. Returns true when it changed.
    pub fn update(
        &mut self,
        input: &impl Controller,
        camera: &OrbitCamera,
        gizmo: GizmoState,
        transform: &mut Transform,
        local_bounds: &AABB,
        viewport: Vec2,
    ) -> bool {
        for (button, axis) in [(Button::KeyX, Axis::X), (Button::KeyY, Axis::Y), (Button::KeyZ, Axis::Z)] {
            if input.was_pressed(button) {
                self.toggle_axis(axis);
            }
        }

        if !gizmo.enabled || !input.is_down(Button::MouseLeft) {
            self.drag = None;
            return false;
        }

        let Some((x, y)) = input.pointer() else {
            return false;
        };
        let ray = camera.ray_from_screen(x, y, viewport.x, viewport.y);

        if input.was_pressed(Button::MouseLeft) {
            self.drag = None;
            if pick(&ray, transform, local_bounds) {
                let plane_normal = -camera.forward();
                let anchor = intersect_plane(&ray, transform.position, plane_normal)
                    .map(|t| ray.at(t))
                    .unwrap_or(transform.position);
                self.drag = Some(Drag {
                    start: *transform,
                    plane_normal,
                    anchor,
                    motion: Vec2::ZERO,
                });
            }
            return false;
        }

        let axis = self.axis;
        let (rotate_speed, scale_speed) = (self.rotate_speed, self.scale_speed);
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let (dx, dy) = input.pointer_delta();
        drag.motion += Vec2::new(dx, dy);

        match gizmo.mode {
            ModeControl::Disable => false,
            ModeControl::Translate => {
                let Some(t) = intersect_plane(&ray, drag.start.position, drag.plane_normal) else {
                    return false;
                };
                let mut offset = ray.at(t) - drag.anchor;
                if let Some(axis) = axis {
                    offset = axis.unit() * offset.dot(axis.unit());
                }
                transform.position = drag.start.position + offset;
                true
            }
            ModeControl::Rotate => {
                let around = axis.map(Axis::unit).unwrap_or(camera.forward());
                let turn = Quat::from_axis_angle(around, drag.motion.x * rotate_speed);
                transform.set_quaternion(turn * drag.start.quaternion());
                true
            }
            ModeControl::Scale => {
                // Dragging up grows
                let factor = (-drag.motion.y * scale_speed).exp();
                let mut scale = drag.start.scale;
                match axis {
                    Some(axis) => *axis.component(&mut scale) *= factor,
                    None => scale *= factor,
                }
                transform.scale = scale.max(Vec3::splat(MIN_SCALE));
                true
            }
        }
    }
}

/// Ray against the mesh's world-space bounds
pub fn pick(ray: &Ray, transform: &Transform, local_bounds: &AABB) -> bool {
    let world = local_bounds.transformed(&transform.matrix());
    intersect_aabb(ray.origin, ray.direction, world.min, world.max) >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::tests::MockController;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn camera() -> OrbitCamera {
        OrbitCamera::new(Vec3::new(0.0, 0.0, 500.0), 1280, 720)
    }

    fn bounds() -> AABB {
        AABB::new(Vec3::splat(-50.0), Vec3::splat(50.0))
    }

    fn gizmo(mode: ModeControl) -> GizmoState {
        GizmoState { enabled: true, mode }
    }

    fn press_at(x: f32, y: f32) -> MockController {
        MockController {
            down: vec![Button::MouseLeft],
            pressed: vec![Button::MouseLeft],
            pointer: Some((x, y)),
            ..Default::default()
        }
    }

    fn drag_to(x: f32, y: f32, delta: (f32, f32)) -> MockController {
        MockController {
            down: vec![Button::MouseLeft],
            pointer: Some((x, y)),
            delta,
            ..Default::default()
        }
    }

    fn run(controls: &mut TransformControls, mode: ModeControl, transform: &mut Transform, to: (f32, f32), delta: (f32, f32)) {
        let cam = camera();
        controls.update(&press_at(640.0, 360.0), &cam, gizmo(mode), transform, &bounds(), VIEWPORT);
        assert!(controls.dragging());
        controls.update(&drag_to(to.0, to.1, delta), &cam, gizmo(mode), transform, &bounds(), VIEWPORT);
    }

    #[test]
    fn test_press_on_empty_space_does_not_drag() {
        let mut controls = TransformControls::default();
        let mut transform = Transform::default();
        controls.update(&press_at(5.0, 5.0), &camera(), gizmo(ModeControl::Translate), &mut transform, &bounds(), VIEWPORT);
        assert!(!controls.dragging());
    }

    #[test]
    fn test_disabled_gizmo_never_drags() {
        let mut controls = TransformControls::default();
        let mut transform = Transform::default();
        let off = GizmoState {
            enabled: false,
            mode: ModeControl::Translate,
        };
        controls.update(&press_at(640.0, 360.0), &camera(), off, &mut transform, &bounds(), VIEWPORT);
        assert!(!controls.dragging());
    }

    #[test]
    fn test_free_translate_follows_cursor() {
        let mut controls = TransformControls::default();
        let mut transform = Transform::default();
        run(&mut controls, ModeControl::Translate, &mut transform, (740.0, 360.0), (100.0, 0.0));
        assert!(transform.position.x > 10.0);
        assert!(transform.position.y.abs() < 1e-2);
        assert!(transform.position.z.abs() < 1e-2);
    }

    #[test]
    fn test_axis_constrained_translate() {
        let mut controls = TransformControls::default();
        controls.toggle_axis(Axis::Y);
        let mut transform = Transform::default();
        run(&mut controls, ModeControl::Translate, &mut transform, (740.0, 300.0), (100.0, -60.0));
        assert!(transform.position.x.abs() < 1e-3);
        assert!(transform.position.y > 1.0);
    }

    #[test]
    fn test_rotate_about_constrained_axis() {
        let mut controls = TransformControls::default();
        controls.toggle_axis(Axis::Y);
        let mut transform = Transform::default();
        run(&mut controls, ModeControl::Rotate, &mut transform, (740.0, 360.0), (100.0, 0.0));
        assert!((transform.rotation.y - 1.0).abs() < 1e-4);
        assert!(transform.rotation.x.abs() < 1e-4);
    }

    #[test]
    fn test_uniform_scale_grows_when_dragging_up() {
        let mut controls = TransformControls::default();
        let mut transform = Transform::default();
        run(&mut controls, ModeControl::Scale, &mut transform, (640.0, 260.0), (0.0, -100.0));
        let e = std::f32::consts::E;
        assert!((transform.scale - Vec3::splat(e)).length() < 1e-3);
    }

    #[test]
    fn test_release_ends_drag() {
        let mut controls = TransformControls::default();
        let mut transform = Transform::default();
        run(&mut controls, ModeControl::Translate, &mut transform, (700.0, 360.0), (60.0, 0.0));
        controls.update(&MockController::default(), &camera(), gizmo(ModeControl::Translate), &mut transform, &bounds(), VIEWPORT);
        assert!(!controls.dragging());
    }

    #[test]
    fn test_axis_keys_toggle() {
        let mut controls = TransformControls::default();
        let keys = MockController {
            pressed: vec![Button::KeyX],
            ..Default::default()
        };
        let mut transform = Transform::default();
        controls.update(&keys, &camera(), gizmo(ModeControl::Translate), &mut transform, &bounds(), VIEWPORT);
        assert_eq!(controls.axis, Some(Axis::X));
        controls.update(&keys, &camera(), gizmo(ModeControl::Translate), &mut transform, &bounds(), VIEWPORT);
        assert_eq!(controls.axis, None);
    }
}
