use std::f32::consts::TAU;

use glam::{Mat4, Vec3, Vec4Swizzles};

use crate::camera::{OrbitCamera, Projection};
use crate::controls::Axis;
use crate::math::hex_to_linear;
use crate::params::ModeControl;
use crate::scene::{SpotLight, GRID_COLOR, GRID_DIVISIONS, GRID_OPACITY, GRID_SIZE, GROUND_Y};
use crate::types::LineVertex;

const CONE_SEGMENTS: usize = 32;
const GIZMO_CIRCLE_SEGMENTS: usize = 48;
/// Fraction of the view height the gizmo axes span
const GIZMO_SCREEN_FRACTION: f32 = 0.15;

const FRUSTUM_COLOR: u32 = 0xffaa00;
const CONE_COLOR: u32 = 0xff0000;
const TARGET_COLOR: u32 = 0xffffff;
const AXIS_COLORS: [u32; 3] = [0xff0000, 0x00ff00, 0x0000ff];
const ACTIVE_AXIS_COLOR: u32 = 0xffff00;

fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let [r, g, b] = hex_to_linear(hex);
    [r, g, b, alpha]
}

fn push_line(out: &mut Vec<LineVertex>, a: Vec3, b: Vec3, color: [f32; 4]) {
    out.push(LineVertex::new(a, color));
    out.push(LineVertex::new(b, color));
}

/// Square grid in the ground plane
pub fn grid_lines() -> Vec<LineVertex> {
    let color = rgba(GRID_COLOR, GRID_OPACITY);
    let half = GRID_SIZE / 2.0;
    let step = GRID_SIZE / GRID_DIVISIONS as f32;
    let y = GROUND_Y;

    let mut out = Vec::with_capacity((GRID_DIVISIONS as usize + 1) * 4);
    for i in 0..=GRID_DIVISIONS {
        let k = -half + i as f32 * step;
        push_line(&mut out, Vec3::new(-half, y, k), Vec3::new(half, y, k), color);
        push_line(&mut out, Vec3::new(k, y, -half), Vec3::new(k, y, half), color);
    }
    out
}

/// Orthonormal right/up pair perpendicular to `forward`
fn basis(forward: Vec3) -> (Vec3, Vec3) {
    let helper = if forward.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
    let right = forward.cross(helper).normalize();
    let up = right.cross(forward);
    (right, up)
}

/// Cone outline of the spotlight: spokes from the apex plus the rim circle
pub fn spot_light_lines(light: &SpotLight) -> Vec<LineVertex> {
    let color = rgba(light.color, 1.0);
    let length = if light.distance > 0.0 { light.distance } else { 1000.0 };
    let width = length * light.angle.tan();
    let forward = light.direction();
    let (right, up) = basis(forward);
    let apex = light.position;
    let centre = apex + forward * length;
    let rim = |phi: f32| centre + (right * phi.cos() + up * phi.sin()) * width;

    let mut out = Vec::with_capacity(2 * (4 + CONE_SEGMENTS));
    for spoke in 0..4 {
        push_line(&mut out, apex, rim(spoke as f32 * TAU / 4.0), color);
    }
    for i in 0..CONE_SEGMENTS {
        let a = i as f32 * TAU / CONE_SEGMENTS as f32;
        let b = (i + 1) as f32 * TAU / CONE_SEGMENTS as f32;
        push_line(&mut out, rim(a), rim(b), color);
    }
    out
}

/// Frustum corners of a view projection: near plane then far plane,
/// each as bottom-left, bottom-right, top-right, top-left
pub fn frustum_corners(view_projection: Mat4) -> [Vec3; 8] {
    let inverse = view_projection.inverse();
    let ndc = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    let mut corners = [Vec3::ZERO; 8];
    for (plane, z) in [0.0f32, 1.0].into_iter().enumerate() {
        for (i, (x, y)) in ndc.into_iter().enumerate() {
            let p = inverse * glam::Vec4::new(x, y, z, 1.0);
            corners[plane * 4 + i] = p.xyz() / p.w;
        }
    }
    corners
}

/// Shadow camera frustum, the spokes from its eye and the aim line
pub fn shadow_camera_lines(light: &SpotLight) -> Vec<LineVertex> {
    let corners = frustum_corners(light.shadow_view_projection());
    let frustum = rgba(FRUSTUM_COLOR, 1.0);
    let cone = rgba(CONE_COLOR, 1.0);

    let mut out = Vec::with_capacity(2 * 17);
    for i in 0..4 {
        let j = (i + 1) % 4;
        push_line(&mut out, corners[i], corners[j], frustum);
        push_line(&mut out, corners[4 + i], corners[4 + j], frustum);
        push_line(&mut out, corners[i], corners[4 + i], frustum);
        push_line(&mut out, light.position, corners[i], cone);
    }
    let far_centre = corners[4..].iter().copied().sum::<Vec3>() / 4.0;
    push_line(&mut out, light.position, far_centre, rgba(TARGET_COLOR, 1.0));
    out
}

/// Gizmo size that stays roughly constant on screen
pub fn gizmo_size(camera: &OrbitCamera, position: Vec3) -> f32 {
    let view_height = match camera.projection {
        Projection::Perspective => {
            2.0 * camera.position.distance(position) * (crate::camera::FOV_Y_DEGREES.to_radians() / 2.0).tan()
        }
        Projection::Orthographic => (camera.ortho.top - camera.ortho.bottom) / camera.ortho.zoom,
    };
    view_height * GIZMO_SCREEN_FRACTION
}

/// World-axis handles at `position`: lines for translate and scale,
/// circles for rotate. The constrained axis is highlighted.
pub fn gizmo_lines(position: Vec3, mode: ModeControl, axis: Option<Axis>, size: f32) -> Vec<LineVertex> {
    let mut out = Vec::new();
    for (i, a) in Axis::ALL.into_iter().enumerate() {
        let hex = if axis == Some(a) { ACTIVE_AXIS_COLOR } else { AXIS_COLORS[i] };
        let color = rgba(hex, 1.0);
        let dir = a.unit();

        match mode {
            ModeControl::Disable => {}
            ModeControl::Translate => {
                let tip = position + dir * size;
                push_line(&mut out, position, tip, color);
                // Arrow head
                let (right, up) = basis(dir);
                for side in [right, -right, up, -up] {
                    push_line(&mut out, tip, tip - dir * size * 0.1 + side * size * 0.04, color);
                }
            }
            ModeControl::Scale => {
                let tip = position + dir * size;
                push_line(&mut out, position, tip, color);
                // Box end as a cross
                let (right, up) = basis(dir);
                let h = size * 0.05;
                push_line(&mut out, tip - right * h, tip + right * h, color);
                push_line(&mut out, tip - up * h, tip + up * h, color);
            }
            ModeControl::Rotate => {
                let (right, up) = basis(dir);
                let point = |phi: f32| position + (right * phi.cos() + up * phi.sin()) * size;
                for s in 0..GIZMO_CIRCLE_SEGMENTS {
                    let a0 = s as f32 * TAU / GIZMO_CIRCLE_SEGMENTS as f32;
                    let a1 = (s + 1) as f32 * TAU / GIZMO_CIRCLE_SEGMENTS as f32;
                    push_line(&mut out, point(a0), point(a1), color);
                }
            }
        }
    }
    out
}
