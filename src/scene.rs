use std::f32::consts::FRAC_PI_2;

use glam::{Mat3, Mat4, Quat, Vec3};

use crate::camera::look_at;
use crate::params::{LightParams, MaterialKind, ModeControl, Params, Shape};

pub const MESH_START_POSITION: Vec3 = Vec3::new(0.0, 40.0, 0.0);

pub const GROUND_SIZE: f32 = 2000.0;
pub const GROUND_Y: f32 = -50.0;
pub const GROUND_COLOR: u32 = 0x808080;

pub const GRID_SIZE: f32 = 2000.0;
pub const GRID_DIVISIONS: u32 = 50;
pub const GRID_COLOR: u32 = 0x000000;
pub const GRID_OPACITY: f32 = 0.2;

pub const BACKGROUND_COLOR: u32 = 0xa0a0a0;

pub const AMBIENT_COLOR: u32 = 0xffffff;
pub const AMBIENT_INTENSITY: f32 = 0.1;

pub const SHADOW_MAP_SIZE: u32 = 512;
pub const SHADOW_NEAR: f32 = 10.0;
pub const SHADOW_FAR: f32 = 600.0;
const MIN_SHADOW_FOV: f32 = 0.01;

/// Position, euler rotation (XYZ order, radians) and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn quaternion(&self) -> Quat {
        Quat::from_rotation_x(self.rotation.x)
            * Quat::from_rotation_y(self.rotation.y)
            * Quat::from_rotation_z(self.rotation.z)
    }

    /// T * R * S
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }

    /// Move along an axis expressed in the object's rotated frame
    pub fn translate_on_axis(&mut self, axis: Vec3, distance: f32) {
        self.position += self.quaternion() * axis.normalize_or_zero() * distance;
    }

    pub fn set_quaternion(&mut self, q: Quat) {
        self.rotation = euler_xyz_from_quat(q);
    }
}

/// Inverse of `Transform::quaternion`
pub fn euler_xyz_from_quat(q: Quat) -> Vec3 {
    let m = Mat3::from_quat(q.normalize());
    // Row/column naming as in the rotation matrix m[row][col]
    let m11 = m.x_axis.x;
    let m12 = m.y_axis.x;
    let m13 = m.z_axis.x;
    let m22 = m.y_axis.y;
    let m23 = m.z_axis.y;
    let m32 = m.y_axis.z;
    let m33 = m.z_axis.z;

    let y = m13.clamp(-1.0, 1.0).asin();
    if m13.abs() < 0.999_999 {
        Vec3::new((-m23).atan2(m33), y, (-m12).atan2(m11))
    } else {
        // Gimbal lock: fold z into x
        Vec3::new(m32.atan2(m22), y, 0.0)
    }
}

/// The user-controlled object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshObject {
    pub shape: Shape,
    pub material: MaterialKind,
    pub color: u32,
    pub transform: Transform,
    pub cast_shadow: bool,
}

/// Ground plane lying in XZ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    pub visible: bool,
    pub color: u32,
    pub receive_shadow: bool,
    pub transform: Transform,
}

impl Default for Ground {
    fn default() -> Self {
        Self {
            visible: true,
            color: GROUND_COLOR,
            receive_shadow: true,
            transform: Transform {
                position: Vec3::new(0.0, GROUND_Y, 0.0),
                rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
                scale: Vec3::ONE,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Color(u32),
    EnvironmentCube,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

/// Perspective camera the spotlight renders its shadow map from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCamera {
    pub near: f32,
    pub far: f32,
    pub map_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub color: u32,
    pub intensity: f32,
    /// Zero means unbounded range
    pub distance: f32,
    /// Outer cone half angle in radians
    pub angle: f32,
    pub penumbra: f32,
    pub decay: f32,
    pub focus: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub shadow: ShadowCamera,
}

impl SpotLight {
    pub fn new(light: &LightParams, position: Vec3) -> Self {
        Self {
            color: light.light_color,
            intensity: light.intensity,
            distance: light.distance,
            angle: light.angle,
            penumbra: light.penumbra,
            decay: light.decay,
            focus: light.focus,
            position,
            target: Vec3::ZERO,
            shadow: ShadowCamera {
                near: SHADOW_NEAR,
                far: SHADOW_FAR,
                map_size: SHADOW_MAP_SIZE,
            },
        }
    }

    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Y)
    }

    pub fn cos_outer(&self) -> f32 {
        self.angle.cos()
    }

    pub fn cos_inner(&self) -> f32 {
        (self.angle * (1.0 - self.penumbra)).cos()
    }

    /// Full vertical field of view of the shadow camera
    pub fn shadow_fov(&self) -> f32 {
        (2.0 * self.angle * self.focus).max(MIN_SHADOW_FOV)
    }

    pub fn shadow_far(&self) -> f32 {
        if self.distance > 0.0 {
            self.distance
        } else {
            self.shadow.far
        }
    }

    pub fn shadow_view(&self) -> Mat4 {
        look_at(self.position, self.target)
    }

    pub fn shadow_projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.shadow_fov(), 1.0, self.shadow.near, self.shadow_far())
    }

    pub fn shadow_view_projection(&self) -> Mat4 {
        self.shadow_projection() * self.shadow_view()
    }
}

/// Transform-control state driven by the mode selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GizmoState {
    pub enabled: bool,
    pub mode: ModeControl,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub mesh: MeshObject,
    pub points_visible: bool,
    pub ground: Ground,
    pub grid_visible: bool,
    pub background: Background,
    pub ambient: AmbientLight,
    pub spot_light: SpotLight,
    pub gizmo: GizmoState,
}

impl Scene {
    pub fn new(params: &Params, light: &LightParams) -> Self {
        Self {
            mesh: MeshObject {
                shape: params.shape,
                material: params.material,
                color: params.color,
                transform: Transform::from_position(MESH_START_POSITION),
                cast_shadow: true,
            },
            points_visible: params.material.descriptor().points_overlay,
            ground: Ground::default(),
            grid_visible: true,
            background: Background::Color(BACKGROUND_COLOR),
            ambient: AmbientLight {
                color: AMBIENT_COLOR,
                intensity: AMBIENT_INTENSITY,
            },
            spot_light: SpotLight::new(light, params.light_position()),
            gizmo: GizmoState {
                enabled: params.mode_control != ModeControl::Disable,
                mode: params.mode_control,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_matrix_order() {
        let t = Transform {
            position: Vec3::new(10.0, 0.0, 0.0),
            rotation: Vec3::new(0.0, FRAC_PI_2, 0.0),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        // Scale first, then rotate +X onto -Z, then translate
        let p = t.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(10.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_translate_on_axis_uses_rotation() {
        let mut t = Transform::default();
        t.rotation.y = FRAC_PI_2;
        t.translate_on_axis(Vec3::NEG_Z, 1.0);
        // Local -Z turned a quarter about Y points down -X
        assert!((t.position - Vec3::new(-1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_euler_round_trip() {
        let rotation = Vec3::new(0.3, -0.7, 1.1);
        let t = Transform {
            rotation,
            ..Transform::default()
        };
        let back = euler_xyz_from_quat(t.quaternion());
        assert!((back - rotation).length() < 1e-4);
    }

    #[test]
    fn test_ground_lies_flat_below_origin() {
        let ground = Ground::default();
        let normal = ground.transform.matrix().transform_vector3(Vec3::Z);
        assert!((normal - Vec3::Y).length() < 1e-5);
        assert_eq!(ground.transform.position.y, -50.0);
    }

    #[test]
    fn test_spot_light_cone_and_shadow_camera() {
        let light = SpotLight::new(&LightParams::default(), Vec3::new(-50.0, 200.0, 50.0));
        assert!(light.cos_inner() > light.cos_outer());
        assert_eq!(light.shadow_far(), 400.0);
        assert!((light.shadow_fov() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        // Target projects to the centre of the shadow map
        let clip = light.shadow_view_projection() * light.target.extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }

    #[test]
    fn test_shadow_fov_never_collapses() {
        let light = SpotLight::new(
            &LightParams {
                focus: 0.0,
                ..LightParams::default()
            },
            Vec3::new(0.0, 200.0, 0.0),
        );
        assert!(light.shadow_fov() > 0.0);
        // Straight down still yields a finite view
        assert!(light.shadow_view().is_finite());
    }

    #[test]
    fn test_new_scene_from_defaults() {
        let scene = Scene::new(&Params::default(), &LightParams::default());
        assert_eq!(scene.mesh.shape, Shape::Tube);
        assert_eq!(scene.mesh.transform.position, MESH_START_POSITION);
        assert!(!scene.points_visible);
        assert!(scene.gizmo.enabled);
        assert_eq!(scene.background, Background::Color(0xa0a0a0));
        assert_eq!(scene.spot_light.position, Vec3::new(-50.0, 200.0, 50.0));
    }
}
