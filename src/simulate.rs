use glam::Vec3;

use crate::params::{Animation, LightParams, MaterialKind, ModeControl, Params};
use crate::scene::{Background, Scene, BACKGROUND_COLOR, MESH_START_POSITION};

/// Seconds per millisecond, the animation clock's unit
const TIME_SCALE: f64 = 0.001;

const ORBIT_RADIUS: f32 = 300.0;
const SCALE_STEP: f32 = 0.02;
const ROTATION_STEP_X: f32 = 0.02;
const ROTATION_STEP_Y: f32 = 0.03;
const TRANSLATE_STEP: f32 = 0.05;

/// Apply the current selections to the scene. `time_ms` is the animation
/// clock in milliseconds; per-frame increments accumulate on every call.
pub fn simulate(params: &Params, scene: &mut Scene, time_ms: f64) {
    scene.mesh.shape = params.shape;

    let descriptor = params.material.descriptor();
    scene.points_visible = descriptor.points_overlay;

    scene.mesh.material = params.material;
    if descriptor.reflective_scene {
        scene.background = Background::EnvironmentCube;
    }

    scene.mesh.color = params.color;
    scene.spot_light.position = params.light_position();

    scene.gizmo.enabled = params.mode_control != ModeControl::Disable;
    if scene.gizmo.enabled {
        scene.gizmo.mode = params.mode_control;
    }

    animate(params.animation, scene, time_ms);
}

fn animate(animation: Animation, scene: &mut Scene, time_ms: f64) {
    let t = time_ms * TIME_SCALE;
    let (sin, cos) = (t.sin() as f32, t.cos() as f32);
    let transform = &mut scene.mesh.transform;

    match animation {
        Animation::Disable => {}
        Animation::Scaling => {
            transform.position = Vec3::new(cos * ORBIT_RADIUS, cos * 30.0, sin * ORBIT_RADIUS);
            transform.scale.x += SCALE_STEP;
            transform.scale.z += SCALE_STEP;
        }
        Animation::Rotation => {
            transform.position = Vec3::new(sin * ORBIT_RADIUS, sin * 30.0, cos * ORBIT_RADIUS);
            transform.rotation.x += ROTATION_STEP_X;
            transform.rotation.y += ROTATION_STEP_Y;
        }
        Animation::Translate => {
            transform.position = Vec3::new(cos * ORBIT_RADIUS, sin * 2.0, cos * ORBIT_RADIUS);
            transform.translate_on_axis(Vec3::NEG_Z, TRANSLATE_STEP);
        }
    }
}

/// Material selector change: the reflective look hides the floor
pub fn on_material_changed(material: MaterialKind, scene: &mut Scene) {
    let reflective = material.descriptor().reflective_scene;
    scene.ground.visible = !reflective;
    scene.grid_visible = !reflective;
    if !reflective {
        scene.background = Background::Color(BACKGROUND_COLOR);
    }
}

/// Animation selector change: switching off puts the mesh back
pub fn on_animation_changed(animation: Animation, scene: &mut Scene) {
    if animation == Animation::Disable {
        let transform = &mut scene.mesh.transform;
        transform.position = MESH_START_POSITION;
        transform.rotation.x = 0.0;
        transform.rotation.y = 0.0;
    }
}

pub fn apply_light_params(light: &LightParams, scene: &mut Scene) {
    let spot = &mut scene.spot_light;
    spot.color = light.light_color;
    spot.intensity = light.intensity;
    spot.distance = light.distance;
    spot.angle = light.angle;
    spot.penumbra = light.penumbra;
    spot.decay = light.decay;
    spot.focus = light.focus;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Shape;

    fn scene() -> Scene {
        Scene::new(&Params::default(), &LightParams::default())
    }

    #[test]
    fn test_simulate_copies_selections() {
        let mut scene = scene();
        let params = Params {
            shape: Shape::Cone,
            material: MaterialKind::Glossy,
            color: 0x336699,
            lx: 10.0,
            ly: 300.0,
            lz: -20.0,
            mode_control: ModeControl::Scale,
            ..Params::default()
        };
        simulate(&params, &mut scene, 0.0);
        assert_eq!(scene.mesh.shape, Shape::Cone);
        assert_eq!(scene.mesh.material, MaterialKind::Glossy);
        assert_eq!(scene.mesh.color, 0x336699);
        assert_eq!(scene.spot_light.position, Vec3::new(10.0, 300.0, -20.0));
        assert!(scene.gizmo.enabled);
        assert_eq!(scene.gizmo.mode, ModeControl::Scale);
    }

    #[test]
    fn test_disable_mode_turns_gizmo_off_and_keeps_last_mode() {
        let mut scene = scene();
        let params = Params {
            mode_control: ModeControl::Disable,
            ..Params::default()
        };
        simulate(&params, &mut scene, 0.0);
        assert!(!scene.gizmo.enabled);
        assert_eq!(scene.gizmo.mode, ModeControl::Translate);
    }

    #[test]
    fn test_disable_animation_leaves_transform_alone() {
        let mut scene = scene();
        let before = scene.mesh.transform;
        simulate(&Params::default(), &mut scene, 12345.0);
        assert_eq!(scene.mesh.transform, before);
    }

    fn animated(animation: Animation, time_ms: f64) -> Scene {
        let mut scene = scene();
        let params = Params {
            animation,
            ..Params::default()
        };
        simulate(&params, &mut scene, time_ms);
        scene
    }

    fn assert_close(actual: Vec3, expected: Vec3) {
        assert!((actual - expected).length() < 1e-4, "{:?} != {:?}", actual, expected);
    }

    #[test]
    fn test_scaling_orbits_and_widens() {
        let (sin, cos) = 1.0_f32.sin_cos();
        let transform = animated(Animation::Scaling, 1000.0).mesh.transform;
        assert_close(transform.position, Vec3::new(cos * 300.0, cos * 30.0, sin * 300.0));
        assert!((transform.scale.x - 1.02).abs() < 1e-6);
        assert!((transform.scale.z - 1.02).abs() < 1e-6);
        assert_eq!(transform.scale.y, 1.0);
        assert_eq!(transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_rotation_orbits_and_spins() {
        let (sin, cos) = 1.0_f32.sin_cos();
        let transform = animated(Animation::Rotation, 1000.0).mesh.transform;
        assert_close(transform.position, Vec3::new(sin * 300.0, sin * 30.0, cos * 300.0));
        assert!((transform.rotation.x - 0.02).abs() < 1e-6);
        assert!((transform.rotation.y - 0.03).abs() < 1e-6);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn test_translate_steps_along_local_negative_z() {
        let (sin, cos) = 1.0_f32.sin_cos();
        let transform = animated(Animation::Translate, 1000.0).mesh.transform;
        assert_close(transform.position, Vec3::new(cos * 300.0, sin * 2.0, cos * 300.0 - 0.05));
    }

    #[test]
    fn test_translate_step_follows_object_rotation() {
        let mut scene = scene();
        scene.mesh.transform.rotation.y = std::f32::consts::FRAC_PI_2;
        let params = Params {
            animation: Animation::Translate,
            ..Params::default()
        };
        simulate(&params, &mut scene, 0.0);
        // Local -Z faces world -X after a quarter turn about Y
        assert_close(scene.mesh.transform.position, Vec3::new(300.0 - 0.05, 0.0, 300.0));
    }

    #[test]
    fn test_points_follow_material_overlay() {
        let mut scene = scene();
        for material in MaterialKind::ALL {
            let params = Params {
                material,
                ..Params::default()
            };
            simulate(&params, &mut scene, 0.0);
            assert_eq!(scene.points_visible, material == MaterialKind::Point, "{:?}", material);
        }
    }

    #[test]
    fn test_on_material_changed_toggles_floor() {
        let mut scene = scene();
        on_material_changed(MaterialKind::Reflective, &mut scene);
        assert!(!scene.ground.visible);
        assert!(!scene.grid_visible);

        scene.background = Background::EnvironmentCube;
        on_material_changed(MaterialKind::Textured, &mut scene);
        assert!(scene.ground.visible);
        assert!(scene.grid_visible);
        assert_eq!(scene.background, Background::Color(BACKGROUND_COLOR));
    }

    #[test]
    fn test_apply_light_params() {
        let mut scene = scene();
        let light = LightParams {
            light_color: 0xff0000,
            intensity: 2.0,
            distance: 700.0,
            angle: 0.5,
            penumbra: 0.3,
            decay: 1.5,
            focus: 0.5,
        };
        apply_light_params(&light, &mut scene);
        let spot = &scene.spot_light;
        assert_eq!(spot.color, 0xff0000);
        assert_eq!(spot.intensity, 2.0);
        assert_eq!(spot.distance, 700.0);
        assert_eq!(spot.angle, 0.5);
        assert_eq!(spot.penumbra, 0.3);
        assert_eq!(spot.decay, 1.5);
        assert_eq!(spot.focus, 0.5);
    }
}
