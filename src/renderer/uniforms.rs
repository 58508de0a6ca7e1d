use crate::camera::OrbitCamera;
use crate::material::GROUND;
use crate::math::hex_to_linear;
use crate::scene::{Ground, MeshObject, Scene};
use crate::types::{ObjectUniform, SceneUniform, FLAG_RECEIVE_SHADOW};

/// Point sprite diameter in logical pixels
pub const POINT_SIZE: f32 = 5.0;

/// `viewport` is the surface size in physical pixels
pub fn scene_uniform(scene: &Scene, camera: &OrbitCamera, viewport: [f32; 2]) -> SceneUniform {
    let light = &scene.spot_light;
    SceneUniform {
        view_proj: camera.view_projection().to_cols_array_2d(),
        light_view_proj: light.shadow_view_projection().to_cols_array_2d(),
        sky_inv_view_proj: camera.sky_inverse_view_projection().to_cols_array_2d(),
        camera_position: camera.position.to_array(),
        ambient_intensity: scene.ambient.intensity,
        ambient_color: hex_to_linear(scene.ambient.color),
        light_intensity: light.intensity,
        light_position: light.position.to_array(),
        light_distance: light.distance,
        light_direction: light.direction().to_array(),
        light_decay: light.decay,
        light_color: hex_to_linear(light.color),
        cos_outer: light.cos_outer(),
        viewport,
        cos_inner: light.cos_inner(),
        shadow_texel: 1.0 / light.shadow.map_size as f32,
    }
}

pub fn mesh_uniform(mesh: &MeshObject) -> ObjectUniform {
    let mut uniform = ObjectUniform::new(mesh.transform.matrix());
    mesh.material.descriptor().apply(&mut uniform, hex_to_linear(mesh.color));
    uniform
}

pub fn ground_uniform(ground: &Ground) -> ObjectUniform {
    let mut uniform = ObjectUniform::new(ground.transform.matrix());
    if ground.receive_shadow {
        uniform.flags |= FLAG_RECEIVE_SHADOW;
    }
    GROUND.apply(&mut uniform, hex_to_linear(ground.color));
    uniform
}

/// White sprites at the mesh's vertices; `scale_factor` maps logical to physical pixels
pub fn points_uniform(mesh: &MeshObject, scale_factor: f32) -> ObjectUniform {
    let mut uniform = ObjectUniform::new(mesh.transform.matrix());
    uniform.point_size = POINT_SIZE * scale_factor;
    uniform
}
