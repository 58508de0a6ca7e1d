use glam::{Mat4, Vec3, Vec4Swizzles};

use crate::math::Ray;

pub const FOV_Y_DEGREES: f32 = 45.0;
pub const PERSPECTIVE_NEAR: f32 = 1.0;
pub const PERSPECTIVE_FAR: f32 = 1000.0;

/// Half height of the orthographic frustum
pub const ORTHO_HALF_HEIGHT: f32 = 600.0;
pub const ORTHO_NEAR: f32 = 0.01;
pub const ORTHO_FAR: f32 = 30000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

/// Orthographic frustum bounds; `zoom` divides all four sides
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoFrustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub zoom: f32,
}

impl OrthoFrustum {
    fn new(aspect: f32) -> Self {
        Self {
            left: -ORTHO_HALF_HEIGHT * aspect,
            right: ORTHO_HALF_HEIGHT * aspect,
            top: ORTHO_HALF_HEIGHT,
            bottom: -ORTHO_HALF_HEIGHT,
            zoom: 1.0,
        }
    }
}

/// Camera looking at a target point, with both projections kept in sync
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub projection: Projection,
    pub aspect: f32,
    pub ortho: OrthoFrustum,
}

impl OrbitCamera {
    pub fn new(position: Vec3, width: u32, height: u32) -> Self {
        let aspect = aspect_ratio(width, height);
        Self {
            position,
            target: Vec3::ZERO,
            projection: Projection::Perspective,
            aspect,
            ortho: OrthoFrustum::new(aspect),
        }
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    pub fn view_matrix(&self) -> Mat4 {
        look_at(self.position, self.target)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective => self.perspective_matrix(),
            Projection::Orthographic => {
                let o = &self.ortho;
                Mat4::orthographic_rh(
                    o.left / o.zoom,
                    o.right / o.zoom,
                    o.bottom / o.zoom,
                    o.top / o.zoom,
                    ORTHO_NEAR,
                    ORTHO_FAR,
                )
            }
        }
    }

    pub fn perspective_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, PERSPECTIVE_NEAR, PERSPECTIVE_FAR)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Inverse of the perspective projection with the translation dropped
    /// from the view, mapping clip space to world directions for the sky
    pub fn sky_inverse_view_projection(&self) -> Mat4 {
        let rotation = Mat4::look_to_rh(Vec3::ZERO, self.forward(), up_for(self.forward()));
        (self.perspective_matrix() * rotation).inverse()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
        self.ortho.left = self.ortho.bottom * self.aspect;
        self.ortho.right = self.ortho.top * self.aspect;
    }

    pub fn toggle_projection(&mut self) {
        self.projection = match self.projection {
            Projection::Perspective => Projection::Orthographic,
            Projection::Orthographic => Projection::Perspective,
        };
        log::info!("Camera projection: {:?}", self.projection);
    }

    /// Back to the start position, zoom and target
    pub fn reset(&mut self, position: Vec3) {
        self.position = position;
        self.target = Vec3::ZERO;
        self.ortho.zoom = 1.0;
    }

    /// World-space ray through a pixel (origin top-left)
    pub fn ray_from_screen(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let ndc_x = 2.0 * x / width.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * y / height.max(1.0);
        let inverse = self.view_projection().inverse();

        let near = inverse * glam::Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inverse * glam::Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.xyz() / near.w;
        let far = far.xyz() / far.w;
        Ray::new(near, far - near)
    }

    /// World units per screen pixel at the target, for pan speed
    pub fn world_per_pixel(&self, height: f32) -> f32 {
        match self.projection {
            Projection::Perspective => {
                2.0 * self.distance() * (FOV_Y_DEGREES.to_radians() / 2.0).tan() / height.max(1.0)
            }
            Projection::Orthographic => (self.ortho.top - self.ortho.bottom) / self.ortho.zoom / height.max(1.0),
        }
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}

fn up_for(forward: Vec3) -> Vec3 {
    if forward.cross(Vec3::Y).length_squared() < 1e-8 {
        Vec3::Z
    } else {
        Vec3::Y
    }
}

/// Right-handed look-at that survives looking straight up or down
pub fn look_at(eye: Vec3, target: Vec3) -> Mat4 {
    let forward = (target - eye).try_normalize().unwrap_or(Vec3::NEG_Z);
    Mat4::look_to_rh(eye, forward, up_for(forward))
}
