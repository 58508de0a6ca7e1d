use crate::params::MaterialKind;
use crate::types::{ObjectUniform, FLAG_DOUBLE_SIDED, FLAG_ENV_MAP, FLAG_TEXTURED};

/// Lighting model evaluated in the mesh shader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shading {
    Unlit,
    Lambert,
    Phong,
}

/// How the mesh surface is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDescriptor {
    pub shading: Shading,
    /// Face normals from screen-space derivatives instead of vertex normals
    pub flat_shading: bool,
    pub specular: u32,
    pub shininess: f32,
    pub double_sided: bool,
    /// Draw unique edges as lines instead of triangles
    pub wireframe: bool,
    pub color_map: bool,
    pub env_map: bool,
    /// Environment cube doubles as the scene background, ground and grid hidden
    pub reflective_scene: bool,
    pub points_overlay: bool,
}

const PHONG_SPECULAR: u32 = 0x111111;
const PHONG_SHININESS: f32 = 30.0;

const FLAT: MaterialDescriptor = MaterialDescriptor {
    shading: Shading::Phong,
    flat_shading: true,
    specular: 0x000000,
    shininess: PHONG_SHININESS,
    double_sided: true,
    wireframe: false,
    color_map: false,
    env_map: false,
    reflective_scene: false,
    points_overlay: false,
};

const GLOSSY: MaterialDescriptor = MaterialDescriptor {
    flat_shading: false,
    specular: PHONG_SPECULAR,
    ..FLAT
};

/// Single-sided default Phong surface of the ground plane
pub const GROUND: MaterialDescriptor = MaterialDescriptor {
    double_sided: false,
    ..GLOSSY
};

impl MaterialKind {
    pub fn descriptor(self) -> MaterialDescriptor {
        match self {
            // Mesh keeps the flat material underneath the points
            MaterialKind::Point => MaterialDescriptor {
                points_overlay: true,
                ..FLAT
            },
            MaterialKind::Wireframe => MaterialDescriptor {
                shading: Shading::Unlit,
                flat_shading: false,
                double_sided: false,
                wireframe: true,
                ..FLAT
            },
            MaterialKind::Smooth => MaterialDescriptor {
                shading: Shading::Lambert,
                flat_shading: false,
                ..FLAT
            },
            MaterialKind::Flat => FLAT,
            MaterialKind::Glossy => GLOSSY,
            MaterialKind::Textured => MaterialDescriptor {
                color_map: true,
                ..GLOSSY
            },
            MaterialKind::Reflective => MaterialDescriptor {
                env_map: true,
                reflective_scene: true,
                ..GLOSSY
            },
        }
    }
}

impl MaterialDescriptor {
    /// Shader-side shading code: 0 unlit, 1 lambert, 2 phong, 3 flat phong
    pub fn shading_code(&self) -> u32 {
        match (self.shading, self.flat_shading) {
            (Shading::Unlit, _) => 0,
            (Shading::Lambert, _) => 1,
            (Shading::Phong, false) => 2,
            (Shading::Phong, true) => 3,
        }
    }

    pub fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.color_map {
            flags |= FLAG_TEXTURED;
        }
        if self.env_map {
            flags |= FLAG_ENV_MAP;
        }
        if self.double_sided {
            flags |= FLAG_DOUBLE_SIDED;
        }
        flags
    }

    /// Write the material fields of an object uniform; `color` is linear RGB
    pub fn apply(&self, uniform: &mut ObjectUniform, color: [f32; 3]) {
        uniform.color = [color[0], color[1], color[2], 1.0];
        uniform.specular = crate::math::hex_to_linear(self.specular);
        uniform.shininess = self.shininess;
        uniform.shading = self.shading_code();
        uniform.flags = (uniform.flags & !(FLAG_TEXTURED | FLAG_ENV_MAP | FLAG_DOUBLE_SIDED)) | self.flags();
        uniform.reflectivity = if self.env_map { 1.0 } else { 0.0 };
    }
}
