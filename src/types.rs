use glam::{Mat4, Vec2, Vec3};

/// Object flag bits, mirrored in `mesh.wgsl`
pub const FLAG_TEXTURED: u32 = 1;
pub const FLAG_ENV_MAP: u32 = 1 << 1;
pub const FLAG_RECEIVE_SHADOW: u32 = 1 << 2;
pub const FLAG_DOUBLE_SIDED: u32 = 1 << 3;

/// Per-frame camera, light and viewport data
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub light_view_proj: [[f32; 4]; 4],
    /// Inverse of a rotation-only view projection, for the sky pass
    pub sky_inv_view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub ambient_intensity: f32,
    pub ambient_color: [f32; 3],
    pub light_intensity: f32,
    pub light_position: [f32; 3],
    pub light_distance: f32,
    pub light_direction: [f32; 3],
    pub light_decay: f32,
    pub light_color: [f32; 3],
    pub cos_outer: f32,
    pub viewport: [f32; 2],
    pub cos_inner: f32,
    pub shadow_texel: f32,
}

/// Per-object transform and material data
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    /// Linear RGB plus opacity
    pub color: [f32; 4],
    pub specular: [f32; 3],
    pub shininess: f32,
    pub shading: u32,
    pub flags: u32,
    pub reflectivity: f32,
    pub point_size: f32,
}

impl ObjectUniform {
    pub fn new(model: Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: [1.0; 4],
            specular: [0.0; 3],
            shininess: 30.0,
            shading: 0,
            flags: 0,
            reflectivity: 0.0,
            point_size: 0.0,
        }
    }

    pub fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }
}

/// Mesh vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Same buffer read once per instance, position only (point sprites)
    pub fn instance_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Colored line vertex for grid, helpers and gizmo
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl LineVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];

    pub fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: position.to_array(),
            color,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_sizes_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<SceneUniform>(), 288);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 176);
    }

    #[test]
    fn test_vertex_strides() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);
    }

    #[test]
    fn test_normal_matrix_of_uniform_scale_is_scaled_identity() {
        let object = ObjectUniform::new(Mat4::from_scale(Vec3::splat(2.0)));
        let n = Mat4::from_cols_array_2d(&object.normal_matrix);
        assert!((n.x_axis.x - 0.5).abs() < 1e-6);
        assert!(n.x_axis.y.abs() < 1e-6);
    }

    #[test]
    fn test_flags() {
        let mut object = ObjectUniform::new(Mat4::IDENTITY);
        object.flags = FLAG_TEXTURED | FLAG_DOUBLE_SIDED;
        assert!(object.has_flag(FLAG_TEXTURED));
        assert!(object.has_flag(FLAG_DOUBLE_SIDED));
        assert!(!object.has_flag(FLAG_ENV_MAP));
    }
}
