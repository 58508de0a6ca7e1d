use wgpu::util::DeviceExt;

use crate::geometry::Geometry;
use crate::types::{LineVertex, Vertex};

/// Interleave a mesh's attributes into shader vertices
pub fn vertices(geometry: &Geometry) -> Vec<Vertex> {
    geometry
        .positions
        .iter()
        .zip(&geometry.normals)
        .zip(&geometry.uvs)
        .map(|((&p, &n), &uv)| Vertex::new(p, n, uv))
        .collect()
}

/// One shape on the GPU, with triangle and edge index buffers
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
    pub triangle_buffer: wgpu::Buffer,
    pub triangle_index_count: u32,
    pub edge_buffer: wgpu::Buffer,
    pub edge_index_count: u32,
}

impl GpuMesh {
    pub fn new(device: &wgpu::Device, label: &str, geometry: &Geometry) -> Self {
        let vertices = vertices(geometry);
        let edges = geometry.edge_indices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertices")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let triangle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Triangles")),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let edge_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Edges")),
            contents: bytemuck::cast_slice(&edges),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            triangle_buffer,
            triangle_index_count: geometry.indices.len() as u32,
            edge_buffer,
            edge_index_count: edges.len() as u32,
        }
    }

    pub fn draw_triangles(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.triangle_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.triangle_index_count, 0, 0..1);
    }

    pub fn draw_edges(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.set_index_buffer(self.edge_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.edge_index_count, 0, 0..1);
    }

    /// Six sprite corners per vertex, the vertex buffer read per instance
    pub fn draw_points(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..6, 0..self.vertex_count);
    }
}

/// Growable vertex buffer rewritten every frame
pub struct LineBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl LineBuffer {
    const INITIAL_CAPACITY: usize = 1024;

    pub fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate(device, label, Self::INITIAL_CAPACITY),
            capacity: Self::INITIAL_CAPACITY,
            len: 0,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<LineVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, lines: &[LineVertex]) {
        if lines.len() > self.capacity {
            self.capacity = lines.len().next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.capacity);
            log::debug!("Grew {} to {} vertices", self.label, self.capacity);
        }
        if !lines.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(lines));
        }
        self.len = lines.len() as u32;
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.is_empty() {
            return;
        }
        pass.set_vertex_buffer(0, self.buffer.slice(..));
        pass.draw(0..self.len, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    #[test]
    fn test_vertices_interleave_attributes() {
        let mut geometry = Geometry::new();
        geometry.positions = vec![Vec3::X, Vec3::Y];
        geometry.normals = vec![Vec3::Z, Vec3::Z];
        geometry.uvs = vec![Vec2::ZERO, Vec2::ONE];

        let v = vertices(&geometry);
        assert_eq!(v.len(), 2);
        assert_eq!(v[1].position, [0.0, 1.0, 0.0]);
        assert_eq!(v[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(v[1].uv, [1.0, 1.0]);
    }
}
