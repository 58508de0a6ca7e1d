mod curve;
mod lathe;
mod primitives;
mod teapot;
mod tube;

use std::collections::{HashMap, HashSet};

use glam::{Mat3, Mat4, Vec2, Vec3};

use crate::math::AABB;
use crate::params::Shape;

pub use curve::{CubicBezier, Curve, FrenetFrames, SineCurve};
pub use lathe::lathe;
pub use primitives::{box_geometry, cone, cylinder, octahedron, plane, sphere, torus, torus_knot};
pub use teapot::teapot;
pub use tube::{tube, tube_with_radius};

/// Indexed triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub(crate) fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    pub(crate) fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Append another mesh, rebasing its indices
    pub fn merge(&mut self, other: &Geometry) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + offset));
    }

    /// Bake an affine transform into positions and normals
    pub fn transform(&mut self, matrix: &Mat4) {
        let normal_matrix = Mat3::from_mat4(*matrix).inverse().transpose();
        for p in &mut self.positions {
            *p = matrix.transform_point3(*p);
        }
        for n in &mut self.normals {
            *n = (normal_matrix * *n).normalize_or_zero();
        }
    }

    pub fn translated(mut self, offset: Vec3) -> Self {
        self.transform(&Mat4::from_translation(offset));
        self
    }

    /// Local-space bounds; a degenerate box at the origin when empty
    pub fn bounds(&self) -> AABB {
        AABB::from_points(&self.positions).unwrap_or(AABB::new(Vec3::ZERO, Vec3::ZERO))
    }

    /// Unique undirected edges of every triangle, for line rendering
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    edges.push([key.0, key.1]);
                }
            }
        }
        edges
    }

    /// Flattened edge list as an index buffer
    pub fn edge_indices(&self) -> Vec<u32> {
        self.edges().into_iter().flatten().collect()
    }

    /// Recompute smooth normals by area-weighted face accumulation
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let face = (self.positions[b] - self.positions[a]).cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        self.normals = normals.into_iter().map(Vec3::normalize_or_zero).collect();
    }
}

/// Every selectable shape, built once at startup
pub struct GeometryLibrary {
    shapes: HashMap<Shape, Geometry>,
}

impl GeometryLibrary {
    pub fn build() -> Self {
        let shapes = Shape::ALL
            .iter()
            .map(|&shape| (shape, build_shape(shape)))
            .collect::<HashMap<_, _>>();

        for shape in Shape::ALL {
            let geometry = &shapes[&shape];
            log::debug!(
                "Built {:?}: {} vertices, {} triangles",
                shape,
                geometry.vertex_count(),
                geometry.triangle_count()
            );
        }

        Self { shapes }
    }

    pub fn get(&self, shape: Shape) -> &Geometry {
        // Every variant is inserted in build()
        &self.shapes[&shape]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Shape, &Geometry)> {
        Shape::ALL.into_iter().map(move |shape| (shape, self.get(shape)))
    }
}

/// Constructor arguments per shape
pub fn build_shape(shape: Shape) -> Geometry {
    match shape {
        Shape::Box => box_geometry(100.0, 100.0, 100.0),
        Shape::Sphere => sphere(100.0, 32, 32),
        Shape::Teapot => teapot(100.0, 5),
        Shape::Torus => torus(50.0, 30.0, 10, 50),
        Shape::TorusKnot => torus_knot(50.0, 30.0, 32, 8, 2, 3),
        Shape::Cylinder => cylinder(60.0, 60.0, 140.0, 30),
        Shape::Cone => cone(80.0, 160.0, 64),
        Shape::Octahedron => octahedron(100.0),
        Shape::Tube => tube(&SineCurve::new(80.0), 50, 30.0, 8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Geometry {
        let mut g = Geometry::new();
        let a = g.push_vertex(Vec3::ZERO, Vec3::Z, Vec2::ZERO);
        let b = g.push_vertex(Vec3::X, Vec3::Z, Vec2::X);
        let c = g.push_vertex(Vec3::Y, Vec3::Z, Vec2::Y);
        g.push_triangle(a, b, c);
        g
    }

    #[test]
    fn test_edges_of_single_triangle() {
        let g = triangle();
        assert_eq!(g.edges(), vec![[0, 1], [1, 2], [0, 2]]);
        assert_eq!(g.edge_indices().len(), 6);
    }

    #[test]
    fn test_edges_shared_by_quad_are_unique() {
        let mut g = triangle();
        let d = g.push_vertex(Vec3::new(1.0, 1.0, 0.0), Vec3::Z, Vec2::ONE);
        g.push_triangle(1, d, 2);
        // Two triangles sharing edge 1-2
        assert_eq!(g.edges().len(), 5);
    }

    #[test]
    fn test_merge_rebases_indices() {
        let mut g = triangle();
        g.merge(&triangle());
        assert_eq!(g.vertex_count(), 6);
        assert_eq!(&g.indices[3..], &[3, 4, 5]);
    }

    #[test]
    fn test_transform_moves_positions_and_keeps_unit_normals() {
        let mut g = triangle();
        g.transform(&Mat4::from_scale_rotation_translation(
            Vec3::new(2.0, 1.0, 1.0),
            glam::Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
            Vec3::new(0.0, 5.0, 0.0),
        ));
        assert!((g.positions[1] - Vec3::new(2.0, 5.0, 0.0)).length() < 1e-5);
        for n in &g.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
        // +Z rotated a quarter turn about X points down -Y
        assert!((g.normals[0] - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_compute_vertex_normals_follows_winding() {
        let mut g = triangle();
        g.normals = vec![Vec3::ZERO; 3];
        g.compute_vertex_normals();
        assert!((g.normals[0] - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_empty_bounds() {
        let g = Geometry::new();
        assert_eq!(g.bounds().min, Vec3::ZERO);
        assert_eq!(g.bounds().max, Vec3::ZERO);
    }
}
