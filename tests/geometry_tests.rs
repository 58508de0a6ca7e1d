use glam::Vec3;
use shape_viewer::geometry::{build_shape, GeometryLibrary};
use shape_viewer::Shape;

#[cfg(test)]
mod geometry_tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    #[test]
    fn test_every_shape_is_well_formed() {
        for shape in Shape::ALL {
            let g = build_shape(shape);
            let n = g.vertex_count();

            assert!(g.triangle_count() > 0, "{:?} has no triangles", shape);
            assert_eq!(g.indices.len() % 3, 0, "{:?} index count", shape);
            assert_eq!(g.normals.len(), n, "{:?} normal count", shape);
            assert_eq!(g.uvs.len(), n, "{:?} uv count", shape);
            assert!(g.indices.iter().all(|&i| (i as usize) < n), "{:?} index out of range", shape);
            assert!(!g.edges().is_empty(), "{:?} has no edges", shape);
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        for shape in Shape::ALL {
            let g = build_shape(shape);
            let bad = g
                .normals
                .iter()
                .filter(|n| (n.length() - 1.0).abs() > 1e-2)
                .count();
            // A stray degenerate normal at a pole or seam is tolerated
            assert!(bad * 100 <= g.vertex_count(), "{:?}: {} non-unit normals", shape, bad);
        }
    }

    #[test]
    fn test_box_bounds() {
        let b = build_shape(Shape::Box).bounds();
        assert!((b.min - Vec3::splat(-50.0)).length() < EPSILON);
        assert!((b.max - Vec3::splat(50.0)).length() < EPSILON);
    }

    #[test]
    fn test_sphere_stays_on_radius() {
        let g = build_shape(Shape::Sphere);
        for p in &g.positions {
            assert!((p.length() - 100.0).abs() < 0.01);
        }
        let b = g.bounds();
        assert!((b.max.y - 100.0).abs() < EPSILON);
        assert!((b.min.y + 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_cylinder_and_cone_heights() {
        let cylinder = build_shape(Shape::Cylinder).bounds();
        assert!((cylinder.max.y - 70.0).abs() < EPSILON);
        assert!((cylinder.min.y + 70.0).abs() < EPSILON);
        assert!(cylinder.max.x <= 60.0 + EPSILON);

        let cone = build_shape(Shape::Cone).bounds();
        assert!((cone.max.y - 80.0).abs() < EPSILON);
        assert!((cone.min.y + 80.0).abs() < EPSILON);
        assert!(cone.max.x <= 80.0 + EPSILON);
    }

    #[test]
    fn test_torus_lies_in_xy_plane() {
        let b = build_shape(Shape::Torus).bounds();
        assert!((b.max.x - 80.0).abs() < EPSILON);
        assert!(b.max.z <= 30.0 + EPSILON);
        assert!(b.min.z >= -30.0 - EPSILON);
    }

    #[test]
    fn test_octahedron_vertices_on_axes() {
        let b = build_shape(Shape::Octahedron).bounds();
        assert!((b.max - Vec3::splat(100.0)).length() < EPSILON);
        assert!((b.min + Vec3::splat(100.0)).length() < EPSILON);
        assert_eq!(build_shape(Shape::Octahedron).triangle_count(), 8);
    }

    #[test]
    fn test_tube_follows_sine_curve() {
        let b = build_shape(Shape::Tube).bounds();
        // Curve spans x in [-120, 120] and y in [-80, 80], plus the tube radius
        assert!(b.max.x > 120.0 && b.max.x < 150.0 + EPSILON);
        assert!(b.max.y > 80.0 && b.max.y < 110.0 + EPSILON);
        assert!((b.max.z - 30.0).abs() < 1.0);
    }

    #[test]
    fn test_library_holds_every_shape() {
        let library = GeometryLibrary::build();
        assert_eq!(library.iter().count(), Shape::ALL.len());
        for shape in Shape::ALL {
            assert_eq!(library.get(shape), &build_shape(shape));
        }
    }
}
