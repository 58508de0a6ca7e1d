use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::Geometry;

/// Surface of revolution around Y. `profile` holds (radius, height) pairs;
/// walking it bottom to top gives outward-facing triangles.
pub fn lathe(profile: &[Vec2], segments: u32) -> Geometry {
    let segments = segments.max(3);
    let mut g = Geometry::new();
    if profile.len() < 2 {
        return g;
    }

    let profile_normals = profile_normals(profile);
    let last = (profile.len() - 1) as f32;

    for i in 0..=segments {
        let phi = i as f32 / segments as f32 * TAU;
        let (sin, cos) = phi.sin_cos();
        for (j, (point, normal)) in profile.iter().zip(&profile_normals).enumerate() {
            g.push_vertex(
                Vec3::new(point.x * sin, point.y, point.x * cos),
                Vec3::new(normal.x * sin, normal.y, normal.x * cos).normalize_or_zero(),
                Vec2::new(i as f32 / segments as f32, j as f32 / last),
            );
        }
    }

    let count = profile.len() as u32;
    for i in 0..segments {
        for j in 0..count - 1 {
            let base = j + i * count;
            let a = base;
            let b = base + count;
            let c = base + count + 1;
            let d = base + 1;
            g.push_triangle(a, b, d);
            g.push_triangle(c, d, b);
        }
    }
    g
}

/// 2D outward normals, averaged across the two segments meeting at a point
fn profile_normals(profile: &[Vec2]) -> Vec<Vec2> {
    let segment_normals = profile
        .windows(2)
        .map(|w| {
            let d = w[1] - w[0];
            Vec2::new(d.y, -d.x).normalize_or_zero()
        })
        .collect::<Vec<_>>();

    (0..profile.len())
        .map(|j| {
            let before = j.checked_sub(1).and_then(|k| segment_normals.get(k));
            let after = segment_normals.get(j);
            match (before, after) {
                (Some(a), Some(b)) => (*a + *b).try_normalize().unwrap_or(*b),
                (Some(n), None) | (None, Some(n)) => *n,
                (None, None) => Vec2::Y,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lathe_cylinder_wall() {
        let profile = [Vec2::new(10.0, 0.0), Vec2::new(10.0, 20.0)];
        let g = lathe(&profile, 12);
        assert_eq!(g.vertex_count(), 13 * 2);
        assert_eq!(g.triangle_count(), 12 * 2);
        for (p, n) in g.positions.iter().zip(&g.normals) {
            assert!((Vec2::new(p.x, p.z).length() - 10.0).abs() < 1e-4);
            // Radial, pointing away from the axis
            assert!(n.y.abs() < 1e-5);
            assert!(n.dot(Vec3::new(p.x, 0.0, p.z)) > 0.0);
        }
    }

    #[test]
    fn test_lathe_faces_wind_outward() {
        let profile = [Vec2::new(10.0, 0.0), Vec2::new(10.0, 20.0)];
        let g = lathe(&profile, 12);
        for tri in g.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| g.positions[i as usize]);
            let face = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face.dot(Vec3::new(centroid.x, 0.0, centroid.z)) > 0.0);
        }
    }

    #[test]
    fn test_lathe_rejects_short_profile() {
        assert_eq!(lathe(&[Vec2::ONE], 8).vertex_count(), 0);
    }
}
