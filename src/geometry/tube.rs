use std::f32::consts::TAU;

use glam::Vec2;

use super::{Curve, Geometry};

/// Open tube of constant radius swept along a curve
pub fn tube(path: &dyn Curve, tubular_segments: u32, radius: f32, radial_segments: u32) -> Geometry {
    tube_with_radius(path, tubular_segments, radial_segments, |_| radius)
}

/// Open tube whose radius varies with the arc-length fraction along the path
pub fn tube_with_radius(
    path: &dyn Curve,
    tubular_segments: u32,
    radial_segments: u32,
    radius: impl Fn(f32) -> f32,
) -> Geometry {
    let tubular_segments = tubular_segments.max(1);
    let radial_segments = radial_segments.max(3);
    let frames = path.frenet_frames(tubular_segments as usize);
    let mut g = Geometry::new();

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32;
        let center = path.point_at(u);
        let n = frames.normals[i as usize];
        let b = frames.binormals[i as usize];
        let r = radius(u);

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let sin = v.sin();
            let cos = -v.cos();
            let normal = (n * cos + b * sin).normalize_or_zero();
            g.push_vertex(
                center + normal * r,
                normal,
                Vec2::new(u, j as f32 / radial_segments as f32),
            );
        }
    }

    let row = radial_segments + 1;
    for j in 1..=tubular_segments {
        for i in 1..=radial_segments {
            let a = row * (j - 1) + (i - 1);
            let b = row * j + (i - 1);
            let c = row * j + i;
            let d = row * (j - 1) + i;
            g.push_triangle(a, b, d);
            g.push_triangle(b, c, d);
        }
    }
    g
}
