use glam::{Vec2, Vec3};

use super::{lathe, tube, tube_with_radius, CubicBezier, Geometry};

/// Body, lid and knob outline as (radius, height), bottom to top.
/// Units follow the classic teapot, where the body is two units in radius.
const PROFILE: [[f32; 2]; 20] = [
    [0.0, 0.0],
    [1.5, 0.0],
    [1.85, 0.1],
    [2.0, 0.45],
    [2.0, 0.9],
    [1.95, 1.35],
    [1.8, 1.8],
    [1.6, 2.1],
    [1.45, 2.25],
    [1.4, 2.3],
    [1.5, 2.4],
    [1.4, 2.4],
    [1.3, 2.45],
    [0.8, 2.55],
    [0.3, 2.7],
    [0.1, 2.8],
    [0.15, 2.9],
    [0.3, 3.0],
    [0.25, 3.1],
    [0.0, 3.15],
];

const HEIGHT: f32 = 3.15;
const HANDLE_RADIUS: f32 = 0.15;
const SPOUT_BASE_RADIUS: f32 = 0.45;
const SPOUT_TIP_RADIUS: f32 = 0.15;

/// Catmull-Rom resampling so the lathe outline has no hard kinks
fn smooth_profile(points: &[Vec2], subdivisions: u32) -> Vec<Vec2> {
    let n = points.len();
    let at = |i: isize| points[i.clamp(0, n as isize - 1) as usize];
    let mut out = Vec::with_capacity((n - 1) * subdivisions as usize + 1);

    for k in 0..n - 1 {
        let k = k as isize;
        let (p0, p1, p2, p3) = (at(k - 1), at(k), at(k + 1), at(k + 2));
        for s in 0..subdivisions {
            let t = s as f32 / subdivisions as f32;
            let t2 = t * t;
            let t3 = t2 * t;
            let p = 0.5
                * (2.0 * p1
                    + (p2 - p0) * t
                    + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
                    + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3);
            out.push(Vec2::new(p.x.max(0.0), p.y));
        }
    }
    out.push(points[n - 1]);
    out
}

/// Teapot of the given size, centred on the origin. `segments` sets the
/// tessellation density of every part.
pub fn teapot(size: f32, segments: u32) -> Geometry {
    let segments = segments.max(1);
    let scale = size / 2.0;

    let profile = PROFILE.iter().map(|&[r, h]| Vec2::new(r, h)).collect::<Vec<_>>();
    let mut g = lathe(&smooth_profile(&profile, segments), segments * 8);

    let handle = CubicBezier::new(
        Vec3::new(-1.5, 2.1, 0.0),
        Vec3::new(-2.8, 2.2, 0.0),
        Vec3::new(-3.1, 0.9, 0.0),
        Vec3::new(-1.85, 0.6, 0.0),
    );
    g.merge(&tube(&handle, segments * 4, HANDLE_RADIUS, segments * 2 + 2));

    let spout = CubicBezier::new(
        Vec3::new(1.7, 0.6, 0.0),
        Vec3::new(2.6, 0.6, 0.0),
        Vec3::new(2.3, 1.8, 0.0),
        Vec3::new(3.2, 2.4, 0.0),
    );
    g.merge(&tube_with_radius(&spout, segments * 4, segments * 2 + 2, |u| {
        SPOUT_BASE_RADIUS + (SPOUT_TIP_RADIUS - SPOUT_BASE_RADIUS) * u
    }));

    g.transform(&glam::Mat4::from_scale(Vec3::splat(scale)));
    g.translated(Vec3::new(0.0, -HEIGHT * scale / 2.0, 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_profile_keeps_endpoints() {
        let points = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(0.0, 2.0)];
        let smooth = smooth_profile(&points, 4);
        assert_eq!(smooth.len(), 2 * 4 + 1);
        assert_eq!(smooth[0], points[0]);
        assert_eq!(smooth[4], points[1]);
        assert_eq!(*smooth.last().unwrap(), points[2]);
    }

    #[test]
    fn test_teapot_is_centred_and_sized() {
        let g = teapot(100.0, 5);
        let bounds = g.bounds();
        assert!((bounds.max.y + bounds.min.y).abs() < 1.0);
        // Body radius is the size; the spout reaches further out
        assert!(bounds.max.z > 95.0 && bounds.max.z < 105.0);
        assert!(bounds.max.x > 150.0);
        assert!(bounds.min.x < -130.0);
        assert!(g.indices.iter().all(|&i| (i as usize) < g.vertex_count()));
    }
}
