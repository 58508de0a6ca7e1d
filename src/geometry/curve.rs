use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

const ARC_LENGTH_DIVISIONS: usize = 200;

/// Parametric 3D curve over t in [0, 1]
pub trait Curve {
    fn point(&self, t: f32) -> Vec3;

    /// Cumulative chord lengths at `divisions + 1` evenly spaced t values
    fn arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=divisions {
            let current = self.point(i as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    fn length(&self) -> f32 {
        self.arc_lengths(ARC_LENGTH_DIVISIONS).last().copied().unwrap_or(0.0)
    }

    /// Map a fraction of arc length to the curve parameter
    fn u_to_t(&self, u: f32) -> f32 {
        let lengths = self.arc_lengths(ARC_LENGTH_DIVISIONS);
        let total = lengths.last().copied().unwrap_or(0.0);
        if total <= 0.0 {
            return u;
        }
        let target = u.clamp(0.0, 1.0) * total;

        // Last index whose cumulative length does not exceed the target
        let i = lengths.partition_point(|&l| l <= target).saturating_sub(1);
        if i >= lengths.len() - 1 {
            return 1.0;
        }
        let segment = lengths[i + 1] - lengths[i];
        let fraction = if segment > 0.0 { (target - lengths[i]) / segment } else { 0.0 };
        (i as f32 + fraction) / (lengths.len() - 1) as f32
    }

    /// Point at a fraction of arc length
    fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent by central difference
    fn tangent(&self, t: f32) -> Vec3 {
        const DELTA: f32 = 0.0001;
        let t1 = (t - DELTA).max(0.0);
        let t2 = (t + DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    /// Parallel-transport frames at `segments + 1` arc-length samples
    fn frenet_frames(&self, segments: usize) -> FrenetFrames {
        let tangents = (0..=segments)
            .map(|i| self.tangent_at(i as f32 / segments as f32))
            .collect::<Vec<_>>();
        FrenetFrames::from_tangents(tangents)
    }
}

/// Tangent, normal and binormal per sample
#[derive(Debug, Clone)]
pub struct FrenetFrames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

impl FrenetFrames {
    pub fn from_tangents(tangents: Vec<Vec3>) -> Self {
        let Some(&t0) = tangents.first() else {
            return Self {
                tangents,
                normals: Vec::new(),
                binormals: Vec::new(),
            };
        };

        // Seed the first normal from the tangent's smallest component
        let abs = t0.abs();
        let mut axis = Vec3::X;
        let mut min = abs.x;
        if abs.y <= min {
            min = abs.y;
            axis = Vec3::Y;
        }
        if abs.z <= min {
            axis = Vec3::Z;
        }
        let v = t0.cross(axis).normalize_or_zero();
        let n0 = t0.cross(v);
        let b0 = t0.cross(n0);

        let mut normals = vec![n0];
        let mut binormals = vec![b0];

        for i in 1..tangents.len() {
            let mut normal = normals[i - 1];
            let v = tangents[i - 1].cross(tangents[i]);
            if v.length() > f32::EPSILON {
                let axis = v.normalize();
                let theta = tangents[i - 1].dot(tangents[i]).clamp(-1.0, 1.0).acos();
                normal = Mat4::from_axis_angle(axis, theta).transform_vector3(normal);
            }
            binormals.push(tangents[i].cross(normal));
            normals.push(normal);
        }

        Self {
            tangents,
            normals,
            binormals,
        }
    }
}

/// One period of a sine wave along X, the tube shape's path
#[derive(Debug, Clone, Copy)]
pub struct SineCurve {
    pub scale: f32,
}

impl SineCurve {
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }
}

impl Curve for SineCurve {
    fn point(&self, t: f32) -> Vec3 {
        Vec3::new(t * 3.0 - 1.5, (TAU * t).sin(), 0.0) * self.scale
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CubicBezier {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl CubicBezier {
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }
}

impl Curve for CubicBezier {
    fn point(&self, t: f32) -> Vec3 {
        let k = 1.0 - t;
        self.p0 * (k * k * k) + self.p1 * (3.0 * k * k * t) + self.p2 * (3.0 * k * t * t) + self.p3 * (t * t * t)
    }
}
