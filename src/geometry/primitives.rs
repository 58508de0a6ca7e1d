use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::Geometry;

/// One face of a box, laid out on axes `u`/`v` and pushed out along `w`
#[allow(clippy::too_many_arguments)]
fn build_plane(
    geometry: &mut Geometry,
    axes: [usize; 3],
    udir: f32,
    vdir: f32,
    width: f32,
    height: f32,
    depth: f32,
    grid_x: u32,
    grid_y: u32,
) {
    let [u, v, w] = axes;
    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;
    let width_half = width / 2.0;
    let height_half = height / 2.0;
    let depth_half = depth / 2.0;
    let grid_x1 = grid_x + 1;
    let grid_y1 = grid_y + 1;
    let offset = geometry.vertex_count() as u32;

    for iy in 0..grid_y1 {
        let y = iy as f32 * segment_height - height_half;
        for ix in 0..grid_x1 {
            let x = ix as f32 * segment_width - width_half;

            let mut position = Vec3::ZERO;
            position[u] = x * udir;
            position[v] = y * vdir;
            position[w] = depth_half;

            let mut normal = Vec3::ZERO;
            normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

            let uv = Vec2::new(ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32);
            geometry.push_vertex(position, normal, uv);
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = offset + ix + grid_x1 * iy;
            let b = offset + ix + grid_x1 * (iy + 1);
            let c = offset + (ix + 1) + grid_x1 * (iy + 1);
            let d = offset + (ix + 1) + grid_x1 * iy;
            geometry.push_triangle(a, b, d);
            geometry.push_triangle(b, c, d);
        }
    }
}

/// Axis-aligned box centred on the origin, one quad per face
pub fn box_geometry(width: f32, height: f32, depth: f32) -> Geometry {
    const X: usize = 0;
    const Y: usize = 1;
    const Z: usize = 2;

    let mut g = Geometry::new();
    build_plane(&mut g, [Z, Y, X], -1.0, -1.0, depth, height, width, 1, 1);
    build_plane(&mut g, [Z, Y, X], 1.0, -1.0, depth, height, -width, 1, 1);
    build_plane(&mut g, [X, Z, Y], 1.0, 1.0, width, depth, height, 1, 1);
    build_plane(&mut g, [X, Z, Y], 1.0, -1.0, width, depth, -height, 1, 1);
    build_plane(&mut g, [X, Y, Z], 1.0, -1.0, width, height, depth, 1, 1);
    build_plane(&mut g, [X, Y, Z], -1.0, -1.0, width, height, -depth, 1, 1);
    g
}

/// Single quad in the XY plane facing +Z
pub fn plane(width: f32, height: f32) -> Geometry {
    let mut g = Geometry::new();
    let (hw, hh) = (width / 2.0, height / 2.0);
    let a = g.push_vertex(Vec3::new(-hw, hh, 0.0), Vec3::Z, Vec2::new(0.0, 1.0));
    let b = g.push_vertex(Vec3::new(-hw, -hh, 0.0), Vec3::Z, Vec2::new(0.0, 0.0));
    let c = g.push_vertex(Vec3::new(hw, -hh, 0.0), Vec3::Z, Vec2::new(1.0, 0.0));
    let d = g.push_vertex(Vec3::new(hw, hh, 0.0), Vec3::Z, Vec2::new(1.0, 1.0));
    g.push_triangle(a, b, d);
    g.push_triangle(b, c, d);
    g
}

/// UV sphere with pole rows collapsed to single triangles
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Geometry {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);
    let mut g = Geometry::new();

    for iy in 0..=height_segments {
        let v = iy as f32 / height_segments as f32;
        // Pole vertices sit between their neighbours in u
        let u_offset = if iy == 0 {
            0.5 / width_segments as f32
        } else if iy == height_segments {
            -0.5 / width_segments as f32
        } else {
            0.0
        };

        for ix in 0..=width_segments {
            let u = ix as f32 / width_segments as f32;
            let phi = u * TAU;
            let theta = v * PI;
            let position = Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            );
            g.push_vertex(position, position.normalize_or_zero(), Vec2::new(u + u_offset, 1.0 - v));
        }
    }

    let row = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                g.push_triangle(a, b, d);
            }
            if iy != height_segments - 1 {
                g.push_triangle(b, c, d);
            }
        }
    }
    g
}

/// Capped frustum along Y; a zero radius skips that cap
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Geometry {
    let radial_segments = radial_segments.max(3);
    let height_segments = 1;
    let half_height = height / 2.0;
    let slope = (radius_bottom - radius_top) / height;
    let mut g = Geometry::new();

    let mut rows = Vec::new();
    for y in 0..=height_segments {
        let v = y as f32 / height_segments as f32;
        let radius = v * (radius_bottom - radius_top) + radius_top;
        let row = (0..=radial_segments)
            .map(|x| {
                let u = x as f32 / radial_segments as f32;
                let theta = u * TAU;
                let (sin, cos) = theta.sin_cos();
                let position = Vec3::new(radius * sin, -v * height + half_height, radius * cos);
                let normal = Vec3::new(sin, slope, cos).normalize();
                g.push_vertex(position, normal, Vec2::new(u, 1.0 - v))
            })
            .collect::<Vec<_>>();
        rows.push(row);
    }

    for x in 0..radial_segments as usize {
        for y in 0..height_segments as usize {
            let a = rows[y][x];
            let b = rows[y + 1][x];
            let c = rows[y + 1][x + 1];
            let d = rows[y][x + 1];
            g.push_triangle(a, b, d);
            g.push_triangle(b, c, d);
        }
    }

    if radius_top > 0.0 {
        push_cap(&mut g, radius_top, half_height, radial_segments, true);
    }
    if radius_bottom > 0.0 {
        push_cap(&mut g, radius_bottom, half_height, radial_segments, false);
    }
    g
}

fn push_cap(g: &mut Geometry, radius: f32, half_height: f32, radial_segments: u32, top: bool) {
    let sign = if top { 1.0 } else { -1.0 };
    let normal = Vec3::new(0.0, sign, 0.0);

    let center_start = g.vertex_count() as u32;
    for _ in 0..radial_segments {
        g.push_vertex(Vec3::new(0.0, half_height * sign, 0.0), normal, Vec2::splat(0.5));
    }

    let rim_start = g.vertex_count() as u32;
    for x in 0..=radial_segments {
        let theta = x as f32 / radial_segments as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        g.push_vertex(
            Vec3::new(radius * sin, half_height * sign, radius * cos),
            normal,
            Vec2::new(cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5),
        );
    }

    for x in 0..radial_segments {
        let c = center_start + x;
        let i = rim_start + x;
        if top {
            g.push_triangle(i, i + 1, c);
        } else {
            g.push_triangle(i + 1, i, c);
        }
    }
}

pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Geometry {
    cylinder(0.0, radius, height, radial_segments)
}

/// Ring in the XY plane
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Geometry {
    let mut g = Geometry::new();

    for j in 0..=radial_segments {
        for i in 0..=tubular_segments {
            let u = i as f32 / tubular_segments as f32 * TAU;
            let v = j as f32 / radial_segments as f32 * TAU;
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            g.push_vertex(
                position,
                (position - center).normalize_or_zero(),
                Vec2::new(i as f32 / tubular_segments as f32, j as f32 / radial_segments as f32),
            );
        }
    }

    let row = tubular_segments + 1;
    for j in 1..=radial_segments {
        for i in 1..=tubular_segments {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            g.push_triangle(a, b, d);
            g.push_triangle(b, c, d);
        }
    }
    g
}

fn torus_knot_point(u: f32, p: u32, q: u32, radius: f32) -> Vec3 {
    let quo_over_p = q as f32 / p as f32 * u;
    let cs = quo_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * u.cos(),
        radius * (2.0 + cs) * 0.5 * u.sin(),
        radius * quo_over_p.sin() * 0.5,
    )
}

/// (p, q) torus knot swept with a circular tube
pub fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32, p: u32, q: u32) -> Geometry {
    let mut g = Geometry::new();

    for i in 0..=tubular_segments {
        let u = i as f32 / tubular_segments as f32 * p as f32 * TAU;
        let p1 = torus_knot_point(u, p, q, radius);
        let p2 = torus_knot_point(u + 0.01, p, q, radius);

        // Approximate frame from two close samples
        let t = p2 - p1;
        let n = p2 + p1;
        let b = t.cross(n).normalize();
        let n = b.cross(t).normalize();

        for j in 0..=radial_segments {
            let v = j as f32 / radial_segments as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let position = p1 + n * cx + b * cy;
            g.push_vertex(
                position,
                (position - p1).normalize_or_zero(),
                Vec2::new(i as f32 / tubular_segments as f32, j as f32 / radial_segments as f32),
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

const OCTAHEDRON_VERTICES: [Vec3; 6] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 1.0, 0.0),
    Vec3::new(0.0, -1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
];

const OCTAHEDRON_FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

/// Regular octahedron with unshared vertices so every face is flat
pub fn octahedron(radius: f32) -> Geometry {
    let mut g = Geometry::new();
    for face in OCTAHEDRON_FACES {
        let corners = face.map(|i| OCTAHEDRON_VERTICES[i] * radius);
        let normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]).normalize();
        let indices = corners.map(|c| g.push_vertex(c, normal, spherical_uv(c)));
        g.push_triangle(indices[0], indices[1], indices[2]);
    }
    g
}

/// Azimuth / inclination mapping used by polyhedra
fn spherical_uv(p: Vec3) -> Vec2 {
    let azimuth = p.z.atan2(-p.x);
    let inclination = (-p.y).atan2((p.x * p.x + p.z * p.z).sqrt());
    Vec2::new(azimuth / TAU + 0.5, inclination / PI + 0.5)
}
