use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use shape_viewer::camera::OrbitCamera;
use shape_viewer::controls::pick;
use shape_viewer::geometry::{build_shape, GeometryLibrary};
use shape_viewer::params::Shape;
use shape_viewer::scene::{Transform, MESH_START_POSITION};

/// One build per selectable shape
fn bench_build_shape(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_shape");
    for shape in Shape::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(shape.label()), &shape, |b, &shape| {
            b.iter(|| build_shape(black_box(shape)))
        });
    }
    group.finish();
}

/// Startup cost of building every shape
fn bench_library(c: &mut Criterion) {
    c.bench_function("geometry_library_build", |b| b.iter(GeometryLibrary::build));
}

/// Edge extraction used by the wireframe index buffer
fn bench_edges(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_indices");
    for shape in [Shape::Sphere, Shape::TorusKnot, Shape::Teapot] {
        let geometry = build_shape(shape);
        group.bench_with_input(BenchmarkId::from_parameter(shape.label()), &geometry, |b, geometry| {
            b.iter(|| black_box(geometry).edge_indices())
        });
    }
    group.finish();
}

/// Bounds pick run on every mouse press
fn bench_pick(c: &mut Criterion) {
    let camera = OrbitCamera::new(Vec3::new(400.0, 200.0, 400.0), 1280, 720);
    let bounds = build_shape(Shape::TorusKnot).bounds();
    let transform = Transform::from_position(MESH_START_POSITION);

    c.bench_function("pick_hit", |b| {
        b.iter(|| {
            let ray = camera.ray_from_screen(black_box(640.0), black_box(360.0), 1280.0, 720.0);
            pick(&ray, &transform, &bounds)
        })
    });
    c.bench_function("pick_miss", |b| {
        b.iter(|| {
            let ray = camera.ray_from_screen(black_box(5.0), black_box(5.0), 1280.0, 720.0);
            pick(&ray, &transform, &bounds)
        })
    });
}

criterion_group!(benches, bench_build_shape, bench_library, bench_edges, bench_pick);
criterion_main!(benches);
