//! Benchmarks for the rasterizers and polygon fills.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rasterkit::color::Rgba;
use rasterkit::framebuffer::Framebuffer;
use rasterkit::geometry::Point;
use rasterkit::gradient::{RgbGradient, Solid};
use rasterkit::render::{
    draw_circle, draw_curve, draw_line, fill_polygon, BezierCurve, CircleAlgorithm, LineAlgorithm,
    WindingRule,
};

fn line_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("line");
    let mut fb = Framebuffer::new(1024, 1024).unwrap();

    for algorithm in [LineAlgorithm::Dda, LineAlgorithm::Midpoint, LineAlgorithm::Bresenham] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{algorithm:?}")),
            &algorithm,
            |b, &algorithm| {
                b.iter(|| {
                    for i in 0..64 {
                        draw_line(
                            &mut fb,
                            black_box(Point::new(0, i * 16)),
                            black_box(Point::new(1023, 1023 - i * 16)),
                            Rgba::RED,
                            algorithm,
                        );
                    }
                });
            },
        );
    }

    group.finish();
}

fn circle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("circle_fill");
    let mut fb = Framebuffer::new(1024, 1024).unwrap();

    for radius in [16, 128, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(radius), &radius, |b, &radius| {
            b.iter(|| {
                draw_circle(
                    &mut fb,
                    Point::new(512, 512),
                    black_box(radius),
                    Rgba::BLUE,
                    true,
                    CircleAlgorithm::Bresenham,
                );
            });
        });
    }

    group.finish();
}

fn curve_benchmark(c: &mut Criterion) {
    let mut fb = Framebuffer::new(512, 512).unwrap();
    let curve = BezierCurve::<4>::new(&[
        Point::new(20, 480),
        Point::new(100, 20),
        Point::new(400, 20),
        Point::new(490, 480),
    ])
    .unwrap();

    c.bench_function("cubic_curve", |b| {
        b.iter(|| draw_curve(&mut fb, black_box(&curve), Rgba::GREEN, 0.5, 1.05).unwrap());
    });
}

fn polygon_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("polygon_fill");
    let mut fb = Framebuffer::new(800, 600).unwrap();
    let star = [
        Point::new(400, 20),
        Point::new(160, 580),
        Point::new(780, 230),
        Point::new(20, 230),
        Point::new(640, 580),
    ];

    group.bench_function("solid", |b| {
        b.iter(|| {
            fill_polygon(&mut fb, black_box(&star), &mut Solid(Rgba::RED), WindingRule::Odd);
        });
    });

    group.bench_function("sequential_gradient", |b| {
        b.iter(|| {
            let mut shade = RgbGradient::auto(Rgba::RED, Rgba::BLUE);
            fill_polygon(&mut fb, black_box(&star), &mut shade, WindingRule::Positive);
        });
    });

    group.bench_function("directional_gradient", |b| {
        b.iter(|| {
            let mut shade = RgbGradient::angle(Rgba::RED, Rgba::BLUE, 30.0);
            fill_polygon(&mut fb, black_box(&star), &mut shade, WindingRule::NonZero);
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    line_benchmark,
    circle_benchmark,
    curve_benchmark,
    polygon_benchmark
);
criterion_main!(benches);
