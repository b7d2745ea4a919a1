//! Criterion microbenches for roibridge conversion and parsing.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure the performance of:
//! - Source document parsing (source_from_str)
//! - Forward conversion of point-list and area regions
//! - Reverse conversion of shape and oval regions

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use roibridge::convert::{to_source_region, to_toolkit_region, CoordinateContext};
use roibridge::geom::{BBoxXYXY, PlanarRegion, Point2D, SourcePx};
use roibridge::io_json::source_from_str;
use roibridge::plane::PlaneIndex;
use roibridge::source::SourceRegion;
use roibridge::toolkit::{OvalRoi, ToolkitRegion};

// Include test fixtures at compile time (no file I/O during benchmark)
const SOURCE_FIXTURE: &str = include_str!("../tests/fixtures/source_valid.json");

fn ring(cx: f64, cy: f64, r: f64, n: usize) -> Vec<Point2D<SourcePx>> {
    (0..n)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / n as f64;
            Point2D::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

/// Benchmark source document parsing from string.
fn bench_source_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("source_parse");
    group.throughput(Throughput::Bytes(SOURCE_FIXTURE.len() as u64));

    group.bench_function("source_from_str", |b| {
        b.iter(|| {
            let doc = source_from_str(black_box(SOURCE_FIXTURE)).unwrap();
            black_box(doc)
        })
    });

    group.finish();
}

/// Benchmark forward conversion of a dense polygon and a multi-contour area.
fn bench_to_toolkit(c: &mut Criterion) {
    let ctx = CoordinateContext::new(12.0, -4.0, 4.0);
    let plane = PlaneIndex::default();
    let polygon = SourceRegion::polygon(ring(5_000.0, 5_000.0, 800.0, 2_000), plane);
    let area = SourceRegion::area(
        PlanarRegion::from_ring(ring(5_000.0, 5_000.0, 800.0, 1_000))
            .with_contour(ring(5_000.0, 5_000.0, 300.0, 500))
            .with_contour(ring(8_000.0, 2_000.0, 400.0, 500)),
        plane,
    );

    let mut group = c.benchmark_group("to_toolkit");
    group.throughput(Throughput::Elements(2_000));
    group.bench_function("polygon_2000", |b| {
        b.iter(|| black_box(to_toolkit_region(black_box(&polygon), &ctx).unwrap()))
    });
    group.throughput(Throughput::Elements(2_000));
    group.bench_function("area_3_contours", |b| {
        b.iter(|| black_box(to_toolkit_region(black_box(&area), &ctx).unwrap()))
    });
    group.finish();
}

/// Benchmark reverse conversion of a shape region and of an oval.
fn bench_to_source(c: &mut Criterion) {
    let ctx = CoordinateContext::new(12.0, -4.0, 4.0);
    let plane = PlaneIndex::default();
    let area = SourceRegion::area(
        PlanarRegion::from_ring(ring(5_000.0, 5_000.0, 800.0, 1_000)),
        plane,
    );
    let shape = to_toolkit_region(&area, &ctx).unwrap().unwrap();
    let oval = ToolkitRegion::Oval(OvalRoi {
        bounds: BBoxXYXY::from_xywh(10.0, 10.0, 200.0, 120.0),
    });

    let mut group = c.benchmark_group("to_source");
    group.bench_function("shape_1000", |b| {
        b.iter(|| black_box(to_source_region(black_box(&shape), &ctx, plane).unwrap()))
    });
    group.bench_function("oval", |b| {
        b.iter(|| black_box(to_source_region(black_box(&oval), &ctx, plane).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_source_parse, bench_to_toolkit, bench_to_source);
criterion_main!(benches);
