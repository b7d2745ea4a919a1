#![allow(dead_code)]

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

use roibridge::convert::CoordinateContext;
use roibridge::geom::{PlanarRegion, Point2D, SourcePx};
use roibridge::plane::PlaneIndex;

/// Relative tolerance for coordinates that went through one multiply and one
/// divide by the downsample factor.
pub const EPS_REL: f64 = 1e-9;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Absolute tolerance for a value of magnitude `v` after a round trip.
pub fn eps_for(v: f64, ctx: &CoordinateContext) -> f64 {
    let scale = v.abs() + ctx.origin_x.abs().max(ctx.origin_y.abs()) * ctx.downsample + 1.0;
    scale * EPS_REL
}

pub fn close(a: &Point2D<SourcePx>, b: &Point2D<SourcePx>, ctx: &CoordinateContext) -> bool {
    a.approx_eq(b, eps_for(a.x.abs().max(a.y.abs()), ctx))
}

pub fn arb_context() -> BoxedStrategy<CoordinateContext> {
    (
        -500.0f64..500.0,
        -500.0f64..500.0,
        prop_oneof![Just(1.0f64), Just(2.0), Just(4.0), 0.1f64..64.0],
    )
        .prop_map(|(ox, oy, ds)| CoordinateContext::new(ox, oy, ds))
        .boxed()
}

pub fn arb_plane() -> BoxedStrategy<PlaneIndex> {
    (-1i32..8, 0u32..16, 0u32..16)
        .prop_map(|(c, z, t)| PlaneIndex::new(c, z, t))
        .boxed()
}

pub fn arb_point() -> BoxedStrategy<Point2D<SourcePx>> {
    (0.0f64..20_000.0, 0.0f64..20_000.0)
        .prop_map(|(x, y)| Point2D::new(x, y))
        .boxed()
}

pub fn arb_points(max_len: usize) -> BoxedStrategy<Vec<Point2D<SourcePx>>> {
    prop::collection::vec(arb_point(), 1..=max_len).boxed()
}

/// A star-shaped ring around a random centre: vertices at increasing angles
/// with random radii, so the ring never self-intersects.
pub fn arb_star_ring() -> BoxedStrategy<Vec<Point2D<SourcePx>>> {
    (
        200.0f64..1_000.0,
        200.0f64..1_000.0,
        prop::collection::vec(20.0f64..150.0, 3..12),
    )
        .prop_map(|(cx, cy, radii)| {
            let n = radii.len() as f64;
            radii
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    let a = std::f64::consts::TAU * i as f64 / n;
                    Point2D::new(cx + r * a.cos(), cy + r * a.sin())
                })
                .collect()
        })
        .boxed()
}

pub fn arb_area() -> BoxedStrategy<PlanarRegion<SourcePx>> {
    prop::collection::vec(arb_star_ring(), 1..3)
        .prop_map(|rings| {
            rings
                .into_iter()
                .fold(PlanarRegion::default(), |region, ring| region.with_contour(ring))
        })
        .boxed()
}

/// Probe points on a grid covering the area rings, offset off integer and
/// half-integer coordinates.
pub fn grid_probes() -> Vec<Point2D<SourcePx>> {
    let mut probes = Vec::new();
    for gy in 0..40 {
        for gx in 0..40 {
            probes.push(Point2D::new(
                50.0 + gx as f64 * 30.0 + 0.173,
                50.0 + gy as f64 * 30.0 + 0.419,
            ));
        }
    }
    probes
}

/// True when `p` lies within `eps` of any edge of `region`.
pub fn near_boundary(region: &PlanarRegion<SourcePx>, p: &Point2D<SourcePx>, eps: f64) -> bool {
    region.contours.iter().any(|contour| {
        let pts = &contour.points;
        (0..pts.len()).any(|i| {
            let a = pts[i];
            let b = pts[(i + 1) % pts.len()];
            segment_distance(&a, &b, p) <= eps
        })
    })
}

fn segment_distance(a: &Point2D<SourcePx>, b: &Point2D<SourcePx>, p: &Point2D<SourcePx>) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}
