use proptest::prelude::*;

use roibridge::convert::{to_source, to_source_region, to_toolkit, to_toolkit_region};
use roibridge::source::{SourceKind, SourceRegion};

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn scalar_mapper_roundtrips(
        v in -50_000.0f64..50_000.0,
        ctx in proptest_helpers::arb_context(),
    ) {
        let there = to_toolkit(v, ctx.origin_x, ctx.downsample);
        let back = to_source(there, ctx.origin_x, ctx.downsample);
        prop_assert!(
            (back - v).abs() <= proptest_helpers::eps_for(v, &ctx),
            "{} -> {} -> {}",
            v,
            there,
            back
        );
    }

    #[test]
    fn point_variants_roundtrip_in_order(
        points in proptest_helpers::arb_points(24),
        ctx in proptest_helpers::arb_context(),
        plane in proptest_helpers::arb_plane(),
        variant in 0usize..3,
    ) {
        let region = match variant {
            0 => SourceRegion::polygon(points.clone(), plane),
            1 => SourceRegion::polyline(points.clone(), plane),
            _ => SourceRegion::point_set(points.clone(), plane),
        };

        let toolkit = to_toolkit_region(&region, &ctx).expect("forward").expect("geometry");
        let restored = to_source_region(&toolkit, &ctx, plane).expect("reverse").expect("geometry");

        prop_assert_eq!(restored.kind(), region.kind());
        prop_assert_eq!(restored.plane(), plane);
        let restored_points = match &restored {
            SourceRegion::Polygon { points, .. }
            | SourceRegion::Polyline { points, .. }
            | SourceRegion::PointSet { points, .. } => points.clone(),
            other => panic!("unexpected region {other:?}"),
        };
        prop_assert_eq!(restored_points.len(), points.len());
        for (a, b) in restored_points.iter().zip(&points) {
            prop_assert!(proptest_helpers::close(a, b, &ctx), "{:?} != {:?}", a, b);
        }
    }

    #[test]
    fn area_roundtrip_preserves_membership(
        geometry in proptest_helpers::arb_area(),
        ctx in proptest_helpers::arb_context(),
        plane in proptest_helpers::arb_plane(),
    ) {
        let area = SourceRegion::area(geometry.clone(), plane);
        let toolkit = to_toolkit_region(&area, &ctx).expect("forward").expect("geometry");
        let restored = to_source_region(&toolkit, &ctx, plane).expect("reverse").expect("geometry");
        prop_assert_eq!(restored.kind(), SourceKind::Area);

        for p in proptest_helpers::grid_probes() {
            if proptest_helpers::near_boundary(&geometry, &p, 1e-6) {
                continue;
            }
            prop_assert_eq!(area.contains(&p), restored.contains(&p), "at {:?}", p);
        }
    }
}
