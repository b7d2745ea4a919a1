//! Variant converters from source regions to toolkit regions.

use crate::error::RoiBridgeError;
use crate::geom::{BBoxXYXY, PlanarRegion, Point2D, ShapePath, SourcePx};
use crate::source::SourceKind;
use crate::toolkit::{
    LineRoi, OvalRoi, PointRoi, PolygonKind, PolygonRoi, RectRoi, ShapeRoi, ToolkitRegion,
};

use super::coords::CoordinateContext;
use super::ensure_non_negative_size;

pub(crate) fn rectangle(
    bounds: &BBoxXYXY<SourcePx>,
    ctx: &CoordinateContext,
) -> Result<Option<ToolkitRegion>, RoiBridgeError> {
    ensure_non_negative_size(SourceKind::Rectangle, bounds)?;
    let bounds = ctx.bounds_to_toolkit(bounds);
    Ok(Some(ToolkitRegion::Rectangle(RectRoi::new(bounds))))
}

pub(crate) fn ellipse(
    bounds: &BBoxXYXY<SourcePx>,
    ctx: &CoordinateContext,
) -> Result<Option<ToolkitRegion>, RoiBridgeError> {
    ensure_non_negative_size(SourceKind::Ellipse, bounds)?;
    let bounds = ctx.bounds_to_toolkit(bounds);
    Ok(Some(ToolkitRegion::Oval(OvalRoi { bounds })))
}

pub(crate) fn line(
    start: &Point2D<SourcePx>,
    end: &Point2D<SourcePx>,
    ctx: &CoordinateContext,
) -> Option<ToolkitRegion> {
    Some(ToolkitRegion::Line(LineRoi {
        start: ctx.point_to_toolkit(start),
        end: ctx.point_to_toolkit(end),
    }))
}

/// Polygons and polylines share the toolkit's point-list region; `kind`
/// records whether the chain is closed.
pub(crate) fn point_chain(
    points: &[Point2D<SourcePx>],
    kind: PolygonKind,
    ctx: &CoordinateContext,
) -> Option<ToolkitRegion> {
    if points.is_empty() {
        return None;
    }
    Some(ToolkitRegion::Polygon(PolygonRoi::new(
        kind,
        ctx.points_to_toolkit(points),
    )))
}

pub(crate) fn point_set(
    points: &[Point2D<SourcePx>],
    ctx: &CoordinateContext,
) -> Option<ToolkitRegion> {
    if points.is_empty() {
        return None;
    }
    Some(ToolkitRegion::PointSet(PointRoi {
        points: ctx.points_to_toolkit(points),
    }))
}

/// Encodes the area as a path, moves every contour with the forward affine
/// map and anchors the result as a shape region.
pub(crate) fn area(
    geometry: &PlanarRegion<SourcePx>,
    ctx: &CoordinateContext,
) -> Option<ToolkitRegion> {
    if geometry.is_empty() {
        return None;
    }
    let path = ShapePath::from_region(geometry).transformed(&ctx.forward_transform());
    Some(ToolkitRegion::Shape(ShapeRoi::from_absolute(path)))
}
