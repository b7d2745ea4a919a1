//! Variant converters from toolkit regions to source regions.

use crate::error::RoiBridgeError;
use crate::geom::{Point2D, ShapePath, SourcePx, ToolkitPx, DEFAULT_CURVE_STEPS};
use crate::plane::PlaneIndex;
use crate::source::SourceRegion;
use crate::toolkit::{LineRoi, OvalRoi, RectRoi, ShapeRoi, ToolkitKind};

use super::coords::CoordinateContext;
use super::ensure_non_negative_size;

pub(crate) fn rectangle(
    roi: &RectRoi,
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Result<Option<SourceRegion>, RoiBridgeError> {
    ensure_non_negative_size(ToolkitKind::Rectangle, &roi.bounds)?;
    Ok(Some(SourceRegion::Rectangle {
        bounds: ctx.bounds_to_source(&roi.bounds),
        plane,
    }))
}

pub(crate) fn ellipse(
    roi: &OvalRoi,
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Result<Option<SourceRegion>, RoiBridgeError> {
    ensure_non_negative_size(ToolkitKind::Oval, &roi.bounds)?;
    Ok(Some(SourceRegion::Ellipse {
        bounds: ctx.bounds_to_source(&roi.bounds),
        plane,
    }))
}

pub(crate) fn line(
    roi: &LineRoi,
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Option<SourceRegion> {
    Some(SourceRegion::Line {
        start: ctx.point_to_source(&roi.start),
        end: ctx.point_to_source(&roi.end),
        plane,
    })
}

pub(crate) fn polygon(
    points: &[Point2D<ToolkitPx>],
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Option<SourceRegion> {
    if points.is_empty() {
        return None;
    }
    Some(SourceRegion::polygon(ctx.points_to_source(points), plane))
}

pub(crate) fn polyline(
    points: &[Point2D<ToolkitPx>],
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Option<SourceRegion> {
    if points.is_empty() {
        return None;
    }
    Some(SourceRegion::polyline(ctx.points_to_source(points), plane))
}

pub(crate) fn point_set(
    points: &[Point2D<ToolkitPx>],
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Option<SourceRegion> {
    if points.is_empty() {
        return None;
    }
    Some(SourceRegion::point_set(ctx.points_to_source(points), plane))
}

/// Moves the shape path out of its toolkit-local frame (base offset, then
/// origin, then downsample) and flattens it into contours.
pub(crate) fn area(
    shape: &ShapeRoi,
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Result<Option<SourceRegion>, RoiBridgeError> {
    if !shape.path.is_well_formed() {
        return Err(RoiBridgeError::malformed(
            ToolkitKind::Shape,
            "path must start with a move_to segment",
        ));
    }
    if shape.path.is_empty() {
        return Ok(None);
    }
    let path: ShapePath<SourcePx> = shape.path.transformed(&ctx.reverse_transform(&shape.base));
    let geometry = path.flatten(DEFAULT_CURVE_STEPS);
    if geometry.is_empty() {
        return Ok(None);
    }
    Ok(Some(SourceRegion::area(geometry, plane)))
}
