//! Region conversion between the source platform and the toolkit.
//!
//! This module is the dispatcher: it validates the coordinate context,
//! decides which variant converter handles a region and checks the result.
//! Both directions are closed matches over the variant enums, so adding a
//! variant is a compile error until it is routed.
//!
//! # Mapping rules
//!
//! | Source    | Toolkit                    |
//! |-----------|----------------------------|
//! | Rectangle | Rectangle (no rounding)    |
//! | Ellipse   | Oval                       |
//! | Line      | Line                       |
//! | Polygon   | Polygon (`polygon` kind)   |
//! | Polyline  | Polygon (`polyline` kind)  |
//! | PointSet  | PointSet                   |
//! | Area      | Shape                      |
//!
//! The reverse direction is not one-to-one; see [`to_source_region`].
//!
//! All functions return `Ok(None)` when the input carries no geometry (for
//! example an empty point list) and an error when it carries broken
//! geometry. A conversion never returns a partially transformed region.

pub mod coords;
mod forward;
pub mod image;
mod reverse;

use std::borrow::Cow;

use tracing::{debug, warn};

pub use coords::{to_source, to_toolkit, CoordinateContext};
pub use image::{
    to_source_region_for_image, to_toolkit_region_for_image, CalibratedImage, ImageHandle,
};

use crate::error::RoiBridgeError;
use crate::geom::{BBoxXYXY, Point2D, ToolkitPx};
use crate::plane::PlaneIndex;
use crate::source::SourceRegion;
use crate::toolkit::{LineRoi, OvalRoi, PolygonKind, RectRoi, ShapeRoi, ToolkitRegion};

/// Converts a source region into the toolkit's model.
///
/// # Errors
/// - [`RoiBridgeError::InvalidContext`] if the downsample is not a positive
///   finite number or the origin is not finite.
/// - [`RoiBridgeError::MalformedGeometry`] for non-finite coordinates,
///   negative box sizes, or results that overflow.
pub fn to_toolkit_region(
    region: &SourceRegion,
    ctx: &CoordinateContext,
) -> Result<Option<ToolkitRegion>, RoiBridgeError> {
    ctx.validate()?;
    if !region.is_finite() {
        return Err(RoiBridgeError::malformed(
            region.kind(),
            "coordinates must be finite",
        ));
    }
    debug!(kind = %region.kind(), points = region.point_count(), ?ctx, "converting to toolkit");

    let converted = match region {
        SourceRegion::Rectangle { bounds, .. } => forward::rectangle(bounds, ctx)?,
        SourceRegion::Ellipse { bounds, .. } => forward::ellipse(bounds, ctx)?,
        SourceRegion::Line { start, end, .. } => forward::line(start, end, ctx),
        SourceRegion::Polygon { points, .. } => {
            forward::point_chain(points, PolygonKind::Polygon, ctx)
        }
        SourceRegion::Polyline { points, .. } => {
            forward::point_chain(points, PolygonKind::Polyline, ctx)
        }
        SourceRegion::PointSet { points, .. } => forward::point_set(points, ctx),
        SourceRegion::Area { geometry, .. } => forward::area(geometry, ctx),
    };

    match converted {
        Some(out) if !out.is_finite() => Err(RoiBridgeError::malformed(
            out.kind(),
            "converted coordinates overflowed",
        )),
        other => Ok(other),
    }
}

/// Converts a toolkit region into the source platform's model on `plane`.
///
/// Classification runs in priority order:
/// 1. the explicit type tag (sharp rectangle, oval, line, point set, shape,
///    `polygon` and `polyline` point lists);
/// 2. the toolkit's "closed area" predicate (rounded rectangles, freehand and
///    traced outlines), converted through their shape form into an area;
/// 3. the toolkit's "line" predicate (freehand lines), converted to a polyline.
///
/// Anything else fails with [`RoiBridgeError::UnsupportedShapeKind`].
pub fn to_source_region(
    region: &ToolkitRegion,
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Result<Option<SourceRegion>, RoiBridgeError> {
    ctx.validate()?;
    if !region.is_finite() {
        return Err(RoiBridgeError::malformed(
            region.kind(),
            "coordinates must be finite",
        ));
    }
    let route = classify(region)?;
    debug!(kind = %region.kind(), route = route.name(), %plane, "converting to source");

    let converted = match route {
        ReverseRoute::Rectangle(roi) => reverse::rectangle(roi, ctx, plane)?,
        ReverseRoute::Ellipse(roi) => reverse::ellipse(roi, ctx, plane)?,
        ReverseRoute::Line(roi) => reverse::line(roi, ctx, plane),
        ReverseRoute::Polygon(points) => reverse::polygon(points, ctx, plane),
        ReverseRoute::Polyline(points) => reverse::polyline(points, ctx, plane),
        ReverseRoute::PointSet(points) => reverse::point_set(points, ctx, plane),
        ReverseRoute::Area(shape) => reverse::area(&shape, ctx, plane)?,
    };

    match converted {
        Some(out) if !out.is_finite() => Err(RoiBridgeError::malformed(
            out.kind(),
            "converted coordinates overflowed",
        )),
        other => Ok(other),
    }
}

/// Converts every region, stopping at the first failure. Regions without
/// geometry are skipped.
pub fn to_toolkit_regions(
    regions: &[SourceRegion],
    ctx: &CoordinateContext,
) -> Result<Vec<ToolkitRegion>, RoiBridgeError> {
    let mut out = Vec::with_capacity(regions.len());
    for region in regions {
        out.extend(to_toolkit_region(region, ctx)?);
    }
    Ok(out)
}

/// Converts every region onto `plane`, stopping at the first failure.
/// Regions without geometry are skipped.
pub fn to_source_regions(
    regions: &[ToolkitRegion],
    ctx: &CoordinateContext,
    plane: PlaneIndex,
) -> Result<Vec<SourceRegion>, RoiBridgeError> {
    let mut out = Vec::with_capacity(regions.len());
    for region in regions {
        out.extend(to_source_region(region, ctx, plane)?);
    }
    Ok(out)
}

/// Which reverse converter handles a toolkit region.
enum ReverseRoute<'a> {
    Rectangle(&'a RectRoi),
    Ellipse(&'a OvalRoi),
    Line(&'a LineRoi),
    Polygon(&'a [Point2D<ToolkitPx>]),
    Polyline(&'a [Point2D<ToolkitPx>]),
    PointSet(&'a [Point2D<ToolkitPx>]),
    Area(Cow<'a, ShapeRoi>),
}

impl ReverseRoute<'_> {
    fn name(&self) -> &'static str {
        match self {
            ReverseRoute::Rectangle(_) => "rectangle",
            ReverseRoute::Ellipse(_) => "ellipse",
            ReverseRoute::Line(_) => "line",
            ReverseRoute::Polygon(_) => "polygon",
            ReverseRoute::Polyline(_) => "polyline",
            ReverseRoute::PointSet(_) => "point_set",
            ReverseRoute::Area(_) => "area",
        }
    }
}

fn classify(region: &ToolkitRegion) -> Result<ReverseRoute<'_>, RoiBridgeError> {
    match region {
        ToolkitRegion::Rectangle(roi) if !roi.is_rounded() => {
            return Ok(ReverseRoute::Rectangle(roi))
        }
        ToolkitRegion::Oval(roi) => return Ok(ReverseRoute::Ellipse(roi)),
        ToolkitRegion::Line(roi) => return Ok(ReverseRoute::Line(roi)),
        ToolkitRegion::PointSet(roi) => return Ok(ReverseRoute::PointSet(&roi.points)),
        ToolkitRegion::Shape(roi) => return Ok(ReverseRoute::Area(Cow::Borrowed(roi))),
        ToolkitRegion::Polygon(roi) if roi.kind == PolygonKind::Polygon => {
            return Ok(ReverseRoute::Polygon(&roi.points))
        }
        ToolkitRegion::Polygon(roi) if roi.kind == PolygonKind::Polyline => {
            return Ok(ReverseRoute::Polyline(&roi.points))
        }
        ToolkitRegion::Rectangle(_) | ToolkitRegion::Polygon(_) => {}
    }

    if region.is_area() {
        if let ToolkitRegion::Rectangle(roi) = region {
            ensure_non_negative_size(region.kind(), &roi.bounds)?;
        }
        if let Some(shape) = region.to_shape() {
            warn!(kind = %region.kind(), "routing closed toolkit region through its shape");
            return Ok(ReverseRoute::Area(Cow::Owned(shape)));
        }
    }

    if region.is_line() {
        if let ToolkitRegion::Polygon(roi) = region {
            warn!(kind = %region.kind(), "converting open toolkit line as a polyline");
            return Ok(ReverseRoute::Polyline(&roi.points));
        }
    }

    warn!(kind = %region.kind(), "no source region type for toolkit region");
    Err(RoiBridgeError::UnsupportedShapeKind {
        kind: region.kind().to_string(),
    })
}

/// Rejects a box whose minimum corner lies past its maximum corner.
pub(crate) fn ensure_non_negative_size<TSpace>(
    kind: impl ToString,
    bounds: &BBoxXYXY<TSpace>,
) -> Result<(), RoiBridgeError> {
    if bounds.is_ordered() {
        return Ok(());
    }
    Err(RoiBridgeError::malformed(
        kind,
        format!(
            "negative size (width={}, height={})",
            bounds.width(),
            bounds.height()
        ),
    ))
}
