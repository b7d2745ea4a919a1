//! The image-processing toolkit's region model.
//!
//! Toolkit regions are expressed in toolkit pixels ([`ToolkitPx`]) and carry
//! no plane index; the caller supplies the plane when converting back. Areas
//! that have no native primitive are represented by [`ShapeRoi`], a path in
//! shape-algebra form anchored at a toolkit-local base offset.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geom::{
    Affine2D, BBoxXYXY, Contour, FillRule, PlanarRegion, Point2D, ShapePath, ToolkitPx,
};

/// A rectangle, optionally with rounded corners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectRoi {
    pub bounds: BBoxXYXY<ToolkitPx>,
    /// Diameter of the corner arcs; zero for a sharp rectangle.
    #[serde(default)]
    pub corner_diameter: f64,
}

impl RectRoi {
    pub fn new(bounds: BBoxXYXY<ToolkitPx>) -> Self {
        Self {
            bounds,
            corner_diameter: 0.0,
        }
    }

    pub fn with_corner_diameter(mut self, corner_diameter: f64) -> Self {
        self.corner_diameter = corner_diameter;
        self
    }

    pub fn is_rounded(&self) -> bool {
        self.corner_diameter != 0.0
    }

    /// The rectangle outline as a shape region.
    pub fn to_shape(&self) -> ShapeRoi {
        let path = if self.is_rounded() {
            ShapePath::rounded_rect(&self.bounds, self.corner_diameter)
        } else {
            ShapePath::from_region(&PlanarRegion::from_ring(self.bounds.corners().to_vec()))
        };
        ShapeRoi::from_absolute(path)
    }
}

/// An axis-aligned oval inscribed in its bounding box.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OvalRoi {
    pub bounds: BBoxXYXY<ToolkitPx>,
}

impl OvalRoi {
    pub fn to_shape(&self) -> ShapeRoi {
        ShapeRoi::from_absolute(ShapePath::ellipse(&self.bounds))
    }
}

/// A straight line between two points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineRoi {
    pub start: Point2D<ToolkitPx>,
    pub end: Point2D<ToolkitPx>,
}

impl LineRoi {
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

/// Flavour of a point-list region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonKind {
    /// Closed polygon drawn vertex by vertex.
    Polygon,
    /// Closed freehand outline.
    Freehand,
    /// Closed outline produced by a wand/tracing tool.
    Traced,
    /// Open chain drawn vertex by vertex.
    Polyline,
    /// Open freehand stroke.
    Freeline,
    /// Three-point angle measurement.
    Angle,
}

/// A region defined by an ordered point list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonRoi {
    pub kind: PolygonKind,
    pub points: Vec<Point2D<ToolkitPx>>,
}

impl PolygonRoi {
    pub fn new(kind: PolygonKind, points: Vec<Point2D<ToolkitPx>>) -> Self {
        Self { kind, points }
    }

    /// The polygon as a single even-odd ring.
    pub fn to_shape(&self) -> ShapeRoi {
        ShapeRoi::from_absolute(ShapePath::from_region(&PlanarRegion::new(
            vec![Contour::new(self.points.clone())],
            FillRule::EvenOdd,
        )))
    }
}

/// A set of unconnected points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRoi {
    pub points: Vec<Point2D<ToolkitPx>>,
}

/// A general shape-algebra region.
///
/// The path is stored relative to `base`, the toolkit-local offset of the
/// shape's bounding box, so absolute toolkit coordinates are `path + base`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeRoi {
    pub base: Point2D<ToolkitPx>,
    pub path: ShapePath<ToolkitPx>,
}

impl ShapeRoi {
    /// Anchors an absolute path at its bounding-box origin.
    pub fn from_absolute(path: ShapePath<ToolkitPx>) -> Self {
        let base = path.bounds().map(|b| b.min).unwrap_or_default();
        let path = path.transformed(&Affine2D::translate(-base.x, -base.y));
        Self { base, path }
    }

    /// The path in absolute toolkit coordinates.
    pub fn absolute_path(&self) -> ShapePath<ToolkitPx> {
        self.path.transformed(&Affine2D::translate(self.base.x, self.base.y))
    }
}

/// A region of interest in the toolkit's object model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolkitRegion {
    Rectangle(RectRoi),
    Oval(OvalRoi),
    Line(LineRoi),
    Polygon(PolygonRoi),
    PointSet(PointRoi),
    Shape(ShapeRoi),
}

/// Explicit type tag of a toolkit region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToolkitKind {
    Rectangle,
    Oval,
    Polygon,
    Freehand,
    Traced,
    Line,
    Polyline,
    Freeline,
    Angle,
    Point,
    Shape,
}

impl ToolkitKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolkitKind::Rectangle => "rectangle",
            ToolkitKind::Oval => "oval",
            ToolkitKind::Polygon => "polygon",
            ToolkitKind::Freehand => "freehand",
            ToolkitKind::Traced => "traced",
            ToolkitKind::Line => "line",
            ToolkitKind::Polyline => "polyline",
            ToolkitKind::Freeline => "freeline",
            ToolkitKind::Angle => "angle",
            ToolkitKind::Point => "point",
            ToolkitKind::Shape => "shape",
        }
    }

    /// Kinds the toolkit treats as closed, fillable areas.
    pub fn is_area(&self) -> bool {
        matches!(
            self,
            ToolkitKind::Rectangle
                | ToolkitKind::Oval
                | ToolkitKind::Polygon
                | ToolkitKind::Freehand
                | ToolkitKind::Traced
                | ToolkitKind::Shape
        )
    }

    /// Kinds the toolkit treats as line selections.
    pub fn is_line(&self) -> bool {
        matches!(
            self,
            ToolkitKind::Line | ToolkitKind::Polyline | ToolkitKind::Freeline
        )
    }
}

impl fmt::Display for ToolkitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PolygonKind> for ToolkitKind {
    fn from(kind: PolygonKind) -> Self {
        match kind {
            PolygonKind::Polygon => ToolkitKind::Polygon,
            PolygonKind::Freehand => ToolkitKind::Freehand,
            PolygonKind::Traced => ToolkitKind::Traced,
            PolygonKind::Polyline => ToolkitKind::Polyline,
            PolygonKind::Freeline => ToolkitKind::Freeline,
            PolygonKind::Angle => ToolkitKind::Angle,
        }
    }
}

impl ToolkitRegion {
    pub fn kind(&self) -> ToolkitKind {
        match self {
            ToolkitRegion::Rectangle(_) => ToolkitKind::Rectangle,
            ToolkitRegion::Oval(_) => ToolkitKind::Oval,
            ToolkitRegion::Line(_) => ToolkitKind::Line,
            ToolkitRegion::Polygon(roi) => roi.kind.into(),
            ToolkitRegion::PointSet(_) => ToolkitKind::Point,
            ToolkitRegion::Shape(_) => ToolkitKind::Shape,
        }
    }

    pub fn is_area(&self) -> bool {
        self.kind().is_area()
    }

    pub fn is_line(&self) -> bool {
        self.kind().is_line()
    }

    /// Ordered bounds in absolute toolkit coordinates.
    pub fn bounds(&self) -> Option<BBoxXYXY<ToolkitPx>> {
        match self {
            ToolkitRegion::Rectangle(roi) => BBoxXYXY::from_corners(roi.bounds.corners()),
            ToolkitRegion::Oval(roi) => BBoxXYXY::from_corners(roi.bounds.corners()),
            ToolkitRegion::Line(roi) => BBoxXYXY::from_corners([roi.start, roi.end]),
            ToolkitRegion::Polygon(roi) => BBoxXYXY::from_corners(roi.points.clone()),
            ToolkitRegion::PointSet(roi) => BBoxXYXY::from_corners(roi.points.clone()),
            ToolkitRegion::Shape(roi) => roi.absolute_path().bounds(),
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            ToolkitRegion::Rectangle(roi) => {
                roi.bounds.is_finite() && roi.corner_diameter.is_finite()
            }
            ToolkitRegion::Oval(roi) => roi.bounds.is_finite(),
            ToolkitRegion::Line(roi) => roi.start.is_finite() && roi.end.is_finite(),
            ToolkitRegion::Polygon(roi) => roi.points.iter().all(Point2D::is_finite),
            ToolkitRegion::PointSet(roi) => roi.points.iter().all(Point2D::is_finite),
            ToolkitRegion::Shape(roi) => roi.base.is_finite() && roi.path.is_finite(),
        }
    }

    /// The region as a shape, for kinds that enclose area.
    pub fn to_shape(&self) -> Option<ShapeRoi> {
        match self {
            ToolkitRegion::Rectangle(roi) => Some(roi.to_shape()),
            ToolkitRegion::Oval(roi) => Some(roi.to_shape()),
            ToolkitRegion::Polygon(roi) if self.is_area() => Some(roi.to_shape()),
            ToolkitRegion::Shape(roi) => Some(roi.clone()),
            ToolkitRegion::Polygon(_) | ToolkitRegion::Line(_) | ToolkitRegion::PointSet(_) => None,
        }
    }
}
