//! The annotation platform's region model.
//!
//! Source regions live in full-resolution image pixels ([`SourcePx`]) and
//! each one carries the [`PlaneIndex`] of the image plane it annotates.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geom::{BBoxXYXY, PlanarRegion, Point2D, SourcePx};
use crate::plane::PlaneIndex;

/// A region of interest in the source platform's object model.
///
/// Polygon, polyline and point-set variants keep their points in order: the
/// order defines edge connectivity and is preserved by every conversion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceRegion {
    Rectangle {
        bounds: BBoxXYXY<SourcePx>,
        #[serde(default)]
        plane: PlaneIndex,
    },
    /// Axis-aligned ellipse inscribed in `bounds`.
    Ellipse {
        bounds: BBoxXYXY<SourcePx>,
        #[serde(default)]
        plane: PlaneIndex,
    },
    Line {
        start: Point2D<SourcePx>,
        end: Point2D<SourcePx>,
        #[serde(default)]
        plane: PlaneIndex,
    },
    /// Closed polygon; the last point connects back to the first.
    Polygon {
        points: Vec<Point2D<SourcePx>>,
        #[serde(default)]
        plane: PlaneIndex,
    },
    /// Open chain of connected points.
    Polyline {
        points: Vec<Point2D<SourcePx>>,
        #[serde(default)]
        plane: PlaneIndex,
    },
    /// Unconnected points.
    PointSet {
        points: Vec<Point2D<SourcePx>>,
        #[serde(default)]
        plane: PlaneIndex,
    },
    /// General area with possibly several disjoint pieces and holes.
    Area {
        geometry: PlanarRegion<SourcePx>,
        #[serde(default)]
        plane: PlaneIndex,
    },
}

/// Variant tag of a [`SourceRegion`], used in logs and reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Rectangle,
    Ellipse,
    Line,
    Polygon,
    Polyline,
    PointSet,
    Area,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Rectangle => "rectangle",
            SourceKind::Ellipse => "ellipse",
            SourceKind::Line => "line",
            SourceKind::Polygon => "polygon",
            SourceKind::Polyline => "polyline",
            SourceKind::PointSet => "point_set",
            SourceKind::Area => "area",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SourceRegion {
    /// Creates a rectangle from its top-left corner and size.
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64, plane: PlaneIndex) -> Self {
        SourceRegion::Rectangle {
            bounds: BBoxXYXY::from_xywh(x, y, width, height),
            plane,
        }
    }

    /// Creates an ellipse from its bounding box.
    pub fn ellipse(x: f64, y: f64, width: f64, height: f64, plane: PlaneIndex) -> Self {
        SourceRegion::Ellipse {
            bounds: BBoxXYXY::from_xywh(x, y, width, height),
            plane,
        }
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, plane: PlaneIndex) -> Self {
        SourceRegion::Line {
            start: Point2D::new(x1, y1),
            end: Point2D::new(x2, y2),
            plane,
        }
    }

    pub fn polygon(points: Vec<Point2D<SourcePx>>, plane: PlaneIndex) -> Self {
        SourceRegion::Polygon { points, plane }
    }

    pub fn polyline(points: Vec<Point2D<SourcePx>>, plane: PlaneIndex) -> Self {
        SourceRegion::Polyline { points, plane }
    }

    pub fn point_set(points: Vec<Point2D<SourcePx>>, plane: PlaneIndex) -> Self {
        SourceRegion::PointSet { points, plane }
    }

    pub fn area(geometry: PlanarRegion<SourcePx>, plane: PlaneIndex) -> Self {
        SourceRegion::Area { geometry, plane }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            SourceRegion::Rectangle { .. } => SourceKind::Rectangle,
            SourceRegion::Ellipse { .. } => SourceKind::Ellipse,
            SourceRegion::Line { .. } => SourceKind::Line,
            SourceRegion::Polygon { .. } => SourceKind::Polygon,
            SourceRegion::Polyline { .. } => SourceKind::Polyline,
            SourceRegion::PointSet { .. } => SourceKind::PointSet,
            SourceRegion::Area { .. } => SourceKind::Area,
        }
    }

    pub fn plane(&self) -> PlaneIndex {
        match self {
            SourceRegion::Rectangle { plane, .. }
            | SourceRegion::Ellipse { plane, .. }
            | SourceRegion::Line { plane, .. }
            | SourceRegion::Polygon { plane, .. }
            | SourceRegion::Polyline { plane, .. }
            | SourceRegion::PointSet { plane, .. }
            | SourceRegion::Area { plane, .. } => *plane,
        }
    }

    /// Returns the region moved to another plane.
    pub fn with_plane(mut self, new_plane: PlaneIndex) -> Self {
        match &mut self {
            SourceRegion::Rectangle { plane, .. }
            | SourceRegion::Ellipse { plane, .. }
            | SourceRegion::Line { plane, .. }
            | SourceRegion::Polygon { plane, .. }
            | SourceRegion::Polyline { plane, .. }
            | SourceRegion::PointSet { plane, .. }
            | SourceRegion::Area { plane, .. } => *plane = new_plane,
        }
        self
    }

    /// Ordered bounding box of the region, or `None` when it has no points.
    pub fn bounds(&self) -> Option<BBoxXYXY<SourcePx>> {
        match self {
            SourceRegion::Rectangle { bounds, .. } | SourceRegion::Ellipse { bounds, .. } => {
                BBoxXYXY::from_corners(bounds.corners())
            }
            SourceRegion::Line { start, end, .. } => BBoxXYXY::from_corners([*start, *end]),
            SourceRegion::Polygon { points, .. }
            | SourceRegion::Polyline { points, .. }
            | SourceRegion::PointSet { points, .. } => BBoxXYXY::from_corners(points.clone()),
            SourceRegion::Area { geometry, .. } => geometry.bounds(),
        }
    }

    /// Number of vertices (2 for a line, 4 for box-defined shapes).
    pub fn point_count(&self) -> usize {
        match self {
            SourceRegion::Rectangle { .. } | SourceRegion::Ellipse { .. } => 4,
            SourceRegion::Line { .. } => 2,
            SourceRegion::Polygon { points, .. }
            | SourceRegion::Polyline { points, .. }
            | SourceRegion::PointSet { points, .. } => points.len(),
            SourceRegion::Area { geometry, .. } => geometry.point_count(),
        }
    }

    /// Returns true if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        match self {
            SourceRegion::Rectangle { bounds, .. } | SourceRegion::Ellipse { bounds, .. } => {
                bounds.is_finite()
            }
            SourceRegion::Line { start, end, .. } => start.is_finite() && end.is_finite(),
            SourceRegion::Polygon { points, .. }
            | SourceRegion::Polyline { points, .. }
            | SourceRegion::PointSet { points, .. } => points.iter().all(Point2D::is_finite),
            SourceRegion::Area { geometry, .. } => geometry.is_finite(),
        }
    }

    /// Returns true if the region encloses area.
    pub fn is_area(&self) -> bool {
        matches!(
            self,
            SourceRegion::Rectangle { .. }
                | SourceRegion::Ellipse { .. }
                | SourceRegion::Polygon { .. }
                | SourceRegion::Area { .. }
        )
    }

    /// Point-membership test for area regions. Lines and points contain nothing.
    pub fn contains(&self, p: &Point2D<SourcePx>) -> bool {
        match self {
            SourceRegion::Rectangle { bounds, .. } => {
                p.x >= bounds.xmin()
                    && p.x < bounds.xmax()
                    && p.y >= bounds.ymin()
                    && p.y < bounds.ymax()
            }
            SourceRegion::Ellipse { bounds, .. } => {
                let c = bounds.center();
                let (rx, ry) = (bounds.width() * 0.5, bounds.height() * 0.5);
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let (dx, dy) = ((p.x - c.x) / rx, (p.y - c.y) / ry);
                dx * dx + dy * dy < 1.0
            }
            SourceRegion::Polygon { points, .. } => {
                PlanarRegion::from_ring(points.clone()).contains(p)
            }
            SourceRegion::Area { geometry, .. } => geometry.contains(p),
            SourceRegion::Line { .. }
            | SourceRegion::Polyline { .. }
            | SourceRegion::PointSet { .. } => false,
        }
    }
}
