//! Path geometry for shape-algebra regions.
//!
//! A [`ShapePath`] is the boundary description a toolkit shape region carries:
//! a sequence of move/line/curve/close segments rather than an explicit list of
//! polygon vertices. Flattening turns it into a [`PlanarRegion`].

use serde::{Deserialize, Serialize};

use super::affine::Affine2D;
use super::bbox::BBoxXYXY;
use super::point::Point2D;
use super::region::{Contour, FillRule, PlanarRegion};

/// Number of line segments each curve is split into when flattening.
pub const DEFAULT_CURVE_STEPS: usize = 16;

/// Cubic Bézier handle length approximating a quarter circle.
const KAPPA: f64 = 0.552_284_749_830_793_4;

/// One segment of a [`ShapePath`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", bound = "")]
pub enum PathSegment<TSpace> {
    MoveTo {
        to: Point2D<TSpace>,
    },
    LineTo {
        to: Point2D<TSpace>,
    },
    QuadTo {
        ctrl: Point2D<TSpace>,
        to: Point2D<TSpace>,
    },
    CubicTo {
        ctrl1: Point2D<TSpace>,
        ctrl2: Point2D<TSpace>,
        to: Point2D<TSpace>,
    },
    Close,
}

impl<TSpace> PathSegment<TSpace> {
    fn points(&self) -> Vec<Point2D<TSpace>> {
        match self {
            PathSegment::MoveTo { to } | PathSegment::LineTo { to } => vec![*to],
            PathSegment::QuadTo { ctrl, to } => vec![*ctrl, *to],
            PathSegment::CubicTo { ctrl1, ctrl2, to } => vec![*ctrl1, *ctrl2, *to],
            PathSegment::Close => Vec::new(),
        }
    }

    fn transformed<T>(&self, t: &Affine2D) -> PathSegment<T> {
        match self {
            PathSegment::MoveTo { to } => PathSegment::MoveTo { to: t.apply(*to) },
            PathSegment::LineTo { to } => PathSegment::LineTo { to: t.apply(*to) },
            PathSegment::QuadTo { ctrl, to } => PathSegment::QuadTo {
                ctrl: t.apply(*ctrl),
                to: t.apply(*to),
            },
            PathSegment::CubicTo { ctrl1, ctrl2, to } => PathSegment::CubicTo {
                ctrl1: t.apply(*ctrl1),
                ctrl2: t.apply(*ctrl2),
                to: t.apply(*to),
            },
            PathSegment::Close => PathSegment::Close,
        }
    }
}

/// A closed-area boundary built from path segments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct ShapePath<TSpace> {
    pub segments: Vec<PathSegment<TSpace>>,
    #[serde(default)]
    pub fill_rule: FillRule,
}

impl<TSpace> Default for ShapePath<TSpace> {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            fill_rule: FillRule::default(),
        }
    }
}

impl<TSpace> ShapePath<TSpace> {
    pub fn new(segments: Vec<PathSegment<TSpace>>, fill_rule: FillRule) -> Self {
        Self {
            segments,
            fill_rule,
        }
    }

    /// Encodes every contour as `MoveTo`, `LineTo`..., `Close`.
    pub fn from_region(region: &PlanarRegion<TSpace>) -> Self {
        let mut segments = Vec::with_capacity(region.point_count() + region.contours.len());
        for contour in region.contours.iter().filter(|c| !c.is_empty()) {
            let mut points = contour.points.iter();
            if let Some(first) = points.next() {
                segments.push(PathSegment::MoveTo { to: *first });
            }
            segments.extend(points.map(|p| PathSegment::LineTo { to: *p }));
            segments.push(PathSegment::Close);
        }
        Self::new(segments, region.fill_rule)
    }

    /// A rectangle with elliptical corners of the given diameter.
    ///
    /// The diameter is clamped to the box size; corners are cubic quarter arcs.
    pub fn rounded_rect(bounds: &BBoxXYXY<TSpace>, corner_diameter: f64) -> Self {
        let (x, y, w, h) = bounds.to_xywh();
        let rx = (corner_diameter * 0.5).min(w * 0.5).max(0.0);
        let ry = (corner_diameter * 0.5).min(h * 0.5).max(0.0);
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        let p = |px: f64, py: f64| Point2D::new(px, py);

        let segments = vec![
            PathSegment::MoveTo { to: p(x + rx, y) },
            PathSegment::LineTo {
                to: p(x + w - rx, y),
            },
            PathSegment::CubicTo {
                ctrl1: p(x + w - rx + kx, y),
                ctrl2: p(x + w, y + ry - ky),
                to: p(x + w, y + ry),
            },
            PathSegment::LineTo {
                to: p(x + w, y + h - ry),
            },
            PathSegment::CubicTo {
                ctrl1: p(x + w, y + h - ry + ky),
                ctrl2: p(x + w - rx + kx, y + h),
                to: p(x + w - rx, y + h),
            },
            PathSegment::LineTo {
                to: p(x + rx, y + h),
            },
            PathSegment::CubicTo {
                ctrl1: p(x + rx - kx, y + h),
                ctrl2: p(x, y + h - ry + ky),
                to: p(x, y + h - ry),
            },
            PathSegment::LineTo { to: p(x, y + ry) },
            PathSegment::CubicTo {
                ctrl1: p(x, y + ry - ky),
                ctrl2: p(x + rx - kx, y),
                to: p(x + rx, y),
            },
            PathSegment::Close,
        ];
        Self::new(segments, FillRule::NonZero)
    }

    /// An axis-aligned ellipse inscribed in `bounds`, as four cubic arcs.
    pub fn ellipse(bounds: &BBoxXYXY<TSpace>) -> Self {
        let c = bounds.center();
        let (rx, ry) = (bounds.width() * 0.5, bounds.height() * 0.5);
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);
        let p = |px: f64, py: f64| Point2D::new(px, py);

        let segments = vec![
            PathSegment::MoveTo { to: p(c.x + rx, c.y) },
            PathSegment::CubicTo {
                ctrl1: p(c.x + rx, c.y + ky),
                ctrl2: p(c.x + kx, c.y + ry),
                to: p(c.x, c.y + ry),
            },
            PathSegment::CubicTo {
                ctrl1: p(c.x - kx, c.y + ry),
                ctrl2: p(c.x - rx, c.y + ky),
                to: p(c.x - rx, c.y),
            },
            PathSegment::CubicTo {
                ctrl1: p(c.x - rx, c.y - ky),
                ctrl2: p(c.x - kx, c.y - ry),
                to: p(c.x, c.y - ry),
            },
            PathSegment::CubicTo {
                ctrl1: p(c.x + kx, c.y - ry),
                ctrl2: p(c.x + rx, c.y - ky),
                to: p(c.x + rx, c.y),
            },
            PathSegment::Close,
        ];
        Self::new(segments, FillRule::NonZero)
    }

    /// True when the path has no drawing segments.
    pub fn is_empty(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, PathSegment::MoveTo { .. } | PathSegment::Close))
    }

    /// A path is well formed when it starts with `MoveTo` (or is empty).
    pub fn is_well_formed(&self) -> bool {
        matches!(
            self.segments.first(),
            None | Some(PathSegment::MoveTo { .. })
        )
    }

    pub fn is_finite(&self) -> bool {
        self.segments
            .iter()
            .flat_map(|s| s.points())
            .all(|p| p.is_finite())
    }

    /// Bounds of every end and control point.
    pub fn bounds(&self) -> Option<BBoxXYXY<TSpace>> {
        BBoxXYXY::from_corners(self.segments.iter().flat_map(|s| s.points()))
    }

    pub fn transformed<T>(&self, transform: &Affine2D) -> ShapePath<T> {
        ShapePath {
            segments: self
                .segments
                .iter()
                .map(|s| s.transformed(transform))
                .collect(),
            fill_rule: self.fill_rule,
        }
    }

    /// Flattens curves into line segments and collects closed contours.
    ///
    /// Each `MoveTo` starts a new contour and open subpaths are closed
    /// implicitly. A repeated closing vertex is dropped, and contours with
    /// fewer than three vertices enclose no area and are discarded.
    pub fn flatten(&self, curve_steps: usize) -> PlanarRegion<TSpace> {
        let steps = curve_steps.max(1);
        let mut contours = Vec::new();
        let mut current: Vec<Point2D<TSpace>> = Vec::new();

        for segment in &self.segments {
            match segment {
                PathSegment::MoveTo { to } => {
                    finish_contour(&mut current, &mut contours);
                    current.push(*to);
                }
                PathSegment::LineTo { to } => current.push(*to),
                PathSegment::QuadTo { ctrl, to } => {
                    let from = current.last().copied().unwrap_or(*ctrl);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        current.push(quad_at(&from, ctrl, to, t));
                    }
                }
                PathSegment::CubicTo { ctrl1, ctrl2, to } => {
                    let from = current.last().copied().unwrap_or(*ctrl1);
                    for i in 1..=steps {
                        let t = i as f64 / steps as f64;
                        current.push(cubic_at(&from, ctrl1, ctrl2, to, t));
                    }
                }
                PathSegment::Close => finish_contour(&mut current, &mut contours),
            }
        }
        finish_contour(&mut current, &mut contours);

        PlanarRegion::new(contours, self.fill_rule)
    }
}

fn finish_contour<TSpace>(current: &mut Vec<Point2D<TSpace>>, out: &mut Vec<Contour<TSpace>>) {
    if current.len() > 1 && current.first() == current.last() {
        current.pop();
    }
    let points = std::mem::take(current);
    if points.len() >= 3 {
        out.push(Contour::new(points));
    }
}

fn quad_at<TSpace>(
    p0: &Point2D<TSpace>,
    p1: &Point2D<TSpace>,
    p2: &Point2D<TSpace>,
    t: f64,
) -> Point2D<TSpace> {
    if t >= 1.0 {
        return *p2;
    }
    let u = 1.0 - t;
    let (a, b, c) = (u * u, 2.0 * u * t, t * t);
    Point2D::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}

fn cubic_at<TSpace>(
    p0: &Point2D<TSpace>,
    p1: &Point2D<TSpace>,
    p2: &Point2D<TSpace>,
    p3: &Point2D<TSpace>,
    t: f64,
) -> Point2D<TSpace> {
    if t >= 1.0 {
        return *p3;
    }
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point2D::new(
        a * p0.x + b * p1.x + c * p2.x + d * p3.x,
        a * p0.y + b * p1.y + c * p2.y + d * p3.y,
    )
}
