//! Planar regions: sets of closed contours with holes.
//!
//! This is the narrow geometry seam the area converters talk to. A region is
//! a list of closed rings plus a fill rule; which rings are shells and which
//! are holes follows from nesting, not from a flag on the ring.

use serde::{Deserialize, Serialize};

use super::affine::Affine2D;
use super::bbox::BBoxXYXY;
use super::point::Point2D;

/// Rule deciding which points are inside overlapping or nested contours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRule {
    /// Inside when a ray crosses the boundary an odd number of times.
    #[default]
    EvenOdd,
    /// Inside when the winding number is non-zero.
    NonZero,
}

impl FillRule {
    #[inline]
    fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::EvenOdd => winding % 2 != 0,
            FillRule::NonZero => winding != 0,
        }
    }
}

/// A closed ring of points. The closing edge from the last point back to the
/// first is implicit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Contour<TSpace> {
    pub points: Vec<Point2D<TSpace>>,
}

impl<TSpace> Contour<TSpace> {
    pub fn new(points: Vec<Point2D<TSpace>>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area; positive for counter-clockwise rings in a y-up frame.
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum * 0.5
    }

    /// Winding number of the ring around `p`.
    pub fn winding_number(&self, p: &Point2D<TSpace>) -> i32 {
        let n = self.points.len();
        if n < 3 {
            return 0;
        }
        let mut wn = 0;
        for i in 0..n {
            let a = &self.points[i];
            let b = &self.points[(i + 1) % n];
            let side = (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
            if a.y <= p.y {
                if b.y > p.y && side > 0.0 {
                    wn += 1;
                }
            } else if b.y <= p.y && side < 0.0 {
                wn -= 1;
            }
        }
        wn
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(Point2D::is_finite)
    }

    pub fn transformed<T>(&self, transform: &Affine2D) -> Contour<T> {
        Contour::new(self.points.iter().map(|p| transform.apply(*p)).collect())
    }
}

/// A general planar region: one or more closed contours, possibly with holes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PlanarRegion<TSpace> {
    pub contours: Vec<Contour<TSpace>>,
    #[serde(default)]
    pub fill_rule: FillRule,
}

impl<TSpace> Default for PlanarRegion<TSpace> {
    fn default() -> Self {
        Self {
            contours: Vec::new(),
            fill_rule: FillRule::default(),
        }
    }
}

impl<TSpace> PlanarRegion<TSpace> {
    pub fn new(contours: Vec<Contour<TSpace>>, fill_rule: FillRule) -> Self {
        Self {
            contours,
            fill_rule,
        }
    }

    /// A single-ring region using the even-odd rule.
    pub fn from_ring(points: Vec<Point2D<TSpace>>) -> Self {
        Self::new(vec![Contour::new(points)], FillRule::EvenOdd)
    }

    /// Adds a ring and returns the region (builder style).
    pub fn with_contour(mut self, points: Vec<Point2D<TSpace>>) -> Self {
        self.contours.push(Contour::new(points));
        self
    }

    /// True when no contour carries any point.
    pub fn is_empty(&self) -> bool {
        self.contours.iter().all(Contour::is_empty)
    }

    pub fn point_count(&self) -> usize {
        self.contours.iter().map(Contour::len).sum()
    }

    pub fn is_finite(&self) -> bool {
        self.contours.iter().all(Contour::is_finite)
    }

    /// Point-membership test honouring the fill rule.
    pub fn contains(&self, p: &Point2D<TSpace>) -> bool {
        let winding: i32 = self.contours.iter().map(|c| c.winding_number(p)).sum();
        self.fill_rule.is_inside(winding)
    }

    /// Number of other contours enclosing the first vertex of contour `index`.
    ///
    /// Even depth means the contour bounds filled area (a shell), odd depth
    /// means it cuts a hole. Assumes contours do not cross each other.
    pub fn nesting_depth(&self, index: usize) -> usize {
        let Some(probe) = self.contours.get(index).and_then(|c| c.points.first()) else {
            return 0;
        };
        self.contours
            .iter()
            .enumerate()
            .filter(|(i, c)| *i != index && c.winding_number(probe) != 0)
            .count()
    }

    /// Contours with even nesting depth.
    pub fn shells(&self) -> Vec<&Contour<TSpace>> {
        (0..self.contours.len())
            .filter(|&i| self.nesting_depth(i) % 2 == 0)
            .map(|i| &self.contours[i])
            .collect()
    }

    /// Contours with odd nesting depth.
    pub fn holes(&self) -> Vec<&Contour<TSpace>> {
        (0..self.contours.len())
            .filter(|&i| self.nesting_depth(i) % 2 == 1)
            .map(|i| &self.contours[i])
            .collect()
    }

    /// Filled area, assuming contours are simple and do not cross.
    pub fn area(&self) -> f64 {
        (0..self.contours.len())
            .map(|i| {
                let a = self.contours[i].signed_area().abs();
                if self.nesting_depth(i) % 2 == 0 {
                    a
                } else {
                    -a
                }
            })
            .sum()
    }

    pub fn bounds(&self) -> Option<BBoxXYXY<TSpace>> {
        BBoxXYXY::from_corners(self.contours.iter().flat_map(|c| c.points.iter().copied()))
    }

    /// Applies `transform` to every contour, keeping the contour structure.
    pub fn transformed<T>(&self, transform: &Affine2D) -> PlanarRegion<T> {
        PlanarRegion {
            contours: self
                .contours
                .iter()
                .map(|c| c.transformed(transform))
                .collect(),
            fill_rule: self.fill_rule,
        }
    }
}
