//! Coordinate mapping between source and toolkit pixel frames.
//!
//! The map is affine and separable: `toolkit = source / downsample + origin`
//! and `source = (toolkit - origin) * downsample`, applied to x and y
//! independently. Functions here are pure arithmetic and never fail; the
//! dispatcher validates the context before calling them.

use serde::{Deserialize, Serialize};

use crate::error::RoiBridgeError;
use crate::geom::{Affine2D, BBoxXYXY, Point2D, SourcePx, ToolkitPx};

/// Origin offset and downsample factor defining the frame mapping.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoordinateContext {
    #[serde(default)]
    pub origin_x: f64,
    #[serde(default)]
    pub origin_y: f64,
    #[serde(default = "CoordinateContext::default_downsample")]
    pub downsample: f64,
}

impl Default for CoordinateContext {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            downsample: 1.0,
        }
    }
}

impl CoordinateContext {
    pub fn new(origin_x: f64, origin_y: f64, downsample: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            downsample,
        }
    }

    /// A context with no origin offset.
    pub fn with_downsample(downsample: f64) -> Self {
        Self::new(0.0, 0.0, downsample)
    }

    fn default_downsample() -> f64 {
        1.0
    }

    /// Checks that the downsample is a positive finite number and the origin
    /// is finite.
    pub fn validate(&self) -> Result<(), RoiBridgeError> {
        if !self.downsample.is_finite() || self.downsample <= 0.0 {
            return Err(RoiBridgeError::InvalidContext(format!(
                "downsample must be a positive finite number, got {}",
                self.downsample
            )));
        }
        if !self.origin_x.is_finite() || !self.origin_y.is_finite() {
            return Err(RoiBridgeError::InvalidContext(format!(
                "origin must be finite, got ({}, {})",
                self.origin_x, self.origin_y
            )));
        }
        Ok(())
    }

    pub fn x_to_toolkit(&self, x: f64) -> f64 {
        to_toolkit(x, self.origin_x, self.downsample)
    }

    pub fn y_to_toolkit(&self, y: f64) -> f64 {
        to_toolkit(y, self.origin_y, self.downsample)
    }

    pub fn x_to_source(&self, x: f64) -> f64 {
        to_source(x, self.origin_x, self.downsample)
    }

    pub fn y_to_source(&self, y: f64) -> f64 {
        to_source(y, self.origin_y, self.downsample)
    }

    pub fn point_to_toolkit(&self, p: &Point2D<SourcePx>) -> Point2D<ToolkitPx> {
        Point2D::new(self.x_to_toolkit(p.x), self.y_to_toolkit(p.y))
    }

    pub fn point_to_source(&self, p: &Point2D<ToolkitPx>) -> Point2D<SourcePx> {
        Point2D::new(self.x_to_source(p.x), self.y_to_source(p.y))
    }

    /// Maps a point sequence element-wise, preserving order and length.
    pub fn points_to_toolkit(&self, points: &[Point2D<SourcePx>]) -> Vec<Point2D<ToolkitPx>> {
        points.iter().map(|p| self.point_to_toolkit(p)).collect()
    }

    /// Maps a point sequence element-wise, preserving order and length.
    pub fn points_to_source(&self, points: &[Point2D<ToolkitPx>]) -> Vec<Point2D<SourcePx>> {
        points.iter().map(|p| self.point_to_source(p)).collect()
    }

    /// Maps all four corners and returns the ordered box of their extrema.
    pub fn bounds_to_toolkit(&self, bounds: &BBoxXYXY<SourcePx>) -> BBoxXYXY<ToolkitPx> {
        let corners = bounds.corners().map(|c| self.point_to_toolkit(&c));
        BBoxXYXY::from_corners(corners).unwrap_or_default()
    }

    /// Maps all four corners and returns the ordered box of their extrema.
    pub fn bounds_to_source(&self, bounds: &BBoxXYXY<ToolkitPx>) -> BBoxXYXY<SourcePx> {
        let corners = bounds.corners().map(|c| self.point_to_source(&c));
        BBoxXYXY::from_corners(corners).unwrap_or_default()
    }

    /// The forward map as an affine transform: scale by `1/downsample`, then
    /// translate by the origin.
    pub fn forward_transform(&self) -> Affine2D {
        let inv = 1.0 / self.downsample;
        Affine2D::scale(inv, inv).then(&Affine2D::translate(self.origin_x, self.origin_y))
    }

    /// The reverse map for geometry stored relative to a toolkit-local `base`:
    /// translate by the base, then by `-origin`, then scale by `downsample`.
    pub fn reverse_transform(&self, base: &Point2D<ToolkitPx>) -> Affine2D {
        Affine2D::translate(base.x, base.y)
            .then(&Affine2D::translate(-self.origin_x, -self.origin_y))
            .then(&Affine2D::scale(self.downsample, self.downsample))
    }
}

/// `v / downsample + origin`
#[inline]
pub fn to_toolkit(v: f64, origin: f64, downsample: f64) -> f64 {
    v / downsample + origin
}

/// `(v - origin) * downsample`
#[inline]
pub fn to_source(v: f64, origin: f64, downsample: f64) -> f64 {
    (v - origin) * downsample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_maps_invert_each_other() {
        for &(v, origin, ds) in &[(10.0, 0.0, 2.0), (-3.5, 12.25, 0.5), (1e6, -40.0, 16.0)] {
            let back = to_source(to_toolkit(v, origin, ds), origin, ds);
            assert!((back - v).abs() < 1e-9, "{v} -> {back}");
        }
    }

    #[test]
    fn axes_use_their_own_origin() {
        let ctx = CoordinateContext::new(5.0, -5.0, 1.0);
        let p = ctx.point_to_toolkit(&Point2D::new(1.0, 1.0));
        assert_eq!((p.x, p.y), (6.0, -4.0));
    }

    #[test]
    fn bounds_map_all_corners() {
        let ctx = CoordinateContext::with_downsample(2.0);
        let bbox = ctx.bounds_to_toolkit(&BBoxXYXY::from_xywh(10.0, 20.0, 100.0, 50.0));
        assert_eq!(bbox.to_xywh(), (5.0, 10.0, 50.0, 25.0));

        let back = ctx.bounds_to_source(&bbox);
        assert_eq!(back.to_xywh(), (10.0, 20.0, 100.0, 50.0));
    }

    #[test]
    fn degenerate_box_stays_degenerate() {
        let ctx = CoordinateContext::new(1.0, 1.0, 4.0);
        let bbox = ctx.bounds_to_toolkit(&BBoxXYXY::from_xywh(8.0, 8.0, 0.0, 0.0));
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.height(), 0.0);
        assert_eq!(bbox.min, Point2D::new(3.0, 3.0));
    }

    #[test]
    fn validate_rejects_bad_downsample() {
        assert!(CoordinateContext::default().validate().is_ok());
        for ds in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = CoordinateContext::with_downsample(ds).validate().unwrap_err();
            assert!(matches!(err, RoiBridgeError::InvalidContext(_)));
        }
        let err = CoordinateContext::new(f64::NAN, 0.0, 1.0).validate().unwrap_err();
        assert!(matches!(err, RoiBridgeError::InvalidContext(_)));
    }

    #[test]
    fn transforms_agree_with_scalar_maps() {
        let ctx = CoordinateContext::new(3.0, 7.0, 4.0);
        let src: Point2D<SourcePx> = Point2D::new(40.0, 8.0);
        let tk: Point2D<ToolkitPx> = ctx.forward_transform().apply(src);
        assert_eq!(tk, ctx.point_to_toolkit(&src));

        let base = Point2D::new(10.0, 9.0);
        let local: Point2D<ToolkitPx> = Point2D::new(3.0, 0.0);
        let back: Point2D<SourcePx> = ctx.reverse_transform(&base).apply(local);
        assert_eq!(back, ctx.point_to_source(&Point2D::new(13.0, 9.0)));
    }
}
