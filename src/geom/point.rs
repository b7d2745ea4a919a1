//! Typed 2D points using PhantomData for compile-time frame safety.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// A 2D point with a type-level marker for the coordinate frame.
///
/// The `TSpace` parameter should be either [`SourcePx`](super::SourcePx) or
/// [`ToolkitPx`](super::ToolkitPx), so source and toolkit geometry cannot be
/// mixed without going through the coordinate mapper.
pub struct Point2D<TSpace> {
    pub x: f64,
    pub y: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Point2D<TSpace> {
    /// Creates a new point with the given x and y values.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            _space: PhantomData,
        }
    }

    /// Returns true if both coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns true if both coordinates are within `eps` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

// Manual impls so no bounds are placed on the uninhabited marker type.
impl<TSpace> Clone for Point2D<TSpace> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<TSpace> Copy for Point2D<TSpace> {}

impl<TSpace> PartialEq for Point2D<TSpace> {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<TSpace> std::fmt::Debug for Point2D<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Point2D")
            .field("x", &self.x)
            .field("y", &self.y)
            .finish()
    }
}

impl<TSpace> Default for Point2D<TSpace> {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl<TSpace> From<(f64, f64)> for Point2D<TSpace> {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Point2D<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Point2D", 2)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Point2D<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct PointData {
            x: f64,
            y: f64,
        }
        let data = PointData::deserialize(deserializer)?;
        Ok(Point2D::new(data.x, data.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{SourcePx, ToolkitPx};

    #[test]
    fn test_point_creation() {
        let p: Point2D<SourcePx> = Point2D::new(10.0, 20.0);
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
    }

    #[test]
    fn test_point_is_finite() {
        let finite: Point2D<ToolkitPx> = Point2D::new(10.0, 20.0);
        assert!(finite.is_finite());

        let nan: Point2D<ToolkitPx> = Point2D::new(f64::NAN, 20.0);
        assert!(!nan.is_finite());

        let inf: Point2D<ToolkitPx> = Point2D::new(10.0, f64::NEG_INFINITY);
        assert!(!inf.is_finite());
    }

    #[test]
    fn test_point_serializes_as_xy_object() {
        let p: Point2D<SourcePx> = Point2D::new(1.5, -2.0);
        let json = serde_json::to_string(&p).expect("serialize point");
        assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);

        let back: Point2D<SourcePx> = serde_json::from_str(&json).expect("parse point");
        assert_eq!(back, p);
    }
}
