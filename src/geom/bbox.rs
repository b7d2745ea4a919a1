//! Bounding box types in canonical XYXY format.

use serde::{Deserialize, Serialize};

use super::point::Point2D;

/// An axis-aligned bounding box in XYXY format (xmin, ymin, xmax, ymax).
///
/// The `TSpace` parameter should be either [`SourcePx`](super::SourcePx) or
/// [`ToolkitPx`](super::ToolkitPx).
///
/// Note: the constructors do NOT enforce that min <= max, so a box read from
/// an untrusted document can still be represented and then reported by
/// validation. [`BBoxXYXY::from_corners`] always yields an ordered box.
pub struct BBoxXYXY<TSpace> {
    pub min: Point2D<TSpace>,
    pub max: Point2D<TSpace>,
}

impl<TSpace> BBoxXYXY<TSpace> {
    /// Creates a new bounding box from min and max corners.
    #[inline]
    pub fn new(min: Point2D<TSpace>, max: Point2D<TSpace>) -> Self {
        Self { min, max }
    }

    /// Creates a new bounding box from explicit coordinates.
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            min: Point2D::new(xmin, ymin),
            max: Point2D::new(xmax, ymax),
        }
    }

    /// Converts from XYWH format (x, y, width, height) where (x, y) is the top-left corner.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_xyxy(x, y, x + width, y + height)
    }

    /// Converts to XYWH format (x, y, width, height).
    #[inline]
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.xmin(), self.ymin(), self.width(), self.height())
    }

    /// Smallest ordered box containing every given point.
    ///
    /// Returns `None` for an empty iterator.
    pub fn from_corners<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point2D<TSpace>>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut xmin, mut ymin, mut xmax, mut ymax) = (first.x, first.y, first.x, first.y);
        for p in iter {
            xmin = xmin.min(p.x);
            ymin = ymin.min(p.y);
            xmax = xmax.max(p.x);
            ymax = ymax.max(p.y);
        }
        Some(Self::from_xyxy(xmin, ymin, xmax, ymax))
    }

    /// The four corners, clockwise from (xmin, ymin) in image orientation.
    pub fn corners(&self) -> [Point2D<TSpace>; 4] {
        [
            Point2D::new(self.min.x, self.min.y),
            Point2D::new(self.max.x, self.min.y),
            Point2D::new(self.max.x, self.max.y),
            Point2D::new(self.min.x, self.max.y),
        ]
    }

    /// Returns the minimum x coordinate.
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.min.x
    }

    /// Returns the minimum y coordinate.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.min.y
    }

    /// Returns the maximum x coordinate.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.max.x
    }

    /// Returns the maximum y coordinate.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.max.y
    }

    /// Returns the width of the bounding box.
    ///
    /// May be negative if the box is malformed (xmax < xmin).
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the height of the bounding box.
    ///
    /// May be negative if the box is malformed (ymax < ymin).
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Centre of the box.
    #[inline]
    pub fn center(&self) -> Point2D<TSpace> {
        Point2D::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// Returns true if all coordinates are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Returns true if the box is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}

impl<TSpace> Clone for BBoxXYXY<TSpace> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<TSpace> Copy for BBoxXYXY<TSpace> {}

impl<TSpace> PartialEq for BBoxXYXY<TSpace> {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYXY<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYXY")
            .field("xmin", &self.min.x)
            .field("ymin", &self.min.y)
            .field("xmax", &self.max.x)
            .field("ymax", &self.max.y)
            .finish()
    }
}

impl<TSpace> Default for BBoxXYXY<TSpace> {
    fn default() -> Self {
        Self::from_xyxy(0.0, 0.0, 0.0, 0.0)
    }
}

// Region documents use the XYWH layout both platforms expose in their UIs.
impl<TSpace> Serialize for BBoxXYXY<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BBoxXYXY", 4)?;
        state.serialize_field("x", &self.min.x)?;
        state.serialize_field("y", &self.min.y)?;
        state.serialize_field("width", &self.width())?;
        state.serialize_field("height", &self.height())?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYXY<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct BBoxData {
            x: f64,
            y: f64,
            width: f64,
            height: f64,
        }
        let data = BBoxData::deserialize(deserializer)?;
        Ok(BBoxXYXY::from_xywh(data.x, data.y, data.width, data.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::SourcePx;

    #[test]
    fn test_bbox_from_xywh() {
        let bbox: BBoxXYXY<SourcePx> = BBoxXYXY::from_xywh(10.0, 20.0, 90.0, 60.0);
        assert_eq!(bbox.xmin(), 10.0);
        assert_eq!(bbox.ymin(), 20.0);
        assert_eq!(bbox.xmax(), 100.0);
        assert_eq!(bbox.ymax(), 80.0);
        assert_eq!(bbox.area(), 5400.0);
    }

    #[test]
    fn test_bbox_ordering() {
        let ordered: BBoxXYXY<SourcePx> = BBoxXYXY::from_xyxy(10.0, 20.0, 100.0, 80.0);
        assert!(ordered.is_ordered());

        let unordered: BBoxXYXY<SourcePx> = BBoxXYXY::from_xyxy(100.0, 80.0, 10.0, 20.0);
        assert!(!unordered.is_ordered());
    }

    #[test]
    fn test_from_corners_orders_reflected_points() {
        let bbox: BBoxXYXY<SourcePx> = BBoxXYXY::from_corners([
            Point2D::new(50.0, 10.0),
            Point2D::new(-5.0, 40.0),
            Point2D::new(20.0, -3.0),
        ])
        .expect("non-empty");
        assert_eq!(bbox, BBoxXYXY::from_xyxy(-5.0, -3.0, 50.0, 40.0));
        assert!(bbox.is_ordered());

        assert!(BBoxXYXY::<SourcePx>::from_corners(Vec::new()).is_none());
    }

    #[test]
    fn test_bbox_serde_uses_xywh() {
        let bbox: BBoxXYXY<SourcePx> = BBoxXYXY::from_xywh(15.0, 25.0, 50.0, 30.0);
        let json = serde_json::to_string(&bbox).expect("serialize bbox");
        assert_eq!(json, r#"{"x":15.0,"y":25.0,"width":50.0,"height":30.0}"#);
        let restored: BBoxXYXY<SourcePx> = serde_json::from_str(&json).expect("parse bbox");
        assert_eq!(restored, bbox);
    }
}
