//! Deriving a coordinate context from an image handle.
//!
//! Callers that work with a toolkit image rather than explicit origin and
//! downsample values go through this adapter; there is no parallel API.

use serde::{Deserialize, Serialize};

use crate::error::RoiBridgeError;
use crate::plane::PlaneIndex;
use crate::source::SourceRegion;
use crate::toolkit::ToolkitRegion;

use super::coords::CoordinateContext;

/// An image the toolkit is working on, as far as region conversion cares.
pub trait ImageHandle {
    /// Pixel offset between the image frame and the toolkit frame, if the
    /// image is calibrated.
    fn calibration_origin(&self) -> Option<(f64, f64)>;

    /// Ratio of full-resolution pixels to this image's pixels.
    fn downsample_factor(&self) -> f64;

    /// The z-slice and timepoint the image was read from.
    fn plane(&self) -> PlaneIndex {
        PlaneIndex::default()
    }
}

/// A plain-data [`ImageHandle`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibratedImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<(f64, f64)>,
    pub downsample: f64,
    #[serde(default)]
    pub z: u32,
    #[serde(default)]
    pub t: u32,
}

impl CalibratedImage {
    pub fn new(downsample: f64) -> Self {
        Self {
            origin: None,
            downsample,
            z: 0,
            t: 0,
        }
    }

    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = Some((x, y));
        self
    }

    pub fn at_plane(mut self, z: u32, t: u32) -> Self {
        self.z = z;
        self.t = t;
        self
    }
}

impl ImageHandle for CalibratedImage {
    fn calibration_origin(&self) -> Option<(f64, f64)> {
        self.origin
    }

    fn downsample_factor(&self) -> f64 {
        self.downsample
    }

    fn plane(&self) -> PlaneIndex {
        PlaneIndex::all_channels_at(self.z, self.t)
    }
}

impl CoordinateContext {
    /// Context for an optional image: no image means `{0, 0, 1}`, an
    /// uncalibrated image means a zero origin.
    pub fn from_image<I: ImageHandle + ?Sized>(image: Option<&I>) -> Self {
        match image {
            Some(image) => {
                let (origin_x, origin_y) = image.calibration_origin().unwrap_or((0.0, 0.0));
                Self::new(origin_x, origin_y, image.downsample_factor())
            }
            None => Self::default(),
        }
    }
}

/// [`super::to_toolkit_region`] with the context taken from `image`.
pub fn to_toolkit_region_for_image<I: ImageHandle + ?Sized>(
    region: &SourceRegion,
    image: Option<&I>,
) -> Result<Option<ToolkitRegion>, RoiBridgeError> {
    super::to_toolkit_region(region, &CoordinateContext::from_image(image))
}

/// [`super::to_source_region`] with the context taken from `image`.
///
/// The region is placed on all channels at the image's z-slice and timepoint.
pub fn to_source_region_for_image<I: ImageHandle + ?Sized>(
    region: &ToolkitRegion,
    image: Option<&I>,
) -> Result<Option<SourceRegion>, RoiBridgeError> {
    let plane = image
        .map(|i| i.plane().with_channel(PlaneIndex::ALL_CHANNELS))
        .unwrap_or_default();
    super::to_source_region(region, &CoordinateContext::from_image(image), plane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point2D;

    #[test]
    fn missing_image_uses_identity_context() {
        assert_eq!(
            CoordinateContext::from_image::<CalibratedImage>(None),
            CoordinateContext::new(0.0, 0.0, 1.0)
        );
    }

    #[test]
    fn uncalibrated_image_keeps_downsample() {
        let image = CalibratedImage::new(4.0);
        assert_eq!(
            CoordinateContext::from_image(Some(&image)),
            CoordinateContext::new(0.0, 0.0, 4.0)
        );
    }

    #[test]
    fn line_scenario_through_image_handle() {
        let image = CalibratedImage::new(1.0).with_origin(5.0, 5.0).at_plane(3, 1);
        let line = SourceRegion::line(0.0, 0.0, 10.0, 10.0, PlaneIndex::all_channels_at(3, 1));

        let tk = to_toolkit_region_for_image(&line, Some(&image)).unwrap().unwrap();
        match &tk {
            ToolkitRegion::Line(roi) => {
                assert_eq!(roi.start, Point2D::new(5.0, 5.0));
                assert_eq!(roi.end, Point2D::new(15.0, 15.0));
            }
            other => panic!("unexpected {other:?}"),
        }

        let back = to_source_region_for_image(&tk, Some(&image)).unwrap().unwrap();
        assert_eq!(back, line);
    }
}
