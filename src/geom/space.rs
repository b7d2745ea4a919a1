//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! the two pixel frames a region can live in. Only the coordinate mapper in
//! [`crate::convert::coords`] moves geometry from one frame to the other.

use std::fmt;

/// Marker type for full-resolution source image coordinates.
///
/// This is the frame the annotation platform stores its regions in: pixel
/// positions in the level-0 image, with (0, 0) at the top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourcePx {}

/// Marker type for toolkit coordinates.
///
/// Toolkit pixels are source pixels divided by the downsample factor and
/// shifted by the calibration origin of the toolkit's working image.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolkitPx {}

impl fmt::Debug for SourcePx {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for ToolkitPx {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
