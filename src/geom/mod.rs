//! Geometry primitives shared by both region models.
//!
//! # Design Principles
//!
//! 1. **Frame Safety**: points and boxes carry a marker type naming the pixel
//!    frame they live in ([`SourcePx`] or [`ToolkitPx`]). Only the coordinate
//!    mapper converts between frames.
//!
//! 2. **Double Precision**: every coordinate is an IEEE-754 `f64`, so the same
//!    input always yields bit-identical output.
//!
//! 3. **Permissive Construction**: constructors accept non-finite or unordered
//!    values so that conversion and validation can report them as errors
//!    instead of panicking while a document is parsed.

mod affine;
mod bbox;
mod path;
mod point;
mod region;
mod space;

pub use affine::Affine2D;
pub use bbox::BBoxXYXY;
pub use path::{PathSegment, ShapePath, DEFAULT_CURVE_STEPS};
pub use point::Point2D;
pub use region::{Contour, FillRule, PlanarRegion};
pub use space::{SourcePx, ToolkitPx};
