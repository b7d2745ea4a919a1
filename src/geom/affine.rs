//! 2D affine transforms.

use super::point::Point2D;

/// A 2x3 affine matrix.
///
/// Maps `(x, y)` to `(m00*x + m01*y + m02, m10*x + m11*y + m12)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2D {
    pub m00: f64,
    pub m01: f64,
    pub m02: f64,
    pub m10: f64,
    pub m11: f64,
    pub m12: f64,
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2D {
    pub const fn identity() -> Self {
        Self {
            m00: 1.0,
            m01: 0.0,
            m02: 0.0,
            m10: 0.0,
            m11: 1.0,
            m12: 0.0,
        }
    }

    /// Uniform or anisotropic scale about the origin.
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            m00: sx,
            m01: 0.0,
            m02: 0.0,
            m10: 0.0,
            m11: sy,
            m12: 0.0,
        }
    }

    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            m00: 1.0,
            m01: 0.0,
            m02: tx,
            m10: 0.0,
            m11: 1.0,
            m12: ty,
        }
    }

    /// Composition that applies `self` first and `next` second.
    pub fn then(&self, next: &Affine2D) -> Affine2D {
        Affine2D {
            m00: next.m00 * self.m00 + next.m01 * self.m10,
            m01: next.m00 * self.m01 + next.m01 * self.m11,
            m02: next.m00 * self.m02 + next.m01 * self.m12 + next.m02,
            m10: next.m10 * self.m00 + next.m11 * self.m10,
            m11: next.m10 * self.m01 + next.m11 * self.m11,
            m12: next.m10 * self.m02 + next.m11 * self.m12 + next.m12,
        }
    }

    #[inline]
    pub fn apply_xy(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m00 * x + self.m01 * y + self.m02,
            self.m10 * x + self.m11 * y + self.m12,
        )
    }

    /// Transforms a point, optionally moving it into another coordinate frame.
    #[inline]
    pub fn apply<S, T>(&self, p: Point2D<S>) -> Point2D<T> {
        let (x, y) = self.apply_xy(p.x, p.y);
        Point2D::new(x, y)
    }

    /// Determinant of the linear part; negative for reflections.
    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    pub fn is_finite(&self) -> bool {
        [self.m00, self.m01, self.m02, self.m10, self.m11, self.m12]
            .iter()
            .all(|v| v.is_finite())
    }
}
