use std::ops::Mul;

use super::Point;

/// A 2D affine transform, stored as the six coefficients of the matrix
///
/// ```text
/// | xx  xy  tx |
/// | yx  yy  ty |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    /// X scale.
    pub xx: f64,
    /// X shear.
    pub xy: f64,
    /// Y shear.
    pub yx: f64,
    /// Y scale.
    pub yy: f64,
    /// X translation.
    pub tx: f64,
    /// Y translation.
    pub ty: f64,
}

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        xx: 1.0,
        xy: 0.0,
        yx: 0.0,
        yy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// A pure translation.
    pub fn translate(tx: f64, ty: f64) -> Self {
        Self { tx, ty, ..Self::IDENTITY }
    }

    /// A pure scale.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self {
            xx: sx,
            yy: sy,
            ..Self::IDENTITY
        }
    }

    /// A rotation by `angle` radians around the origin.
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            xx: cos,
            xy: -sin,
            yx: sin,
            yy: cos,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// Transform a point.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.xx * p.x + self.xy * p.y + self.tx,
            self.yx * p.x + self.yy * p.y + self.ty,
        )
    }

    /// The determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        self.xx * self.yy - self.xy * self.yx
    }

    /// The inverse transform, or `None` if the transform is singular.
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        let xx = self.yy * inv;
        let xy = -self.xy * inv;
        let yx = -self.yx * inv;
        let yy = self.xx * inv;
        Some(Self {
            xx,
            xy,
            yx,
            yy,
            tx: -(xx * self.tx + xy * self.ty),
            ty: -(yx * self.tx + yy * self.ty),
        })
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Composition: `(a * b).apply(p)` equals `a.apply(b.apply(p))`.
impl Mul for Affine {
    type Output = Self;

    fn mul(self, o: Self) -> Self {
        Self {
            xx: self.xx * o.xx + self.xy * o.yx,
            xy: self.xx * o.xy + self.xy * o.yy,
            yx: self.yx * o.xx + self.yy * o.yx,
            yy: self.yx * o.xy + self.yy * o.yy,
            tx: self.xx * o.tx + self.xy * o.ty + self.tx,
            ty: self.yx * o.tx + self.yy * o.ty + self.ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn compose() {
        let t = Affine::translate(10.0, 0.0);
        let s = Affine::scale(2.0, 2.0);
        // Scale first, then translate.
        assert_close((t * s).apply(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
        // Translate first, then scale.
        assert_close((s * t).apply(Point::new(1.0, 1.0)), Point::new(22.0, 2.0));
    }

    #[test]
    fn invert() {
        let m = Affine::translate(5.0, -3.0) * Affine::rotate(0.7) * Affine::scale(2.0, 0.5);
        let inv = m.invert().unwrap();
        let p = Point::new(3.5, -1.25);
        assert_close(inv.apply(m.apply(p)), p);
        assert!(Affine::scale(0.0, 1.0).invert().is_none());
    }
}
