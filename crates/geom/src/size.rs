use super::{Axis, Point, Rect};

/// A `Size` is a rectangle that has a width and height but no location. This
/// is useful when we want to deal with `Rect`s abstractly, or when we want to
/// mandate that the location of a `Rect` is (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Size {
    /// Construct a size from a width and a height.
    pub fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    /// The zero-valued size.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// The area of this size.
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Are both dimensions finite?
    pub fn is_finite(&self) -> bool {
        self.w.is_finite() && self.h.is_finite()
    }

    /// Return a `Rect` with the same dimensions as the `Size`, located at (0, 0).
    pub fn rect(&self) -> Rect {
        Rect {
            tl: Point::zero(),
            w: self.w,
            h: self.h,
        }
    }

    /// True if this size can completely enclose the target size in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }

    /// The extent along an axis.
    pub fn axis(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.w,
            Axis::Vertical => self.h,
        }
    }

    /// Build a size from a (main, cross) pair relative to an axis.
    pub fn from_axes(axis: Axis, main: f64, cross: f64) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }
}

impl From<Rect> for Size {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(f64, f64)> for Size {
    fn from(v: (f64, f64)) -> Self {
        Self { w: v.0, h: v.1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes() {
        let s = Size::new(10.0, 20.0);
        assert_eq!(s.axis(Axis::Horizontal), 10.0);
        assert_eq!(s.axis(Axis::Vertical), 20.0);
        assert_eq!(Size::from_axes(Axis::Vertical, 20.0, 10.0), s);
        assert!(s.contains(&Size::new(10.0, 5.0)));
        assert!(!s.contains(&Size::new(11.0, 5.0)));
    }
}
