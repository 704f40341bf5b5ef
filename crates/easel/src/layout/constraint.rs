use geom::{Axis, Size};

/// A per-axis sizing request: a concrete length, or one of two sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Length {
    /// A concrete length in canvas units.
    Px(f64),
    /// Shrink to the content's size.
    #[default]
    Shrink,
    /// Stretch to the available space.
    Stretch,
}

/// An immutable box constraint: minimum and maximum bounds for both axes.
///
/// Operations are pure and return new values. Every operation preserves
/// feasibility (`min <= max` on both axes); infeasible desired lengths are
/// clamped to the feasible range rather than rejected, so layout never
/// fails on a size it cannot honor. Infinite bounds survive arithmetic;
/// components that need a finite bound check for one explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    /// Minimum width.
    pub min_width: f64,
    /// Maximum width.
    pub max_width: f64,
    /// Minimum height.
    pub min_height: f64,
    /// Maximum height.
    pub max_height: f64,
}

impl Default for Constraint {
    /// The unbounded constraint: zero minimums, infinite maximums.
    fn default() -> Self {
        Self {
            min_width: 0.0,
            max_width: f64::INFINITY,
            min_height: 0.0,
            max_height: f64::INFINITY,
        }
    }
}

impl Constraint {
    /// Construct a constraint from explicit bounds.
    pub fn new(min_width: f64, max_width: f64, min_height: f64, max_height: f64) -> Self {
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// A constraint that admits exactly one size.
    pub fn tight(size: Size) -> Self {
        Self::new(size.w, size.w, size.h, size.h)
    }

    /// A constraint from zero up to the given size.
    pub fn loose(size: Size) -> Self {
        Self::new(0.0, size.w, 0.0, size.h)
    }

    /// Narrow one axis toward a desired length. Sentinels keep the existing
    /// bounds; a concrete length clamps to the feasible range: above the
    /// maximum the widget is compressed to it, below the minimum it is
    /// stretched up to it, and in range the bounds pin to the exact value.
    fn narrow_axis(loose: bool, min: f64, max: f64, desired: Length) -> (f64, f64) {
        let min = if loose { 0.0 } else { min };
        match desired {
            Length::Shrink | Length::Stretch => (min, max),
            Length::Px(v) => {
                if v > max {
                    (max, max)
                } else if v < min {
                    (min, min)
                } else {
                    (v, v)
                }
            }
        }
    }

    /// Narrow both axes toward desired lengths, as a parent does before
    /// delegating to a child. `loose` resets the minimums of both axes to
    /// zero first, for parents that impose no minimum on children sized
    /// below them.
    pub fn constrain(&self, loose: bool, desired_width: Length, desired_height: Length) -> Self {
        let (min_width, max_width) =
            Self::narrow_axis(loose, self.min_width, self.max_width, desired_width);
        let (min_height, max_height) =
            Self::narrow_axis(loose, self.min_height, self.max_height, desired_height);
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Reduce the maximum bounds by a delta, floored at the minimums. Used
    /// to carve padding out of the space offered to a child.
    pub fn shrink(&self, dw: f64, dh: f64) -> Self {
        Self {
            min_width: self.min_width,
            max_width: (self.max_width - dw).max(self.min_width),
            min_height: self.min_height,
            max_height: (self.max_height - dh).max(self.min_height),
        }
    }

    /// Resolve a final concrete size for a desired length pair.
    pub fn constrain_size(&self, desired_width: Length, desired_height: Length) -> Size {
        Size::new(
            Self::resolve_axis(self.min_width, self.max_width, desired_width),
            Self::resolve_axis(self.min_height, self.max_height, desired_height),
        )
    }

    /// Resolve one axis: stretch takes the maximum, shrink the minimum, a
    /// concrete value clamps into the bounds.
    fn resolve_axis(min: f64, max: f64, desired: Length) -> f64 {
        match desired {
            Length::Stretch => max,
            Length::Shrink => min,
            Length::Px(v) => v.clamp(min, max),
        }
    }

    /// The (min, max) bounds along an axis.
    pub fn axis_bounds(&self, axis: Axis) -> (f64, f64) {
        match axis {
            Axis::Horizontal => (self.min_width, self.max_width),
            Axis::Vertical => (self.min_height, self.max_height),
        }
    }

    /// Are both axes feasible?
    pub fn is_feasible(&self) -> bool {
        self.min_width <= self.max_width && self.min_height <= self.max_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn narrowing_clamps_to_feasible_range() {
        let c = Constraint::new(10.0, 100.0, 10.0, 100.0);

        // In range: bounds pin to the exact value.
        let exact = c.constrain(false, Length::Px(50.0), Length::Px(50.0));
        assert_eq!(exact, Constraint::new(50.0, 50.0, 50.0, 50.0));

        // Above the maximum: compressed to it.
        let over = c.constrain(false, Length::Px(500.0), Length::Shrink);
        assert_eq!((over.min_width, over.max_width), (100.0, 100.0));

        // Below the minimum: stretched up to it.
        let under = c.constrain(false, Length::Px(2.0), Length::Shrink);
        assert_eq!((under.min_width, under.max_width), (10.0, 10.0));

        // Loose resets the floor of both axes regardless of the desired
        // length outcome.
        let loosened = c.constrain(true, Length::Shrink, Length::Px(2.0));
        assert_eq!((loosened.min_width, loosened.max_width), (0.0, 100.0));
        assert_eq!((loosened.min_height, loosened.max_height), (2.0, 2.0));
    }

    #[test]
    fn infinite_bounds_survive() {
        let c = Constraint::default();
        let narrowed = c.constrain(false, Length::Stretch, Length::Shrink);
        assert_eq!(narrowed.max_width, f64::INFINITY);
        let shrunk = c.shrink(5.0, 5.0);
        assert_eq!(shrunk.max_width, f64::INFINITY);
        assert_eq!(
            c.constrain_size(Length::Stretch, Length::Shrink),
            Size::new(f64::INFINITY, 0.0)
        );
    }

    #[test]
    fn shrink_floors_at_min() {
        let c = Constraint::new(20.0, 30.0, 0.0, 10.0);
        let s = c.shrink(50.0, 4.0);
        assert_eq!((s.min_width, s.max_width), (20.0, 20.0));
        assert_eq!((s.min_height, s.max_height), (0.0, 6.0));
    }

    #[test]
    fn constrain_size_resolution() {
        let c = Constraint::new(10.0, 100.0, 10.0, 100.0);
        assert_eq!(
            c.constrain_size(Length::Stretch, Length::Shrink),
            Size::new(100.0, 10.0)
        );
        assert_eq!(
            c.constrain_size(Length::Px(55.0), Length::Px(500.0)),
            Size::new(55.0, 100.0)
        );
    }

    #[test]
    fn tight_and_loose_constructors() {
        let s = Size::new(40.0, 20.0);
        assert_eq!(
            Constraint::tight(s).constrain_size(Length::Shrink, Length::Shrink),
            s
        );
        assert_eq!(
            Constraint::loose(s).constrain_size(Length::Stretch, Length::Shrink),
            Size::new(40.0, 0.0)
        );
    }

    /// Strategy for desired lengths over a practical value range.
    fn length() -> impl Strategy<Value = Length> {
        prop_oneof![
            (0.0f64..1000.0).prop_map(Length::Px),
            Just(Length::Shrink),
            Just(Length::Stretch),
        ]
    }

    /// Strategy for feasible constraints, including infinite maximums.
    fn constraint() -> impl Strategy<Value = Constraint> {
        (
            0.0f64..500.0,
            0.0f64..500.0,
            0.0f64..500.0,
            0.0f64..500.0,
            prop::bool::ANY,
        )
            .prop_map(|(min_w, extra_w, min_h, extra_h, unbounded)| {
                let max_w = if unbounded { f64::INFINITY } else { min_w + extra_w };
                let max_h = if unbounded { f64::INFINITY } else { min_h + extra_h };
                Constraint::new(min_w, max_w, min_h, max_h)
            })
    }

    proptest! {
        /// Narrowing never produces an infeasible constraint, and a
        /// concrete desired length always pins the axis.
        #[test]
        fn feasibility(c in constraint(), loose in prop::bool::ANY, w in length(), h in length()) {
            let narrowed = c.constrain(loose, w, h);
            prop_assert!(narrowed.is_feasible());
            if let Length::Px(_) = w {
                prop_assert_eq!(narrowed.min_width, narrowed.max_width);
            }
            if let Length::Px(_) = h {
                prop_assert_eq!(narrowed.min_height, narrowed.max_height);
            }
        }

        /// Re-narrowing with the same desired lengths is a no-op.
        #[test]
        fn idempotence(c in constraint(), w in length(), h in length()) {
            let once = c.constrain(false, w, h);
            let twice = once.constrain(false, w, h);
            prop_assert_eq!(once, twice);
        }
    }
}
