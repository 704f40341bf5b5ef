use geom::{Axis, Point, Size};

use crate::{
    error::Result,
    layout::{Constraint, LayoutContext, Length, local_length, max_axis_length},
    widget::Widget,
};

/// How children are distributed along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainAxisAlignment {
    /// Packed at the leading edge.
    #[default]
    Start,
    /// Packed in the middle.
    Center,
    /// Packed at the trailing edge.
    End,
    /// Equal spacing around every child, half of it before the first.
    SpaceAround,
    /// Equal spacing between children only. A single child degenerates to
    /// `Start`.
    SpaceBetween,
    /// Equal spacing between, before and after children.
    SpaceEvenly,
}

impl MainAxisAlignment {
    /// The (leading offset, inter-child spacing) for `free` leftover length
    /// distributed over `count` children.
    fn distribute(&self, free: f64, count: usize) -> (f64, f64) {
        match self {
            Self::Start => (0.0, 0.0),
            Self::Center => (free / 2.0, 0.0),
            Self::End => (free, 0.0),
            Self::SpaceAround => {
                let spacing = free / count as f64;
                (spacing / 2.0, spacing)
            }
            Self::SpaceBetween => {
                if count <= 1 {
                    (0.0, 0.0)
                } else {
                    (0.0, free / (count - 1) as f64)
                }
            }
            Self::SpaceEvenly => {
                let spacing = free / (count + 1) as f64;
                (spacing, spacing)
            }
        }
    }
}

/// How each child sits on the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossAxisAlignment {
    /// Flush with the leading cross edge.
    #[default]
    Start,
    /// Centered on the cross axis.
    Center,
    /// Flush with the trailing cross edge.
    End,
    /// Stretched to the full cross extent.
    Stretch,
}

/// A proxy that carries a flex factor for a single child inside a [`Flex`]
/// container. Constraints pass through untouched and the child's size is
/// forwarded.
pub struct FlexItem {
    /// Share of the free main-axis length this item claims.
    flex: u32,
}

impl FlexItem {
    /// Construct a flex item with the given factor.
    pub fn new(flex: u32) -> Self {
        Self { flex }
    }
}

impl Widget for FlexItem {
    fn flex_factor(&self) -> u32 {
        self.flex
    }

    fn loose_box(&self) -> bool {
        false
    }
}

/// A multi-child container with two-pass sizing along a declared direction:
/// fixed children first, then flexible children share the leftover space.
///
/// Defaults: `width` and `height` shrink to content, alignment starts at
/// the leading edges. A shrink-sized main axis offers flex children no free
/// space; give the container a stretch or concrete main length to flex
/// into.
pub struct Flex {
    /// The main axis.
    axis: Axis,
    /// Main-axis distribution.
    main_align: MainAxisAlignment,
    /// Cross-axis alignment for every child.
    cross_align: CrossAxisAlignment,
    /// Desired width.
    width: Length,
    /// Desired height.
    height: Length,
}

impl Flex {
    /// Construct a flex container along an axis.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            main_align: MainAxisAlignment::Start,
            cross_align: CrossAxisAlignment::Start,
            width: Length::Shrink,
            height: Length::Shrink,
        }
    }

    /// A horizontal flex container.
    pub fn row() -> Self {
        Self::new(Axis::Horizontal)
    }

    /// A vertical flex container.
    pub fn column() -> Self {
        Self::new(Axis::Vertical)
    }

    /// Set the main-axis alignment.
    pub fn main_align(mut self, align: MainAxisAlignment) -> Self {
        self.main_align = align;
        self
    }

    /// Set the cross-axis alignment.
    pub fn cross_align(mut self, align: CrossAxisAlignment) -> Self {
        self.cross_align = align;
        self
    }

    /// Set the desired width.
    pub fn width(mut self, width: Length) -> Self {
        self.width = width;
        self
    }

    /// Set the desired height.
    pub fn height(mut self, height: Length) -> Self {
        self.height = height;
        self
    }

    /// The desired length along the main axis.
    fn desired_main(&self) -> Length {
        match self.axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// The desired length along the cross axis.
    fn desired_cross(&self) -> Length {
        match self.axis {
            Axis::Horizontal => self.height,
            Axis::Vertical => self.width,
        }
    }

    /// The constraint a child is laid out against: loose on the main axis
    /// up to `main_max`, and either stretched tight or loose on the cross
    /// axis.
    fn child_constraint(&self, main_max: f64, cross_max: f64) -> Constraint {
        let cross_tight =
            self.cross_align == CrossAxisAlignment::Stretch && cross_max.is_finite();
        let (cross_min, cross_max) = if cross_tight {
            (cross_max, cross_max)
        } else {
            (0.0, cross_max)
        };
        match self.axis {
            Axis::Horizontal => Constraint::new(0.0, main_max, cross_min, cross_max),
            Axis::Vertical => Constraint::new(cross_min, cross_max, 0.0, main_max),
        }
    }
}

impl Widget for Flex {
    fn desired_width(&self) -> Length {
        self.width
    }

    fn desired_height(&self) -> Length {
        self.height
    }

    fn layout(&mut self, ctx: &mut LayoutContext, constraint: Constraint) -> Result<Size> {
        let axis = self.axis;
        // Narrow toward the declared lengths first, so children see this
        // container's bounds rather than the incoming ones.
        let narrowed = constraint.constrain(true, self.width, self.height);
        let (_, main_bound) = narrowed.axis_bounds(axis);
        let (_, cross_bound) = narrowed.axis_bounds(axis.cross());
        // The length flex children distribute over. Zero when this
        // container shrinks to content.
        let main_max = max_axis_length(main_bound, self.desired_main());
        let children = ctx.children();

        // Pass 1: fixed children, against the full narrowed main bound.
        let mut fixed_total = 0.0;
        let mut cross_seen = 0.0f64;
        let mut total_flex = 0u32;
        for &child in &children {
            let factor = ctx.flex_factor(child);
            if factor > 0 {
                total_flex += factor;
                continue;
            }
            let size = ctx.layout_child(child, self.child_constraint(main_bound, cross_bound))?;
            fixed_total += size.axis(axis);
            cross_seen = cross_seen.max(size.axis(axis.cross()));
        }

        // Pass 2: flexible children split the leftover main length. The
        // share is enforced by constraint, never clamped after the fact.
        let free = (main_max - fixed_total).max(0.0);
        let mut flex_total = 0.0;
        if total_flex > 0 {
            let unit = free / f64::from(total_flex);
            for &child in &children {
                let factor = ctx.flex_factor(child);
                if factor == 0 {
                    continue;
                }
                let share = f64::from(factor) * unit;
                let size = ctx.layout_child(child, self.child_constraint(share, cross_bound))?;
                flex_total += size.axis(axis);
                cross_seen = cross_seen.max(size.axis(axis.cross()));
            }
        }

        let content_main = fixed_total + flex_total;
        let (main_min_bound, _) = constraint.axis_bounds(axis);
        let (cross_min_bound, _) = constraint.axis_bounds(axis.cross());
        let main_len = local_length(content_main, self.desired_main(), main_min_bound, main_bound);
        let cross_len =
            local_length(cross_seen, self.desired_cross(), cross_min_bound, cross_bound);

        // Positioning pass: bounded by child count, cursor walks the
        // declaration order.
        let free_len = (main_len - content_main).max(0.0);
        let (leading, spacing) = self.main_align.distribute(free_len, children.len());
        let mut cursor = leading;
        for &child in &children {
            let child_size = ctx.intrinsic(child);
            let child_cross = child_size.axis(axis.cross());
            let cross_offset = match self.cross_align {
                CrossAxisAlignment::Start | CrossAxisAlignment::Stretch => 0.0,
                CrossAxisAlignment::Center => (cross_len - child_cross) / 2.0,
                CrossAxisAlignment::End => cross_len - child_cross,
            };
            ctx.position_child(child, point_on(axis, cursor, cross_offset))?;
            cursor += child_size.axis(axis) + spacing;
        }

        Ok(Size::from_axes(axis, main_len, cross_len))
    }
}

/// Build a point from a (main, cross) offset pair relative to an axis.
fn point_on(axis: Axis, main: f64, cross: f64) -> Point {
    match axis {
        Axis::Horizontal => Point::new(main, cross),
        Axis::Vertical => Point::new(cross, main),
    }
}
