use geom::{Axis, Point, Size};

use crate::{
    core::UpdateContext,
    error::Result,
    layout::{Constraint, LayoutContext, Length},
    widget::Widget,
};

/// A single-child viewport that scrolls its content along one axis.
///
/// The node is a composition boundary: its subtree renders into an isolated
/// off-screen surface sized to the viewport, which is what clips the
/// overflowing content. Defaults: stretches to the available space on both
/// axes.
pub struct Scroll {
    /// The scroll axis.
    axis: Axis,
    /// Scroll offset in content coordinates, clamped to the overflow during
    /// layout.
    offset: f64,
    /// Content extent along the scroll axis, from the last layout pass.
    content: f64,
    /// Desired width.
    width: Length,
    /// Desired height.
    height: Length,
}

impl Scroll {
    /// Construct a scroll viewport along an axis.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            offset: 0.0,
            content: 0.0,
            width: Length::Stretch,
            height: Length::Stretch,
        }
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

    /// The current scroll offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The content extent along the scroll axis as of the last layout.
    pub fn content_extent(&self) -> f64 {
        self.content
    }

    /// Jump to an absolute offset. Clamped against the content extent on
    /// the next layout pass; callers follow up with a refresh.
    pub fn scroll_to(&mut self, offset: f64) {
        self.offset = offset.max(0.0);
    }

    /// Scroll by a delta.
    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.offset + delta);
    }
}

impl Widget for Scroll {
    fn desired_width(&self) -> Length {
        self.width
    }

    fn desired_height(&self) -> Length {
        self.height
    }

    fn on_ready(&mut self, ctx: &mut UpdateContext) -> Result<()> {
        let node = ctx.node();
        ctx.scene_mut().set_composition(node, true)
    }

    fn layout(&mut self, ctx: &mut LayoutContext, constraint: Constraint) -> Result<Size> {
        let size = constraint.constrain_size(self.width, self.height);
        // The child sees an unbounded scroll axis and the viewport's cross
        // extent.
        let child_constraint = match self.axis {
            Axis::Horizontal => Constraint::new(0.0, f64::INFINITY, 0.0, size.h),
            Axis::Vertical => Constraint::new(0.0, size.w, 0.0, f64::INFINITY),
        };
        let child_size = match ctx.first_child() {
            Some(child) => ctx.layout_child(child, child_constraint)?,
            None => Size::zero(),
        };
        self.content = child_size.axis(self.axis);
        let max_scroll = (self.content - size.axis(self.axis)).max(0.0);
        self.offset = self.offset.clamp(0.0, max_scroll);
        if let Some(child) = ctx.first_child() {
            let p = match self.axis {
                Axis::Horizontal => Point::new(-self.offset, 0.0),
                Axis::Vertical => Point::new(0.0, -self.offset),
            };
            ctx.position_child(child, p)?;
        }
        Ok(size)
    }
}
