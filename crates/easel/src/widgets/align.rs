use geom::{Point, Size};

use crate::{error::Result, layout::{LayoutContext, Length}, widget::Widget};

/// Per-axis alignment of a child within available space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Flush with the leading edge.
    #[default]
    Start,
    /// Centered.
    Center,
    /// Flush with the trailing edge.
    End,
}

impl Alignment {
    /// The leading offset for a child of `child` length in `available`
    /// space.
    fn offset(&self, available: f64, child: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => (available - child) / 2.0,
            Self::End => available - child,
        }
    }
}

/// Stretches to the available space and positions its child inside it by an
/// alignment pair. Defaults to centering on both axes.
pub struct Align {
    /// Horizontal child alignment.
    horizontal: Alignment,
    /// Vertical child alignment.
    vertical: Alignment,
}

impl Align {
    /// Construct an aligner that centers on both axes.
    pub fn center() -> Self {
        Self {
            horizontal: Alignment::Center,
            vertical: Alignment::Center,
        }
    }

    /// Construct an aligner with an explicit alignment pair.
    pub fn new(horizontal: Alignment, vertical: Alignment) -> Self {
        Self { horizontal, vertical }
    }
}

impl Widget for Align {
    fn desired_width(&self) -> Length {
        Length::Stretch
    }

    fn desired_height(&self) -> Length {
        Length::Stretch
    }

    fn place(&mut self, ctx: &mut LayoutContext, size: Size) -> Result<()> {
        if let Some(child) = ctx.first_child() {
            let child_size = ctx.intrinsic(child);
            ctx.position_child(
                child,
                Point::new(
                    self.horizontal.offset(size.w, child_size.w),
                    self.vertical.offset(size.h, child_size.h),
                ),
            )?;
        }
        Ok(())
    }
}
