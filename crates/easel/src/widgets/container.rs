use geom::{Edges, Point, Size};

use crate::{
    error::Result,
    layout::{Constraint, LayoutContext, Length, local_length},
    render::{Canvas, Color, PaintContext},
    widget::Widget,
};

/// Visual decoration drawn behind a container's content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decoration {
    /// Background fill.
    pub fill: Option<Color>,
    /// Border as (width, color).
    pub border: Option<(f64, Color)>,
}

/// A single-child box with optional fixed sizing, padding and decoration.
///
/// Defaults: `width` and `height` shrink to content, `padding` is zero.
pub struct Container {
    /// Desired width.
    width: Length,
    /// Desired height.
    height: Length,
    /// Padding carved out of the space offered to the child.
    padding: Edges,
    /// Background decoration.
    decoration: Decoration,
}

impl Container {
    /// Construct a container with default options.
    pub fn new() -> Self {
        Self {
            width: Length::Shrink,
            height: Length::Shrink,
            padding: Edges::zero(),
            decoration: Decoration::default(),
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

    /// Set the padding.
    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Set the decoration.
    pub fn decoration(mut self, decoration: Decoration) -> Self {
        self.decoration = decoration;
        self
    }
}

impl Widget for Container {
    fn desired_width(&self) -> Length {
        self.width
    }

    fn desired_height(&self) -> Length {
        self.height
    }

    fn layout(&mut self, ctx: &mut LayoutContext, constraint: Constraint) -> Result<Size> {
        let narrowed = constraint
            .constrain(true, self.width, self.height)
            .shrink(self.padding.horizontal(), self.padding.vertical());
        let child_size = match ctx.first_child() {
            Some(child) => ctx.layout_child(child, narrowed)?,
            None => Size::zero(),
        };
        let content = self.padding.outset(child_size);
        if let Some(child) = ctx.first_child() {
            ctx.position_child(child, Point::new(self.padding.left, self.padding.top))?;
        }
        Ok(Size::new(
            local_length(content.w, self.width, constraint.min_width, constraint.max_width),
            local_length(content.h, self.height, constraint.min_height, constraint.max_height),
        ))
    }

    fn paint(&mut self, canvas: &mut dyn Canvas, ctx: &PaintContext) -> Result<()> {
        let rect = ctx.size.rect();
        if let Some(fill) = self.decoration.fill {
            canvas.fill_rect(rect, fill);
        }
        if let Some((width, color)) = self.decoration.border {
            canvas.stroke_rect(rect, width, color);
        }
        Ok(())
    }
}
