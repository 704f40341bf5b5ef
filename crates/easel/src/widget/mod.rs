//! Widget trait and layout behavior defaults.

use std::any::{Any, type_name};

use geom::{Point, Size};

use crate::{
    core::UpdateContext,
    error::Result,
    layout::{self, Constraint, Length, LayoutContext},
    render::{Canvas, PaintContext},
    state::NodeName,
};

/// Widgets are the behavior attached to nodes in the scene arena.
///
/// The default method set implements the single-child layout pattern:
/// narrow the incoming constraint toward the declared desired lengths, lay
/// the first child out, combine sizes, then position the child. Multi-child
/// widgets override [`Widget::layout`] wholesale.
pub trait Widget: Any + Send {
    /// Desired width; defaults to shrink-to-content.
    fn desired_width(&self) -> Length {
        Length::Shrink
    }

    /// Desired height; defaults to shrink-to-content.
    fn desired_height(&self) -> Length {
        Length::Shrink
    }

    /// Whether children are laid out with a loosened minimum. Loose widgets
    /// impose no floor on children sized below them.
    fn loose_box(&self) -> bool {
        true
    }

    /// Flex factor consumed by an enclosing Flex container. Zero means the
    /// widget is sized in the fixed pass.
    fn flex_factor(&self) -> u32 {
        0
    }

    /// Compute this widget's size under a constraint, laying out and
    /// positioning children as a side effect. A widget must never position
    /// its own node; the context only exposes child positioning.
    fn layout(&mut self, ctx: &mut LayoutContext, constraint: Constraint) -> Result<Size> {
        let size = layout::single_child(
            ctx,
            constraint,
            self.desired_width(),
            self.desired_height(),
            self.loose_box(),
        )?;
        self.place(ctx, size)?;
        Ok(size)
    }

    /// Position children after sizing. Side effect only; no further sizing
    /// happens here.
    fn place(&mut self, ctx: &mut LayoutContext, _size: Size) -> Result<()> {
        if let Some(child) = ctx.first_child() {
            ctx.position_child(child, Point::zero())?;
        }
        Ok(())
    }

    /// Per-frame update hook, run during the update phase.
    fn update(&mut self, _ctx: &mut UpdateContext) -> Result<()> {
        Ok(())
    }

    /// Draw this widget's own content. Children draw themselves. The engine
    /// guarantees the accumulated transform, opacity and draw order in
    /// effect; what is drawn is entirely up to the widget.
    fn paint(&mut self, _canvas: &mut dyn Canvas, _ctx: &PaintContext) -> Result<()> {
        Ok(())
    }

    /// Called exactly once when the widget's node first becomes ready.
    fn on_ready(&mut self, _ctx: &mut UpdateContext) -> Result<()> {
        Ok(())
    }

    /// Called when the batch-free sweep tears the widget's node down.
    fn on_destroy(&mut self) {}

    /// Name used for dumps and diagnostics.
    fn name(&self) -> NodeName {
        NodeName::from_type(type_name::<Self>())
    }
}

impl dyn Widget {
    /// Downcast a widget reference to a concrete type.
    pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
        (self as &dyn Any).downcast_ref()
    }

    /// Downcast a mutable widget reference to a concrete type.
    pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
        (self as &mut dyn Any).downcast_mut()
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}
