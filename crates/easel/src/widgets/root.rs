use geom::{Point, Size};

use crate::{
    core::UpdateContext,
    error::{Error, Result},
    layout::{Constraint, LayoutContext},
    widget::Widget,
};

/// The widget-tree root: bridges the scene's frame loop and the layout
/// protocol.
///
/// Holds the viewport size and runs the synchronous layout pass from the
/// update phase whenever a refresh has been requested, handing its child the
/// viewport as a loose bound. The root is the one place where a missing
/// layout capability is an error rather than a zero size.
pub struct Root {
    /// Viewport size the child is laid out against.
    size: Size,
}

impl Root {
    /// Construct a root with a viewport size.
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    /// Update the viewport size. Callers follow up with a refresh.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// The current viewport size.
    pub fn size(&self) -> Size {
        self.size
    }
}

impl Widget for Root {
    fn update(&mut self, ctx: &mut UpdateContext) -> Result<()> {
        if !ctx.scene().take_refresh() {
            return Ok(());
        }
        let node = ctx.node();
        let scene = ctx.scene_mut();
        scene.set_intrinsic(node, self.size)?;
        let Some(child) = scene.get(node)?.children().first().copied() else {
            return Ok(());
        };
        if !scene.has_widget(child) {
            return Err(Error::Layout(
                "root child is not a layout-capable widget".into(),
            ));
        }
        let mut lctx = LayoutContext::new(scene, node);
        lctx.layout_child(child, Constraint::loose(self.size))?;
        lctx.position_child(child, Point::zero())?;
        Ok(())
    }
}
