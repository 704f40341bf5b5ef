//! The widget layout protocol: box constraints flow down, sizes flow up,
//! and parents assign child positions as a side effect of their own pass.

/// Box constraint values and desired-length sentinels.
mod constraint;

pub use constraint::{Constraint, Length};

use geom::{Point, Size};

use crate::{
    core::{NodeId, Scene},
    error::{Error, Result},
};

/// Context handed to a widget's layout pass.
///
/// All child sizing and positioning goes through here, which is what
/// enforces the protocol's central invariant: a widget never sets its own
/// position, only an ancestor's layout pass positions it.
pub struct LayoutContext<'a> {
    /// The scene being laid out.
    scene: &'a mut Scene,
    /// The node whose widget is currently running its layout pass.
    node: NodeId,
}

impl<'a> LayoutContext<'a> {
    /// Construct a layout context for one widget invocation.
    pub(crate) fn new(scene: &'a mut Scene, node: NodeId) -> Self {
        Self { scene, node }
    }

    /// The node being laid out.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Read access to the scene.
    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// The children of the node being laid out.
    pub fn children(&self) -> Vec<NodeId> {
        self.scene
            .node(self.node)
            .map(|n| n.children().to_vec())
            .unwrap_or_default()
    }

    /// The first child of the node being laid out, if any.
    pub fn first_child(&self) -> Option<NodeId> {
        self.scene
            .node(self.node)
            .and_then(|n| n.children().first().copied())
    }

    /// The flex factor a child declares, zero for fixed children and
    /// widgetless nodes.
    pub fn flex_factor(&self, child: NodeId) -> u32 {
        self.scene
            .widget_ref(child)
            .map(|w| w.flex_factor())
            .unwrap_or(0)
    }

    /// The size a child resolved to earlier in this pass.
    pub fn intrinsic(&self, child: NodeId) -> Size {
        self.scene.intrinsic(child).unwrap_or_default()
    }

    /// Recursively lay out a child against a constraint, caching and
    /// returning its resolved size. A widgetless child reports zero size.
    pub fn layout_child(&mut self, child: NodeId, constraint: Constraint) -> Result<Size> {
        self.check_child(child)?;
        if !self.scene.has_widget(child) {
            self.scene.set_intrinsic(child, Size::zero())?;
            return Ok(Size::zero());
        }
        let size = self.scene.with_widget_mut(child, |widget, scene| {
            let mut ctx = LayoutContext::new(scene, child);
            widget.layout(&mut ctx, constraint)
        })??;
        self.scene.set_intrinsic(child, size)?;
        Ok(size)
    }

    /// Assign a child's position relative to this node.
    pub fn position_child(&mut self, child: NodeId, position: Point) -> Result<()> {
        self.check_child(child)?;
        self.scene.set_position(child, position)
    }

    /// Positions and sizes may only be assigned to direct children.
    fn check_child(&self, child: NodeId) -> Result<()> {
        if self.scene.get(child)?.parent() != Some(self.node) {
            return Err(Error::Layout(format!(
                "{child:?} is not a child of {:?}",
                self.node
            )));
        }
        Ok(())
    }
}

/// Resolve a widget's final length on one axis from its child's reported
/// length and its own desired length.
pub fn local_length(child: f64, desired: Length, min: f64, max: f64) -> f64 {
    match desired {
        Length::Shrink => child,
        Length::Stretch => max,
        Length::Px(v) => v.clamp(min, max),
    }
}

/// The main-axis length a container offers its flexible children.
///
/// A shrink-sized container offers no free space: flex distribution
/// requires an externally imposed bound.
pub fn max_axis_length(bound: f64, desired: Length) -> f64 {
    match desired {
        Length::Stretch => bound,
        Length::Shrink => 0.0,
        Length::Px(v) => v.min(bound),
    }
}

/// The default single-child sizing pass: narrow the incoming constraint
/// toward the desired lengths, lay out the first child, then combine the
/// child's size with the desired lengths.
pub fn single_child(
    ctx: &mut LayoutContext,
    constraint: Constraint,
    desired_width: Length,
    desired_height: Length,
    loose: bool,
) -> Result<Size> {
    let narrowed = constraint.constrain(loose, desired_width, desired_height);
    let child_size = match ctx.first_child() {
        Some(child) => ctx.layout_child(child, narrowed)?,
        None => Size::zero(),
    };
    Ok(Size::new(
        local_length(
            child_size.w,
            desired_width,
            constraint.min_width,
            constraint.max_width,
        ),
        local_length(
            child_size.h,
            desired_height,
            constraint.min_height,
            constraint.max_height,
        ),
    ))
}
