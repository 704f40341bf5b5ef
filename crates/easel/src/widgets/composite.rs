use crate::{
    core::{NodeId, Scene, UpdateContext},
    error::Result,
    widget::Widget,
};

/// A declaratively recomposed subtree.
///
/// Holds a build function that produces a detached child subtree. When
/// marked dirty, the update phase frees the previous output, attaches a
/// freshly built one, and requests a layout pass. Sizing is delegated
/// entirely to the built child: constraints pass through untouched and the
/// child's size is forwarded.
pub struct Composite {
    /// Builds a detached subtree and returns its root.
    build: Box<dyn FnMut(&mut Scene) -> Result<NodeId> + Send>,
    /// The currently attached build output.
    built: Option<NodeId>,
    /// Whether the subtree should be rebuilt on the next update.
    dirty: bool,
}

impl Composite {
    /// Construct a composite from a build function.
    pub fn new(build: impl FnMut(&mut Scene) -> Result<NodeId> + Send + 'static) -> Self {
        Self {
            build: Box::new(build),
            built: None,
            dirty: true,
        }
    }

    /// Request a rebuild on the next update phase. Callbacks that change
    /// state the build function reads call this explicitly.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The root of the currently attached build output, if any.
    pub fn built(&self) -> Option<NodeId> {
        self.built
    }
}

impl Widget for Composite {
    fn loose_box(&self) -> bool {
        false
    }

    fn update(&mut self, ctx: &mut UpdateContext) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.dirty = false;
        let node = ctx.node();
        let scene = ctx.scene_mut();
        if let Some(old) = self.built.take() {
            // Detach now so the next layout pass sees only the fresh
            // subtree; teardown still waits for the batch-free sweep.
            scene.detach(old)?;
            scene.free(old)?;
        }
        let child = (self.build)(scene)?;
        scene.attach(node, child)?;
        self.built = Some(child);
        ctx.refresh();
        Ok(())
    }
}
