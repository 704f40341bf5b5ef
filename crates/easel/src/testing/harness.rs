use geom::Size;

use crate::{
    Engine,
    core::{NodeId, Scene},
    error::Result,
    testing::canvas::RecordingCanvas,
    widget::Widget,
};

/// A simple harness that holds an [`Engine`] and a [`RecordingCanvas`].
/// Tests build a widget tree under the root, step frames, and then inspect
/// the scene and the recorded draw calls.
pub struct Harness {
    /// The engine under test.
    pub engine: Engine,
    /// The recording draw backend.
    pub canvas: RecordingCanvas,
}

impl Harness {
    /// Create a harness with the given root viewport size.
    pub fn new(size: Size) -> Self {
        Self {
            engine: Engine::new(size),
            canvas: RecordingCanvas::new(),
        }
    }

    /// The scene's root node.
    pub fn root(&self) -> NodeId {
        self.engine.scene().root_id()
    }

    /// Read access to the scene.
    pub fn scene(&self) -> &Scene {
        self.engine.scene()
    }

    /// Mutable access to the scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.engine.scene_mut()
    }

    /// Add a widget and attach it under a parent.
    pub fn add_under<W: Widget + 'static>(&mut self, parent: NodeId, widget: W) -> Result<NodeId> {
        let id = self.engine.scene_mut().add(widget).into();
        self.engine.scene_mut().attach(parent, id)?;
        Ok(id)
    }

    /// Run one frame, clearing the previous frame's recorded draw calls.
    pub fn step(&mut self) -> Result<()> {
        self.canvas.clear();
        self.engine.step(&mut self.canvas)
    }
}
