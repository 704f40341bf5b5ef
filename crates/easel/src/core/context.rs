use crate::core::{id::NodeId, scene::Scene};

/// Context handed to widget update and lifecycle hooks.
///
/// Callbacks that mutate state and want the widget tree re-laid-out must
/// call [`UpdateContext::refresh`] explicitly; nothing re-renders
/// implicitly.
pub struct UpdateContext<'a> {
    /// The scene the widget's node lives in.
    scene: &'a mut Scene,
    /// The widget's own node.
    node: NodeId,
}

impl<'a> UpdateContext<'a> {
    /// Construct a context for one widget invocation.
    pub(crate) fn new(scene: &'a mut Scene, node: NodeId) -> Self {
        Self { scene, node }
    }

    /// The widget's own node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Read access to the scene.
    pub fn scene(&self) -> &Scene {
        self.scene
    }

    /// Mutable access to the scene.
    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scene
    }

    /// Request a widget layout pass on the next update phase.
    pub fn refresh(&mut self) {
        self.scene.request_refresh();
    }
}
