use std::cell::Cell;

use geom::{Affine, Point, Size};

use crate::{
    core::{
        id::NodeId,
        inherited::{Inherited, Layer, Opacity, Visibility, WorldTransform, ZIndex},
    },
    state::{Lifecycle, NodeName},
    widget::Widget,
};

/// Derived global values snapshotted at render-tree build time, so the
/// immediately following draw pass never re-derives inherited state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frozen {
    /// Resolved draw layer.
    pub layer: i32,
    /// Resolved z-index.
    pub z_index: i32,
    /// Accumulated world transform.
    pub transform: Affine,
    /// Accumulated opacity.
    pub opacity: f64,
    /// Effective visibility.
    pub visible: bool,
}

/// Core node data stored in the arena.
pub struct Node {
    /// Widget behavior and state, if any. Nodes without a widget are plain
    /// grouping nodes.
    pub(crate) widget: Option<Box<dyn Widget>>,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree, in declaration order.
    pub(crate) children: Vec<NodeId>,
    /// Next sibling among the parent's children. Always consistent with the
    /// parent's child list; attach and detach re-link it.
    pub(crate) sibling: Option<NodeId>,

    /// Node name for paths and dumps.
    pub(crate) name: NodeName,
    /// Disabled nodes are skipped by the update and build traversals.
    pub(crate) enabled: bool,
    /// Lifecycle state.
    pub(crate) lifecycle: Lifecycle,

    /// Position relative to the parent, assigned by the parent's layout
    /// pass. A node never positions itself.
    pub(crate) position: Point,
    /// The size this node resolved to during its last layout pass.
    pub(crate) intrinsic: Size,

    /// Accumulated opacity cache.
    pub(crate) opacity: Inherited<Opacity>,
    /// Effective visibility cache.
    pub(crate) visibility: Inherited<Visibility>,
    /// Z-index cache.
    pub(crate) z_index: Inherited<ZIndex>,
    /// Layer cache.
    pub(crate) layer: Inherited<Layer>,
    /// World transform cache.
    pub(crate) transform: Inherited<WorldTransform>,

    /// Whether this node starts an isolated render composition (an
    /// off-screen surface composited back into the parent's output).
    pub(crate) composition: bool,
    /// Frozen snapshot of derived values, set during render-tree build and
    /// cleared ("melted") after the node is drawn.
    pub(crate) frozen: Cell<Option<Frozen>>,
}

impl Node {
    /// Construct a detached node.
    pub(crate) fn new(name: NodeName, widget: Option<Box<dyn Widget>>) -> Self {
        Self {
            widget,
            parent: None,
            children: Vec::new(),
            sibling: None,
            name,
            enabled: true,
            lifecycle: Lifecycle::Created,
            position: Point::zero(),
            intrinsic: Size::zero(),
            opacity: Inherited::new(1.0),
            visibility: Inherited::new(true),
            z_index: Inherited::new(None),
            layer: Inherited::new(None),
            transform: Inherited::new(Affine::IDENTITY),
            composition: false,
            frozen: Cell::new(None),
        }
    }

    /// Return the node's name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the next sibling, if any.
    pub fn sibling(&self) -> Option<NodeId> {
        self.sibling
    }

    /// Is this node enabled?
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Return the lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Position relative to the parent, as assigned by the parent's last
    /// layout pass.
    pub fn position(&self) -> Point {
        self.position
    }

    /// The size this node resolved to during its last layout pass.
    pub fn intrinsic(&self) -> Size {
        self.intrinsic
    }

    /// Does this node start an isolated render composition?
    pub fn is_composition(&self) -> bool {
        self.composition
    }

    /// The frozen snapshot, if the node is currently frozen.
    pub fn frozen(&self) -> Option<Frozen> {
        self.frozen.get()
    }
}
