use std::cell::Cell;

use geom::{Affine, Point, Size};
use slotmap::SlotMap;

use crate::{
    core::{
        context::UpdateContext,
        id::{NodeId, TypedId},
        inherited::{Inherit, Inherited, Layer, Opacity, Visibility, WorldTransform, ZIndex},
        node::{Frozen, Node},
        tree::{self, Walk},
    },
    error::{Error, Result},
    state::{Lifecycle, NodeName},
    widget::Widget,
};

/// The scene arena: exclusive owner of every node in one engine instance.
///
/// Parent references are non-owning back-references; a node exclusively owns
/// its child list. All mutation happens synchronously inside one frame
/// phase, so there is no locking anywhere.
pub struct Scene {
    /// Node storage arena.
    nodes: SlotMap<NodeId, Node>,
    /// Root node ID.
    root: NodeId,
    /// Nodes flagged for teardown, flushed by the batch-free sweep.
    pending_free: Vec<NodeId>,
    /// Whether a widget layout pass has been requested.
    layout_refresh: Cell<bool>,
}

impl Scene {
    /// Create a new scene with an empty, ready root group node.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root_node = Node::new(NodeName::convert("root"), None);
        root_node.lifecycle = Lifecycle::Ready;
        let root = nodes.insert(root_node);
        Self {
            nodes,
            root,
            pending_free: Vec::new(),
            layout_refresh: Cell::new(true),
        }
    }

    /// Return the root node id.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Return a reference to a node by id.
    pub fn node(&self, id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(id.into())
    }

    /// Return a node or fail. A missing id during traversal means the
    /// sibling or child chain was corrupted.
    pub fn get(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))
    }

    /// Mutable counterpart to [`Scene::get`].
    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))
    }

    /// The lifecycle state of a node.
    ///
    /// Arena keys are generational, so an id that no longer resolves can
    /// only belong to a node the batch-free sweep has torn down.
    pub fn lifecycle(&self, id: NodeId) -> Lifecycle {
        self.nodes
            .get(id)
            .map(|n| n.lifecycle)
            .unwrap_or(Lifecycle::Destroyed)
    }

    /// Add a widget to the arena as a detached node and return its typed id.
    pub fn add<W: Widget + 'static>(&mut self, widget: W) -> TypedId<W> {
        let name = widget.name();
        let id = self.nodes.insert(Node::new(name, Some(Box::new(widget))));
        TypedId::new(id)
    }

    /// Add a widgetless grouping node to the arena, detached.
    pub fn add_group(&mut self, name: &str) -> NodeId {
        self.nodes
            .insert(Node::new(NodeName::convert(name), None))
    }

    /// Replace the widget stored at a node.
    pub fn set_widget<W: Widget + 'static>(&mut self, id: NodeId, widget: W) -> Result<()> {
        let name = widget.name();
        let node = self.get_mut(id)?;
        node.widget = Some(Box::new(widget));
        node.name = name;
        Ok(())
    }

    /// Does this node carry a widget?
    pub fn has_widget(&self, id: NodeId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|n| n.widget.is_some())
    }

    /// Shared reference to a node's widget, if any.
    pub fn widget_ref(&self, id: NodeId) -> Option<&dyn Widget> {
        self.nodes.get(id).and_then(|n| n.widget.as_deref())
    }

    /// Take a node's widget out of its slot, run the closure against the
    /// scene, then restore the slot. The widget slot is empty for the
    /// duration of the call; the single-threaded phase model never re-enters
    /// the same widget.
    pub fn with_widget_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let node = self.get_mut(id)?;
        let Some(mut widget) = node.widget.take() else {
            return Err(Error::Internal(format!("node has no widget: {id:?}")));
        };
        let out = f(widget.as_mut(), self);
        // The node may have been freed inside the closure; the widget is
        // simply dropped in that case.
        if let Some(node) = self.nodes.get_mut(id) {
            node.widget = Some(widget);
        }
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Structure

    /// Attach a detached node as the last child of `parent`.
    ///
    /// Fires the `Ready` lifecycle transition for the attached subtree if
    /// the parent chain is ready.
    pub fn attach(&mut self, parent: NodeId, child: impl Into<NodeId>) -> Result<()> {
        let child = child.into();
        if child == self.root {
            return Err(Error::Invalid("cannot attach the root node".into()));
        }
        let state = self.get(child)?.lifecycle;
        if matches!(state, Lifecycle::Destroying | Lifecycle::Destroyed) {
            return Err(Error::Invalid("cannot attach a destroyed node".into()));
        }
        if self.get(child)?.parent.is_some() {
            return Err(Error::Invalid("node is already attached".into()));
        }
        let mut cur = Some(parent);
        while let Some(c) = cur {
            if c == child {
                return Err(Error::Invalid("attach would create a cycle".into()));
            }
            cur = self.get(c)?.parent;
        }

        let prev_last = self.get(parent)?.children.last().copied();
        self.get_mut(parent)?.children.push(child);
        if let Some(last) = prev_last {
            self.get_mut(last)?.sibling = Some(child);
        }
        {
            let node = self.get_mut(child)?;
            node.parent = Some(parent);
            node.sibling = None;
        }
        self.invalidate_subtree(child);

        if self.get(parent)?.lifecycle == Lifecycle::Ready {
            self.propagate_ready(child)?;
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping it alive.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let parent = self
            .get(id)?
            .parent
            .ok_or_else(|| Error::Invalid("node is not attached".into()))?;
        self.unlink(parent, id)?;
        {
            let node = self.get_mut(id)?;
            node.parent = None;
            node.sibling = None;
        }
        self.invalidate_subtree(id);
        Ok(())
    }

    /// Remove `child` from `parent`'s child list, re-linking the sibling
    /// chain around it.
    fn unlink(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let (prev, next) = {
            let pnode = self.get_mut(parent)?;
            let idx = pnode
                .children
                .iter()
                .position(|&c| c == child)
                .ok_or_else(|| Error::Internal("child missing from parent list".into()))?;
            pnode.children.remove(idx);
            let next = pnode.children.get(idx).copied();
            let prev = if idx > 0 {
                pnode.children.get(idx - 1).copied()
            } else {
                None
            };
            (prev, next)
        };
        if let Some(prev) = prev {
            self.get_mut(prev)?.sibling = next;
        }
        Ok(())
    }

    /// Fire the one-time `Ready` transition for a freshly attached subtree.
    fn propagate_ready(&mut self, id: NodeId) -> Result<()> {
        let mut ids = Vec::new();
        tree::preorder::<()>(self, id, &mut |scene, nid| {
            if scene.get(nid)?.lifecycle == Lifecycle::Created {
                ids.push(nid);
                Ok(Walk::Continue)
            } else {
                // Ready fires once; a re-attached subtree stays ready.
                Ok(Walk::Skip)
            }
        })?;
        for nid in ids {
            self.get_mut(nid)?.lifecycle = Lifecycle::Ready;
            if self.has_widget(nid) {
                self.with_widget_mut(nid, |w, scene| {
                    let mut ctx = UpdateContext::new(scene, nid);
                    w.on_ready(&mut ctx)
                })??;
            }
        }
        Ok(())
    }

    /// Flag a subtree for teardown. The node stays in the tree until the
    /// batch-free sweep runs; freeing is idempotent.
    pub fn free(&mut self, id: NodeId) -> Result<()> {
        let state = self.get(id)?.lifecycle;
        if matches!(state, Lifecycle::Destroying | Lifecycle::Destroyed) {
            return Ok(());
        }
        let mut ids = Vec::new();
        tree::preorder::<()>(self, id, &mut |_, nid| {
            ids.push(nid);
            Ok(Walk::Continue)
        })?;
        for nid in ids {
            self.get_mut(nid)?.lifecycle = Lifecycle::Destroying;
        }
        self.pending_free.push(id);
        Ok(())
    }

    /// Tear down every subtree flagged by [`Scene::free`]: run destroy
    /// hooks, detach from parents, and remove the nodes from the arena.
    /// Runs as the batch-free frame phase, after all updates, so destruction
    /// never happens mid-traversal of a structure an earlier phase is
    /// reading.
    pub fn sweep_free(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending_free);
        for id in pending {
            // Already gone as part of an earlier subtree in this sweep.
            if !self.nodes.contains_key(id) {
                continue;
            }
            if self.get(id)?.parent.is_some() {
                self.detach(id)?;
            }
            let mut ids = Vec::new();
            tree::preorder::<()>(self, id, &mut |_, nid| {
                ids.push(nid);
                Ok(Walk::Continue)
            })?;
            tracing::trace!(count = ids.len(), "batch free sweep");
            for nid in ids {
                if let Some(mut node) = self.nodes.remove(nid) {
                    node.lifecycle = Lifecycle::Destroyed;
                    if let Some(mut widget) = node.widget.take() {
                        widget.on_destroy();
                    }
                }
            }
        }
        Ok(())
    }

    /// Enable or disable a node. Disabled subtrees are skipped by the
    /// update and render-tree build traversals.
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.get_mut(id)?.enabled = enabled;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Layout results

    /// Record a node's position, assigned by its parent's layout pass.
    pub(crate) fn set_position(&mut self, id: NodeId, p: Point) -> Result<()> {
        let node = self.get_mut(id)?;
        if node.position != p {
            node.position = p;
            self.invalidate_from(id, |n| &n.transform);
        }
        Ok(())
    }

    /// Record the size a node resolved to during layout.
    pub(crate) fn set_intrinsic(&mut self, id: NodeId, size: Size) -> Result<()> {
        self.get_mut(id)?.intrinsic = size;
        Ok(())
    }

    /// The size a node resolved to during its last layout pass.
    pub fn intrinsic(&self, id: NodeId) -> Result<Size> {
        Ok(self.get(id)?.intrinsic)
    }

    /// A node's position relative to its parent.
    pub fn position(&self, id: NodeId) -> Result<Point> {
        Ok(self.get(id)?.position)
    }

    // ------------------------------------------------------------------
    // Inherited properties

    /// Set a node's local opacity, in 0..=1.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f64) -> Result<()> {
        let opacity = opacity.clamp(0.0, 1.0);
        if self.get_mut(id)?.opacity.set_local(opacity) {
            self.invalidate_from(id, |n| &n.opacity);
        }
        Ok(())
    }

    /// Set a node's local visibility.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        if self.get_mut(id)?.visibility.set_local(visible) {
            self.invalidate_from(id, |n| &n.visibility);
        }
        Ok(())
    }

    /// Set or clear a node's z-index. `None` inherits the ancestor value.
    pub fn set_z_index(&mut self, id: NodeId, z: Option<i32>) -> Result<()> {
        if self.get_mut(id)?.z_index.set_local(z) {
            self.invalidate_from(id, |n| &n.z_index);
        }
        Ok(())
    }

    /// Set or clear a node's layer. `None` inherits the ancestor value.
    pub fn set_layer(&mut self, id: NodeId, layer: Option<i32>) -> Result<()> {
        if self.get_mut(id)?.layer.set_local(layer) {
            self.invalidate_from(id, |n| &n.layer);
        }
        Ok(())
    }

    /// Set a node's local transform, applied on top of its layout position.
    pub fn set_local_transform(&mut self, id: NodeId, transform: Affine) -> Result<()> {
        if self.get_mut(id)?.transform.set_local(transform) {
            self.invalidate_from(id, |n| &n.transform);
        }
        Ok(())
    }

    /// Mark or unmark a node as a composition boundary. Boundaries reset
    /// layer inheritance, so the layer caches below are invalidated.
    pub fn set_composition(&mut self, id: NodeId, composition: bool) -> Result<()> {
        let node = self.get_mut(id)?;
        if node.composition != composition {
            node.composition = composition;
            self.invalidate_from(id, |n| &n.layer);
        }
        Ok(())
    }

    /// The accumulated opacity of a node.
    pub fn global_opacity(&self, id: NodeId) -> Result<f64> {
        self.resolve::<Opacity>(id, |n| &n.opacity, |n| n.opacity.local())
    }

    /// The effective visibility of a node.
    pub fn global_visible(&self, id: NodeId) -> Result<bool> {
        self.resolve::<Visibility>(id, |n| &n.visibility, |n| n.visibility.local())
    }

    /// The resolved z-index of a node.
    pub fn global_z_index(&self, id: NodeId) -> Result<i32> {
        self.resolve::<ZIndex>(id, |n| &n.z_index, |n| n.z_index.local())
    }

    /// The effective layer of a node: its own if set, else the nearest
    /// ancestor's. Composition boundaries reset the inheritance.
    pub fn global_layer(&self, id: NodeId) -> Result<i32> {
        self.resolve::<Layer>(
            id,
            |n| &n.layer,
            |n| {
                if n.composition {
                    Some(n.layer.local().unwrap_or(0))
                } else {
                    n.layer.local()
                }
            },
        )
    }

    /// The accumulated world transform of a node: the parent's world
    /// transform, the layout position, then the local transform.
    pub fn global_transform(&self, id: NodeId) -> Result<Affine> {
        self.resolve::<WorldTransform>(
            id,
            |n| &n.transform,
            |n| Affine::translate(n.position.x, n.position.y) * n.transform.local(),
        )
    }

    /// Lazily recompute one inherited value, pulling the parent's global on
    /// demand and caching the result. Correct in any read order.
    fn resolve<P: Inherit>(
        &self,
        id: NodeId,
        slot: impl Fn(&Node) -> &Inherited<P> + Copy,
        local: impl Fn(&Node) -> P::Local + Copy,
    ) -> Result<P::Value> {
        let node = self.get(id)?;
        if let Some(v) = slot(node).cached() {
            return Ok(v);
        }
        let value = match node.parent {
            Some(p) => P::inherit(self.resolve(p, slot, local)?, local(node)),
            None => P::root(local(node)),
        };
        slot(node).store(value);
        Ok(value)
    }

    /// Invalidate one property kind for a node and its subtree. The walk
    /// prunes subtrees whose slot is already dirty: a dirty slot means a
    /// previous walk already covered everything below it.
    fn invalidate_from<P: Inherit>(&self, id: NodeId, slot: impl Fn(&Node) -> &Inherited<P> + Copy) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        slot(node).invalidate();
        for &child in &node.children {
            self.invalidate_below(child, slot);
        }
    }

    /// Invalidation walk below the mutated node.
    fn invalidate_below<P: Inherit>(&self, id: NodeId, slot: impl Fn(&Node) -> &Inherited<P> + Copy) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if slot(node).is_dirty() {
            return;
        }
        slot(node).invalidate();
        for &child in &node.children {
            self.invalidate_below(child, slot);
        }
    }

    /// Invalidate every inherited property for a subtree. Used when a
    /// subtree's ancestry changes wholesale (attach/detach).
    fn invalidate_subtree(&self, id: NodeId) {
        self.invalidate_from(id, |n| &n.opacity);
        self.invalidate_from(id, |n| &n.visibility);
        self.invalidate_from(id, |n| &n.z_index);
        self.invalidate_from(id, |n| &n.layer);
        self.invalidate_from(id, |n| &n.transform);
    }

    // ------------------------------------------------------------------
    // Freeze / melt

    /// Snapshot a node's derived globals for the draw pass.
    pub fn freeze(&self, id: NodeId) -> Result<Frozen> {
        let frozen = Frozen {
            layer: self.global_layer(id)?,
            z_index: self.global_z_index(id)?,
            transform: self.global_transform(id)?,
            opacity: self.global_opacity(id)?,
            visible: self.global_visible(id)?,
        };
        self.get(id)?.frozen.set(Some(frozen));
        Ok(frozen)
    }

    /// Release a node's frozen snapshot so the next build re-derives fresh
    /// values. Idempotent.
    pub fn melt(&self, id: NodeId) -> Result<()> {
        self.get(id)?.frozen.set(None);
        Ok(())
    }

    /// A node's frozen snapshot, if it is currently frozen.
    pub fn frozen(&self, id: NodeId) -> Result<Option<Frozen>> {
        Ok(self.get(id)?.frozen.get())
    }

    // ------------------------------------------------------------------
    // Layout refresh flag

    /// Request a widget layout pass on the next update phase.
    pub fn request_refresh(&self) {
        self.layout_refresh.set(true);
    }

    /// Consume the pending layout request, if any.
    pub fn take_refresh(&self) -> bool {
        self.layout_refresh.replace(false)
    }
}
