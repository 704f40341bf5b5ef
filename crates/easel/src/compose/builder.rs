use std::collections::{HashMap, VecDeque};

use crate::{
    compose::{context::CompositionContext, surface::SurfacePool},
    core::{NodeId, Scene},
    error::{Error, Result},
};

/// The stratified output of one render-tree build: a top-level composition
/// context plus a forest of nested contexts keyed by the id of the
/// composition-boundary node that owns each one.
pub struct RenderTree {
    /// Buckets for the build root's own composition.
    root: CompositionContext,
    /// Nested contexts for composition-boundary nodes.
    nested: HashMap<NodeId, CompositionContext>,
}

impl RenderTree {
    /// The top-level composition context.
    pub fn root_context(&self) -> &CompositionContext {
        &self.root
    }

    /// The nested context owned by a composition-boundary node, if any.
    pub fn nested_context(&self, node: NodeId) -> Option<&CompositionContext> {
        self.nested.get(&node)
    }

    /// Total number of contexts, including the top-level one.
    pub fn context_count(&self) -> usize {
        1 + self.nested.len()
    }
}

/// Builds and owns the retained [`RenderTree`], recycling its contexts and
/// their bucket allocations across frames.
pub struct RenderTreeManager {
    /// The retained tree, rebuilt every frame.
    tree: RenderTree,
    /// Spare contexts recycled from previous builds.
    spare: Vec<CompositionContext>,
}

impl RenderTreeManager {
    /// Construct an empty manager.
    pub fn new() -> Self {
        Self {
            tree: RenderTree {
                root: CompositionContext::new(NodeId::default()),
                nested: HashMap::new(),
            },
            spare: Vec::new(),
        }
    }

    /// The most recently built tree.
    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    /// Re-stratify the live tree under `root` into ordered draw buckets.
    ///
    /// Every inserted node is frozen as it is bucketed; the paint pass
    /// melts it after drawing. Composition-boundary nodes get a pooled
    /// off-screen surface and a nested context rooted at themselves.
    pub fn build(
        &mut self,
        scene: &Scene,
        surfaces: &mut SurfacePool,
        root: NodeId,
    ) -> Result<&RenderTree> {
        surfaces.release_all();
        for (_, mut ctx) in self.tree.nested.drain() {
            ctx.reset(NodeId::default());
            self.spare.push(ctx);
        }
        self.tree.root.reset(root);

        let mut compositions = Vec::new();
        build_context(scene, root, &mut self.tree.root, &mut compositions)?;

        // Each composition boundary becomes the root of its own nested
        // context, which may in turn surface further boundaries.
        while let Some(comp) = compositions.pop() {
            if self.tree.nested.contains_key(&comp) {
                return Err(Error::DuplicateComposition(comp));
            }
            surfaces.acquire(comp, scene.intrinsic(comp)?)?;
            let mut ctx = self
                .spare
                .pop()
                .unwrap_or_else(|| CompositionContext::new(comp));
            ctx.reset(comp);
            build_context(scene, comp, &mut ctx, &mut compositions)?;
            self.tree.nested.insert(comp, ctx);
        }
        Ok(&self.tree)
    }
}

/// Stratify the subtree under `start` into one context's buckets.
///
/// Nodes whose effective layer differs from the layer currently being built
/// are deferred and re-walked as pass roots of their own layer, into the
/// same context. The deferral queue drains in encounter order, so siblings
/// promoted to the same bucket keep declaration order. Composition
/// boundaries below the pass root are recorded for nested processing and
/// their subtrees skipped.
fn build_context(
    scene: &Scene,
    start: NodeId,
    ctx: &mut CompositionContext,
    compositions: &mut Vec<NodeId>,
) -> Result<()> {
    let mut pending = VecDeque::from([start]);
    while let Some(origin) = pending.pop_front() {
        let target_layer = scene.global_layer(origin)?;
        visit(scene, origin, target_layer, ctx, &mut pending, compositions)?;
    }
    Ok(())
}

/// One step of the stratifying depth-first walk.
fn visit(
    scene: &Scene,
    id: NodeId,
    target_layer: i32,
    ctx: &mut CompositionContext,
    pending: &mut VecDeque<NodeId>,
    compositions: &mut Vec<NodeId>,
) -> Result<()> {
    let node = scene.get(id)?;
    if !node.enabled() || !scene.global_visible(id)? {
        return Ok(());
    }
    if scene.global_layer(id)? != target_layer {
        // Different layer: defer the whole subtree to its own pass rather
        // than splitting the node across contexts.
        pending.push_back(id);
        return Ok(());
    }
    let frozen = scene.freeze(id)?;
    ctx.insert(frozen.layer, frozen.z_index, id);
    if id != ctx.root() && node.is_composition() {
        // The node itself is bucketed here (it composites its surface into
        // this context); its descendants belong to the nested context. The
        // comparison is against the context root, not the per-layer walk
        // origin, so a boundary reached through a layer deferral still
        // nests.
        compositions.push(id);
        return Ok(());
    }
    let mut next = node.children().first().copied();
    while let Some(child) = next {
        next = scene.get(child)?.sibling();
        visit(scene, child, target_layer, ctx, pending, compositions)?;
    }
    Ok(())
}
