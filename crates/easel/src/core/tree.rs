//! Utilities for walking the scene's node tree.
//!
//! Traversals follow the sibling chain maintained by the arena, so a broken
//! chain surfaces as [`Error::NodeNotFound`](crate::Error::NodeNotFound), a
//! fatal sign of an earlier structural mutation bug, deliberately not
//! recovered from. Structural mutation of the tree from inside a traversal
//! closure is unsupported.

use geom::Point;

use crate::{
    core::{id::NodeId, scene::Scene},
    error::Result,
};

/// Walk is the return value from traversal closures.
#[derive(PartialEq, Eq, Debug, Clone)]
pub enum Walk<T> {
    /// Skip the subtree under the current node and continue walking.
    Skip,
    /// Stop walking and return a value.
    Handle(T),
    /// Continue walking.
    Continue,
}

impl<T> Walk<T> {
    /// The handle value of the traversal, if any.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Handle(v) => Some(v),
            _ => None,
        }
    }

    /// Did the traversal return Handle?
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handle(_))
    }

    /// Did the traversal return Continue?
    pub fn is_continue(&self) -> bool {
        match self {
            Self::Skip | Self::Handle(_) => false,
            Self::Continue => true,
        }
    }
}

/// A preorder traversal of the nodes under `id`.
///
/// - Walk::Skip prunes the children of the current node from the traversal.
/// - Walk::Handle stops the traversal and the contained value is returned.
/// - Any error return stops the traversal and the error is returned.
pub fn preorder<T>(
    scene: &mut Scene,
    id: NodeId,
    f: &mut dyn FnMut(&mut Scene, NodeId) -> Result<Walk<T>>,
) -> Result<Walk<T>> {
    let mut res = f(scene, id)?;
    if res.is_continue() {
        let mut next = scene.get(id)?.children().first().copied();
        while let Some(child) = next {
            next = scene.get(child)?.sibling();
            if res.is_continue() {
                match preorder(scene, child, f)? {
                    Walk::Skip => panic!("impossible"),
                    Walk::Continue => {}
                    Walk::Handle(t) => res = Walk::Handle(t),
                }
            }
        }
    }
    // Skip is not propagated upwards, so we translate it to continue.
    Ok(match res {
        Walk::Skip => Walk::Continue,
        _ => res,
    })
}

/// A postorder traversal of the nodes under `id`.
///
/// - Walk::Skip stops further traversal of siblings; the nodes on the path
///   back to the root are still visited.
/// - Walk::Handle stops the traversal and the contained value is returned.
/// - Any error return stops the traversal and the error is returned.
pub fn postorder<T>(
    scene: &mut Scene,
    id: NodeId,
    f: &mut dyn FnMut(&mut Scene, NodeId) -> Result<Walk<T>>,
) -> Result<Walk<T>> {
    let mut stop = None;
    let mut next = scene.get(id)?.children().first().copied();
    while let Some(child) = next {
        next = scene.get(child)?.sibling();
        if stop.is_none() {
            let v = postorder(scene, child, f)?;
            if !v.is_continue() {
                stop = Some(v);
            }
        }
    }
    match stop {
        None => f(scene, id),
        Some(v) => match v {
            Walk::Skip => {
                let v = f(scene, id)?;
                if v.is_continue() { Ok(Walk::Skip) } else { Ok(v) }
            }
            Walk::Handle(t) => Ok(Walk::Handle(t)),
            Walk::Continue => panic!("impossible"),
        },
    }
}

/// Find the topmost node whose laid-out box contains the given point, in
/// world coordinates. Disabled and invisible subtrees are skipped. Later
/// siblings draw over earlier ones, so the last match wins.
pub fn node_at(scene: &Scene, p: Point) -> Option<NodeId> {
    let mut best = None;
    let mut stack = vec![scene.root_id()];
    while let Some(id) = stack.pop() {
        let node = scene.node(id)?;
        if !node.enabled() || !scene.global_visible(id).ok()? {
            continue;
        }
        let world = scene.global_transform(id).ok()?;
        if let Some(inv) = world.invert() {
            let local = inv.apply(p);
            if node.intrinsic().rect().contains_point(local) {
                best = Some(id);
            }
        }
        // Reverse push order so earlier siblings pop first and later
        // siblings overwrite the match.
        for &child in node.children().iter().rev() {
            stack.push(child);
        }
    }
    best
}
