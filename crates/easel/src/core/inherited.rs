//! A generic dirty-flag cache for values that are "local plus inherited from
//! the parent": opacity, visibility, z-index, layer, and the world transform.
//!
//! Each node carries one [`Inherited`] slot per property kind. Setting a
//! local value invalidates the slot and, transitively, every descendant's
//! same-kind slot (the walk lives on [`Scene`](super::Scene), which owns the
//! tree). Reading the global value recomputes lazily by pulling the parent's
//! global, then caches.

use std::cell::Cell;

use geom::Affine;

/// How a property kind derives a node's global value from its parent's
/// global value and the node's local value.
pub trait Inherit {
    /// The locally stored value.
    type Local: Copy + PartialEq;
    /// The derived global value.
    type Value: Copy;

    /// Combine a parent's global value with a node's local value.
    fn inherit(parent: Self::Value, local: Self::Local) -> Self::Value;

    /// The global value at a tree root, where there is no parent.
    fn root(local: Self::Local) -> Self::Value;
}

/// One cached inherited value on one node.
///
/// A slot is dirty when its cache is empty. Dirtiness implies the
/// invalidation walk already visited the subtree below, so propagation can
/// prune there.
pub struct Inherited<P: Inherit> {
    /// The locally set value.
    local: P::Local,
    /// The cached global value; `None` when dirty.
    cache: Cell<Option<P::Value>>,
}

impl<P: Inherit> Inherited<P> {
    /// Construct a slot with the given local value, initially dirty.
    pub fn new(local: P::Local) -> Self {
        Self {
            local,
            cache: Cell::new(None),
        }
    }

    /// The locally set value.
    pub fn local(&self) -> P::Local {
        self.local
    }

    /// Set the local value. Returns true if the value changed, in which case
    /// the caller is responsible for propagating invalidation to the
    /// subtree.
    pub fn set_local(&mut self, local: P::Local) -> bool {
        if self.local == local {
            return false;
        }
        self.local = local;
        self.cache.set(None);
        true
    }

    /// Is the cached global value stale?
    pub fn is_dirty(&self) -> bool {
        self.cache.get().is_none()
    }

    /// Drop the cached global value.
    pub fn invalidate(&self) {
        self.cache.set(None);
    }

    /// The cached global value, if clean.
    pub fn cached(&self) -> Option<P::Value> {
        self.cache.get()
    }

    /// Store a freshly computed global value.
    pub fn store(&self, value: P::Value) {
        self.cache.set(Some(value));
    }
}

/// Accumulated opacity: the product of the local opacity down the ancestor
/// chain.
pub enum Opacity {}

impl Inherit for Opacity {
    type Local = f64;
    type Value = f64;

    fn inherit(parent: f64, local: f64) -> f64 {
        parent * local
    }

    fn root(local: f64) -> f64 {
        local
    }
}

/// Effective visibility: a node is visible only if every ancestor is.
pub enum Visibility {}

impl Inherit for Visibility {
    type Local = bool;
    type Value = bool;

    fn inherit(parent: bool, local: bool) -> bool {
        parent && local
    }

    fn root(local: bool) -> bool {
        local
    }
}

/// Draw-order z-index: a node's own value if set, else the nearest
/// ancestor's.
pub enum ZIndex {}

impl Inherit for ZIndex {
    type Local = Option<i32>;
    type Value = i32;

    fn inherit(parent: i32, local: Option<i32>) -> i32 {
        local.unwrap_or(parent)
    }

    fn root(local: Option<i32>) -> i32 {
        local.unwrap_or(0)
    }
}

/// Draw-order layer: a node's own value if set, else the nearest ancestor's.
/// Composition boundaries reset the inheritance; the scene folds that into
/// the local value it feeds the resolver.
pub enum Layer {}

impl Inherit for Layer {
    type Local = Option<i32>;
    type Value = i32;

    fn inherit(parent: i32, local: Option<i32>) -> i32 {
        local.unwrap_or(parent)
    }

    fn root(local: Option<i32>) -> i32 {
        local.unwrap_or(0)
    }
}

/// Accumulated world transform: the parent's world transform composed with
/// the node's layout position and local transform.
pub enum WorldTransform {}

impl Inherit for WorldTransform {
    type Local = Affine;
    type Value = Affine;

    fn inherit(parent: Affine, local: Affine) -> Affine {
        parent * local
    }

    fn root(local: Affine) -> Affine {
        local
    }
}
