//! The node arena and the machinery hanging off it: tree structure,
//! lifecycle, traversal, and inherited property caches.

/// Update context passed to widget hooks.
pub mod context;
/// Node ID types.
pub mod id;
/// Inherited property caches.
pub mod inherited;
/// Core node data.
pub mod node;
/// The scene arena.
pub mod scene;
/// Tree traversal utilities.
pub mod tree;

pub use context::UpdateContext;
pub use id::{NodeId, TypedId};
pub use inherited::{Inherit, Inherited};
pub use node::{Frozen, Node};
pub use scene::Scene;
pub use tree::{Walk, node_at, postorder, preorder};
