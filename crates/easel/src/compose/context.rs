use crate::{
    compose::ordered::{OrderedList, Recycle},
    core::NodeId,
};

/// The z-index stacks within one draw layer.
#[derive(Default)]
pub(crate) struct LayerBucket {
    /// FIFO node lists keyed by z-index.
    pub(crate) stacks: OrderedList<i32, Vec<NodeId>>,
}

impl Recycle for LayerBucket {
    fn recycle(&mut self) {
        self.stacks.soft_clear();
    }
}

/// Ordered draw buckets for one isolated render composition.
///
/// Nodes land in `layer -> z-index -> insertion order` buckets; drawing the
/// buckets in ascending key order yields correct visual stacking. One
/// context per composition boundary, with the top-level context rooted at
/// the build root.
pub struct CompositionContext {
    /// The composition root node.
    root: NodeId,
    /// Draw buckets keyed by layer.
    layers: OrderedList<i32, LayerBucket>,
}

impl CompositionContext {
    /// Construct an empty context rooted at a node.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            layers: OrderedList::new(),
        }
    }

    /// The composition root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Re-root the context and drop its buckets, keeping allocations for
    /// the next build.
    pub(crate) fn reset(&mut self, root: NodeId) {
        self.root = root;
        self.layers.soft_clear();
    }

    /// Append a node to its (layer, z-index) bucket.
    pub(crate) fn insert(&mut self, layer: i32, z_index: i32, node: NodeId) {
        self.layers.entry(layer).stacks.entry(z_index).push(node);
    }

    /// Are there any bucketed nodes?
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate bucketed nodes in draw order: layers ascending, z-indices
    /// ascending, insertion order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.layers.iter().flat_map(|(_, bucket)| {
            bucket
                .stacks
                .iter()
                .flat_map(|(_, stack)| stack.iter().copied())
        })
    }

    /// Iterate (layer, z-index, node) triples in draw order. Mostly useful
    /// for diagnostics and tests.
    pub fn iter_buckets(&self) -> impl Iterator<Item = (i32, i32, NodeId)> + '_ {
        self.layers.iter().flat_map(|(layer, bucket)| {
            bucket.stacks.iter().flat_map(move |(z, stack)| {
                stack.iter().map(move |&node| (layer, z, node))
            })
        })
    }
}
