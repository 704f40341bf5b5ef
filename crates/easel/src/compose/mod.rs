//! Render-tree composition: stratifying the live node tree into ordered
//! draw buckets, grouped into isolated composition contexts.

/// The render-tree builder.
mod builder;
/// Ordered draw buckets for one composition.
mod context;
/// Sorted pooled list structures backing the buckets.
mod ordered;
/// Off-screen surface pooling.
mod surface;

pub use builder::{RenderTree, RenderTreeManager};
pub use context::CompositionContext;
pub use ordered::{OrderedList, Recycle};
pub use surface::{DEFAULT_SURFACE_LIMIT, SurfaceId, SurfacePool};
