use std::result::Result as StdResult;

use thiserror::Error;

use crate::core::NodeId;

/// Result type for easel operations.
pub type Result<T> = StdResult<T, Error>;

/// Engine error type.
///
/// Most variants indicate a prior invariant violation and are deliberately
/// not recovered from: they propagate out of the frame step. Layout
/// infeasibility is never an error; constraints clamp to a feasible range
/// instead.
#[derive(PartialEq, Error, Debug, Clone)]
pub enum Error {
    /// A node handle did not resolve in the arena. During traversal this
    /// means the sibling or child chain was corrupted by an earlier
    /// structural mutation.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Layout failure, such as an infinite bound where a finite one is
    /// required.
    #[error("layout: {0}")]
    Layout(String),

    /// Internal invariant violation.
    #[error("internal: {0}")]
    Internal(String),

    /// Invalid input.
    #[error("invalid: {0}")]
    Invalid(String),

    /// A named viewport was registered twice.
    #[error("duplicate viewport: {0}")]
    DuplicateViewport(String),

    /// A composition surface was acquired twice for the same node within one
    /// render-tree build.
    #[error("duplicate composition registration: {0:?}")]
    DuplicateComposition(NodeId),

    /// The off-screen surface pool hit its growth ceiling. This signals a
    /// composition leak rather than a recoverable shortage.
    #[error("surface pool exhausted (limit {limit})")]
    SurfacePoolExhausted {
        /// The configured pool ceiling.
        limit: usize,
    },

    /// A named lookup failed. All registries report missing names this way.
    #[error("unknown {kind}: {name}")]
    UnknownLookup {
        /// What kind of resource was looked up.
        kind: &'static str,
        /// The name that failed to resolve.
        name: String,
    },
}
