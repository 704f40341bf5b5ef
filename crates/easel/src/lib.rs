#![allow(clippy::new_without_default)]
//! Easel is a retained-mode 2D scene-graph engine. It keeps a tree of nodes
//! in an arena, lays widgets out with box constraints, stratifies the live
//! tree into composited layer/z-index draw buckets, and drives the whole
//! thing through a fixed per-frame pipeline.

/// Render-tree composition: draw buckets, surfaces, and the builder.
pub mod compose;
/// Node arena, tree traversal, and inherited properties.
pub mod core;
/// Debug dump utilities.
pub mod dump;
/// Engine errors.
pub mod error;
/// Constraint types and the widget layout protocol.
pub mod layout;
/// The per-frame phase pipeline.
pub mod pipeline;
/// Paint pass and the draw backend contract.
pub mod render;
/// Shared node name and lifecycle types.
pub mod state;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;
/// The widget trait.
pub mod widget;
/// Built-in layout widgets.
pub mod widgets;

/// Engine assembly: scene + pipeline + registries.
mod engine;

pub use engine::Engine;
pub use error::{Error, Result};
pub use geom;

pub use crate::core::{NodeId, Scene, TypedId, UpdateContext, Walk};
pub use layout::{Constraint, LayoutContext, Length};
pub use pipeline::{Phase, Pipeline};
pub use render::{Canvas, Color, PaintContext};
pub use state::{Lifecycle, NodeName};
pub use widget::Widget;
