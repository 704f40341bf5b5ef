//! Built-in layout widgets.

/// Child alignment container.
mod align;
/// Declaratively recomposed subtree.
mod composite;
/// Single-child box with padding and decoration.
mod container;
/// Two-pass flex container.
mod flex;
/// Fixed-column grid.
mod grid;
/// The widget-tree root.
mod root;
/// Scrollable viewport.
mod scroll;

pub use align::{Align, Alignment};
pub use composite::Composite;
pub use container::{Container, Decoration};
pub use flex::{CrossAxisAlignment, Flex, FlexItem, MainAxisAlignment};
pub use grid::Grid;
pub use root::Root;
pub use scroll::Scroll;
