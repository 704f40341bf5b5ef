//! The paint pass and the contract with the draw backend.
//!
//! The engine guarantees *when* each node's paint callback runs and under
//! what accumulated transform, opacity and draw order; the backend decides
//! what the drawing primitives actually do.

use geom::{Affine, Rect, Size};

use crate::{
    compose::{CompositionContext, RenderTree, SurfaceId, SurfacePool},
    core::{Frozen, Scene},
    error::{Error, Result},
};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Construct a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// Read-only state handed to a widget's paint callback.
pub struct PaintContext {
    /// The size the widget resolved to during layout. Drawing happens in
    /// local coordinates with the origin at the widget's top-left corner.
    pub size: Size,
    /// The frozen snapshot the draw pass is operating under.
    pub frozen: Frozen,
}

/// The trait implemented by draw backends.
///
/// Transform and opacity state apply to subsequent drawing calls. Surface
/// calls bracket the rendering of a nested composition into an off-screen
/// target, which is then composited back with [`Canvas::composite`].
pub trait Canvas {
    /// Set the transform applied to subsequent drawing calls.
    fn set_transform(&mut self, transform: Affine);
    /// Set the opacity applied to subsequent drawing calls.
    fn set_opacity(&mut self, opacity: f64);
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color);
    /// Redirect subsequent drawing into an off-screen surface.
    fn push_surface(&mut self, surface: SurfaceId, size: Size) -> Result<()>;
    /// Finish drawing into an off-screen surface.
    fn pop_surface(&mut self, surface: SurfaceId) -> Result<()>;
    /// Composite a finished surface into the current target.
    fn composite(&mut self, surface: SurfaceId, transform: Affine, opacity: f64) -> Result<()>;
}

/// Draw a built render tree: iterate each context's buckets in layer, then
/// z-index, then insertion order, and melt every node after it is drawn so
/// the next build re-derives fresh globals.
pub fn paint_tree(
    scene: &mut Scene,
    tree: &RenderTree,
    surfaces: &SurfacePool,
    canvas: &mut dyn Canvas,
) -> Result<()> {
    paint_context(scene, tree, tree.root_context(), surfaces, canvas, Affine::IDENTITY)
}

/// Draw one composition context. `base_inv` maps world coordinates into the
/// context's own target (the inverse of the composition root's world
/// transform, identity for the top-level context).
fn paint_context(
    scene: &mut Scene,
    tree: &RenderTree,
    ctx: &CompositionContext,
    surfaces: &SurfacePool,
    canvas: &mut dyn Canvas,
    base_inv: Affine,
) -> Result<()> {
    for node in ctx.iter() {
        let frozen = scene
            .frozen(node)?
            .ok_or_else(|| Error::Internal(format!("node not frozen during paint: {node:?}")))?;
        let relative = base_inv * frozen.transform;

        let nested = if node == ctx.root() { None } else { tree.nested_context(node) };
        if let Some(nested) = nested {
            // Render the isolated subtree into its surface, then composite
            // the surface under the node's frozen state.
            let surface = surfaces.lookup(node)?;
            let size = scene.intrinsic(node)?;
            let inv = frozen.transform.invert().unwrap_or_else(|| {
                tracing::warn!(?node, "composition transform is singular");
                Affine::IDENTITY
            });
            canvas.push_surface(surface, size)?;
            paint_context(scene, tree, nested, surfaces, canvas, inv)?;
            canvas.pop_surface(surface)?;
            canvas.composite(surface, relative, frozen.opacity)?;
        } else {
            canvas.set_transform(relative);
            canvas.set_opacity(frozen.opacity);
            if scene.has_widget(node) {
                let pctx = PaintContext {
                    size: scene.intrinsic(node)?,
                    frozen,
                };
                scene.with_widget_mut(node, |widget, _| widget.paint(&mut *canvas, &pctx))??;
            }
        }
        scene.melt(node)?;
    }
    Ok(())
}
