use geom::{Affine, Rect, Size};

use crate::{
    compose::SurfaceId,
    error::Result,
    render::{Canvas, Color},
};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Transform state change.
    Transform(Affine),
    /// Opacity state change.
    Opacity(f64),
    /// Rectangle fill.
    FillRect(Rect, Color),
    /// Rectangle stroke.
    StrokeRect(Rect, f64, Color),
    /// Begin drawing into an off-screen surface.
    PushSurface(SurfaceId, Size),
    /// Finish drawing into an off-screen surface.
    PopSurface(SurfaceId),
    /// Composite a finished surface.
    Composite {
        /// The composited surface.
        surface: SurfaceId,
        /// Placement transform.
        transform: Affine,
        /// Composite opacity.
        opacity: f64,
    },
}

/// A draw backend that records every call for inspection. Tests drive
/// frames against it and assert on the recorded op sequence.
pub struct RecordingCanvas {
    /// Recorded calls, in order.
    pub ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    /// Construct an empty recorder.
    pub fn new() -> Self {
        Self { ops: Vec::new() }
    }

    /// Drop all recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// The recorded fill calls, in order.
    pub fn fills(&self) -> Vec<(Rect, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect(rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn set_transform(&mut self, transform: Affine) {
        self.ops.push(DrawOp::Transform(transform));
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.ops.push(DrawOp::Opacity(opacity));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, width: f64, color: Color) {
        self.ops.push(DrawOp::StrokeRect(rect, width, color));
    }

    fn push_surface(&mut self, surface: SurfaceId, size: Size) -> Result<()> {
        self.ops.push(DrawOp::PushSurface(surface, size));
        Ok(())
    }

    fn pop_surface(&mut self, surface: SurfaceId) -> Result<()> {
        self.ops.push(DrawOp::PopSurface(surface));
        Ok(())
    }

    fn composite(&mut self, surface: SurfaceId, transform: Affine, opacity: f64) -> Result<()> {
        self.ops.push(DrawOp::Composite {
            surface,
            transform,
            opacity,
        });
        Ok(())
    }
}
