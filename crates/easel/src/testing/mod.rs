//! Utilities for testing engines: a recording draw backend and a harness
//! that drives frames against it.

/// Recording canvas backend.
pub mod canvas;
/// Engine test harness.
pub mod harness;

pub use canvas::{DrawOp, RecordingCanvas};
pub use harness::Harness;
