//! Overlay rendering over the live camera view.

mod renderer;
mod surface;

pub use renderer::OverlayRenderer;
pub use surface::{Color, DrawOp, DrawSurface, RecordingSurface, Viewport, RECORDED_CHAR_WIDTH};
