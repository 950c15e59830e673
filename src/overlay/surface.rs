//! Drawing backend abstraction for the overlay.
//!
//! The renderer draws through this trait so the host can supply whatever
//! surface it has (a canvas, a GPU layer) and tests can record the draw
//! calls instead.

use crate::detect::{BoundingBox, Point};

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
    /// Creates a color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// On-screen size of the video element the overlay covers.
///
/// This is display geometry, not camera geometry: the two differ whenever
/// styling resizes the video, and they can differ per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Display width in CSS/display pixels.
    pub width: f64,
    /// Display height in CSS/display pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport from display dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Trait for overlay drawing backends.
pub trait DrawSurface {
    /// Resizes the surface to match the video's display rectangle.
    fn resize(&mut self, viewport: Viewport);

    /// Clears the whole surface.
    fn clear(&mut self);

    /// Strokes a closed polygon through four points.
    fn stroke_polygon(&mut self, points: &[Point; 4], color: Color, line_width: f64);

    /// Strokes an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: BoundingBox, color: Color, line_width: f64);

    /// Fills an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: BoundingBox, color: Color);

    /// Draws text with its baseline at (`x`, `y`).
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Color);

    /// Measures the rendered width of `text`.
    fn text_width(&self, text: &str) -> f64;
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// The surface was resized.
    Resize(Viewport),
    /// The surface was cleared.
    Clear,
    /// A polygon was stroked.
    StrokePolygon {
        /// Polygon corner points.
        points: [Point; 4],
        /// Stroke color.
        color: Color,
    },
    /// A rectangle was stroked.
    StrokeRect {
        /// Rectangle geometry.
        rect: BoundingBox,
        /// Stroke color.
        color: Color,
    },
    /// A rectangle was filled.
    FillRect {
        /// Rectangle geometry.
        rect: BoundingBox,
        /// Fill color.
        color: Color,
    },
    /// Text was drawn.
    FillText {
        /// The text drawn.
        text: String,
        /// Baseline x.
        x: f64,
        /// Baseline y.
        y: f64,
    },
}

/// Drawing backend that records calls instead of rasterizing, for tests.
///
/// Text measurement uses a fixed per-character advance so label layout is
/// deterministic.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

/// Fixed per-character advance used by [`RecordingSurface::text_width`].
pub const RECORDED_CHAR_WIDTH: f64 = 8.0;

impl RecordingSurface {
    /// Creates an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded drawing calls in order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }
}

impl DrawSurface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.ops.push(DrawOp::Resize(viewport));
    }

    fn clear(&mut self) {
        self.ops.push(DrawOp::Clear);
    }

    fn stroke_polygon(&mut self, points: &[Point; 4], color: Color, _line_width: f64) {
        self.ops.push(DrawOp::StrokePolygon {
            points: *points,
            color,
        });
    }

    fn stroke_rect(&mut self, rect: BoundingBox, color: Color, _line_width: f64) {
        self.ops.push(DrawOp::StrokeRect { rect, color });
    }

    fn fill_rect(&mut self, rect: BoundingBox, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, _color: Color) {
        self.ops.push(DrawOp::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * RECORDED_CHAR_WIDTH
    }
}
