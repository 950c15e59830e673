//! Per-tick overlay drawing.
//!
//! Rendering is a pure function of the current tracker contents and the
//! video geometry. It runs every display frame while scanning, independent
//! of the detection cadence, because the display rectangle can change
//! between detections.

use super::{Color, DrawSurface, Viewport};
use crate::capture::Resolution;
use crate::detect::{BoundingBox, CodeGeometry};
use crate::scan::VisibleCode;

/// Stroke color for target matches.
const TARGET_COLOR: Color = Color::rgba(0, 200, 83, 255);
/// Stroke color for codes that are not being searched for.
const CANDIDATE_COLOR: Color = Color::rgba(255, 214, 0, 255);
/// Label background.
const LABEL_BG: Color = Color::rgba(0, 0, 0, 180);
/// Label text color.
const LABEL_TEXT: Color = Color::rgba(255, 255, 255, 255);

const STROKE_WIDTH: f64 = 3.0;
const LABEL_HEIGHT: f64 = 18.0;
const LABEL_PADDING: f64 = 4.0;
const TEXT_BASELINE_OFFSET: f64 = 13.0;

/// Draws bounding shapes and serial labels over the video.
#[derive(Debug)]
pub struct OverlayRenderer {
    max_label_chars: usize,
}

impl OverlayRenderer {
    /// Creates a renderer that truncates labels beyond `max_label_chars`.
    pub fn new(max_label_chars: usize) -> Self {
        Self { max_label_chars }
    }

    /// Redraws the overlay for one render tick.
    ///
    /// `native` is the camera resolution the detection geometry is
    /// expressed in; `viewport` is the on-screen size of the video. The
    /// two scale factors are independent because styling can distort the
    /// aspect ratio.
    pub fn render<'a>(
        &self,
        surface: &mut dyn DrawSurface,
        native: Resolution,
        viewport: Viewport,
        codes: impl Iterator<Item = &'a VisibleCode>,
    ) {
        surface.resize(viewport);
        surface.clear();

        if native.width == 0 || native.height == 0 {
            return;
        }
        let sx = viewport.width / native.width as f64;
        let sy = viewport.height / native.height as f64;

        for code in codes {
            let color = if code.is_target {
                TARGET_COLOR
            } else {
                CANDIDATE_COLOR
            };

            let geometry = code.geometry.scaled(sx, sy);
            match &geometry {
                CodeGeometry::Corners(points) => {
                    surface.stroke_polygon(points, color, STROKE_WIDTH)
                }
                CodeGeometry::Rect(rect) => surface.stroke_rect(*rect, color, STROKE_WIDTH),
            }

            self.draw_label(surface, geometry.bounding_box(), &code.serial);
        }
    }

    /// Draws the serial label above the shape when there is room, else
    /// below it.
    fn draw_label(&self, surface: &mut dyn DrawSurface, bounds: BoundingBox, serial: &str) {
        let label = truncate_label(serial, self.max_label_chars);
        let width = surface.text_width(&label) + 2.0 * LABEL_PADDING;

        let top = if bounds.y - LABEL_HEIGHT >= 0.0 {
            bounds.y - LABEL_HEIGHT
        } else {
            bounds.y + bounds.height
        };

        surface.fill_rect(BoundingBox::new(bounds.x, top, width, LABEL_HEIGHT), LABEL_BG);
        surface.fill_text(
            &label,
            bounds.x + LABEL_PADDING,
            top + TEXT_BASELINE_OFFSET,
            LABEL_TEXT,
        );
    }
}

/// Truncates `serial` to `max_chars` characters, appending an ellipsis
/// when anything was cut.
fn truncate_label(serial: &str, max_chars: usize) -> String {
    if serial.chars().count() <= max_chars {
        serial.to_owned()
    } else {
        let mut label: String = serial.chars().take(max_chars).collect();
        label.push('…');
        label
    }
}
