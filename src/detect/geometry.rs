//! Geometry of detected codes in camera-native pixel coordinates.

use serde::{Deserialize, Serialize};

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point scaled by independent horizontal and vertical
    /// factors.
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }
}

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl BoundingBox {
    /// Creates a bounding box.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns this box scaled by independent horizontal and vertical
    /// factors.
    pub fn scaled(self, sx: f64, sy: f64) -> Self {
        Self::new(self.x * sx, self.y * sy, self.width * sx, self.height * sy)
    }
}

/// Bounding geometry of a detected code.
///
/// Detectors that locate the code precisely supply four corner points;
/// others supply only an axis-aligned rectangle. The overlay renders
/// whichever form is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CodeGeometry {
    /// Four corner points, in detector order.
    Corners([Point; 4]),
    /// Axis-aligned bounding rectangle.
    Rect(BoundingBox),
}

impl CodeGeometry {
    /// Returns this geometry scaled by independent horizontal and vertical
    /// factors.
    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        match self {
            Self::Corners(points) => {
                Self::Corners([
                    points[0].scaled(sx, sy),
                    points[1].scaled(sx, sy),
                    points[2].scaled(sx, sy),
                    points[3].scaled(sx, sy),
                ])
            }
            Self::Rect(rect) => Self::Rect(rect.scaled(sx, sy)),
        }
    }

    /// Returns the axis-aligned extent of this geometry, used to anchor
    /// labels.
    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Self::Corners(points) => {
                let mut min_x = f64::INFINITY;
                let mut min_y = f64::INFINITY;
                let mut max_x = f64::NEG_INFINITY;
                let mut max_y = f64::NEG_INFINITY;
                for p in points {
                    min_x = min_x.min(p.x);
                    min_y = min_y.min(p.y);
                    max_x = max_x.max(p.x);
                    max_y = max_y.max(p.y);
                }
                BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
            }
            Self::Rect(rect) => *rect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, side: f64) -> CodeGeometry {
        CodeGeometry::Corners([
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ])
    }

    #[test]
    fn test_scaling_is_independent_per_axis() {
        let rect = BoundingBox::new(10.0, 20.0, 100.0, 50.0).scaled(0.5, 2.0);
        assert_eq!(rect, BoundingBox::new(5.0, 40.0, 50.0, 100.0));
    }

    #[test]
    fn test_corner_scaling() {
        let scaled = square(10.0, 10.0, 10.0).scaled(2.0, 1.0);
        match scaled {
            CodeGeometry::Corners(points) => {
                assert_eq!(points[0], Point::new(20.0, 10.0));
                assert_eq!(points[2], Point::new(40.0, 20.0));
            }
            CodeGeometry::Rect(_) => panic!("scaling must preserve the geometry kind"),
        }
    }

    #[test]
    fn test_bounding_box_of_corners() {
        let bounds = square(5.0, 7.0, 10.0).bounding_box();
        assert_eq!(bounds, BoundingBox::new(5.0, 7.0, 10.0, 10.0));
    }

    #[test]
    fn test_bounding_box_of_rect_is_identity() {
        let rect = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(CodeGeometry::Rect(rect).bounding_box(), rect);
    }
}
