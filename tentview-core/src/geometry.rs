//! Geometry primitives for the tent illustration
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Canonical tent proportions (length : width : height = 32 : 16 : 8)
pub const CANONICAL_LENGTH: f32 = 32.0;
pub const CANONICAL_WIDTH: f32 = 16.0;
pub const CANONICAL_HEIGHT: f32 = 8.0;

/// Bounding envelope of the generated tent, in object-local units.
///
/// x is the longitudinal axis, y the vertical axis (negative is up),
/// z the lateral axis; the origin sits at the footprint center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParameters {
    pub length: f32,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl ShapeParameters {
    /// Canonical proportions at the given scale factor
    pub fn canonical(scale: f32) -> Self {
        Self {
            length: CANONICAL_LENGTH,
            width: CANONICAL_WIDTH,
            height: CANONICAL_HEIGHT,
            scale,
        }
    }

    pub fn half_length(&self) -> f32 {
        self.length * self.scale / 2.0
    }

    pub fn half_width(&self) -> f32 {
        self.width * self.scale / 2.0
    }

    pub fn peak_height(&self) -> f32 {
        self.height * self.scale
    }

    /// Radius of the sphere containing every point any strategy can emit.
    /// The projector's focal length must stay above this value; the
    /// projection tests enforce that configuration invariant.
    pub fn envelope_radius(&self) -> f32 {
        let l = self.half_length();
        let w = self.half_width();
        let h = self.peak_height();
        (l * l + w * w + h * h).sqrt()
    }
}

impl Default for ShapeParameters {
    fn default() -> Self {
        Self::canonical(13.0)
    }
}

/// A projected screen point with the post-rotation depth retained
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    pub depth: f32,
}

/// One drawable piece of a frame's mesh.
///
/// Primitives are generated fresh on every redraw and discarded after the
/// draw call; there is no retained scene graph. The renderer consumes them
/// in emission order.
#[derive(Debug, Clone)]
pub enum Primitive {
    /// Filled surface quad; `height_factor` in [0, 1] feeds the brightness heuristic
    Panel {
        corners: [Point3<f32>; 4],
        height_factor: f32,
    },
    /// Cross-section wireframe polyline
    Outline {
        points: Vec<Point3<f32>>,
        closed: bool,
    },
    /// Decorative window marker, a closed loop on the surface tangent plane
    Window { points: Vec<Point3<f32>> },
    /// Door panel at the longitudinal end
    Entrance { points: Vec<Point3<f32>> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_proportions() {
        let shape = ShapeParameters::canonical(13.0);
        assert_eq!(shape.half_length(), 208.0);
        assert_eq!(shape.half_width(), 104.0);
        assert_eq!(shape.peak_height(), 104.0);
    }

    #[test]
    fn envelope_contains_extents() {
        let shape = ShapeParameters::canonical(6.5);
        let r = shape.envelope_radius();
        assert!(r >= shape.half_length());
        assert!(r >= shape.half_width());
        assert!(r >= shape.peak_height());
    }
}
