//! Painter's-order rendering of generated primitives.
//!
//! Primitives are painted in the order the generator emits them, typically
//! longitudinal-then-angular. That is not a correct general depth sort, but
//! the silhouette is convex enough that the walk order reads correctly, and
//! the layered translucency depends on it; a z-buffer would flatten the look.
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::geometry::Primitive;
use crate::projection::Projector;
use crate::surface::DrawSurface;

/// Minimum projected polygon area (and stroke length) that still paints
const DEGENERACY_EPSILON: f32 = 1e-3;

/// Colors, stroke widths and the brightness heuristic for the fixed passes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Panel base color; its alpha is the per-pass fill alpha
    pub panel_base: Rgba,
    pub panel_stroke: Rgba,
    pub panel_stroke_width: f32,
    pub outline_stroke: Rgba,
    pub outline_width: f32,
    pub window_fill: Rgba,
    pub window_stroke: Rgba,
    pub window_stroke_width: f32,
    pub entrance_fill: Rgba,
    pub entrance_stroke: Rgba,
    pub entrance_stroke_width: f32,
    /// Brightness at height factor zero
    pub brightness_floor: f32,
    /// Brightness gained from floor to the apex
    pub brightness_range: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            panel_base: Rgba::new(230, 65, 45, 0.85),
            panel_stroke: Rgba::new(255, 140, 130, 0.3),
            panel_stroke_width: 0.5,
            outline_stroke: Rgba::new(200, 50, 35, 0.9),
            outline_width: 4.0,
            window_fill: Rgba::new(180, 220, 255, 0.7),
            window_stroke: Rgba::new(100, 150, 200, 0.9),
            window_stroke_width: 2.0,
            entrance_fill: Rgba::new(40, 40, 60, 0.8),
            entrance_stroke: Rgba::new(80, 80, 100, 1.0),
            entrance_stroke_width: 3.0,
            brightness_floor: 0.7,
            brightness_range: 0.25,
        }
    }
}

impl Palette {
    /// Brightness heuristic: higher panels read lighter
    pub fn panel_fill(&self, height_factor: f32) -> Rgba {
        let brightness =
            self.brightness_floor + height_factor.clamp(0.0, 1.0) * self.brightness_range;
        self.panel_base.scaled(brightness)
    }
}

/// Project and paint one frame onto `surface`.
///
/// Zero-area polygons and zero-length paths are skipped silently; shape
/// extremities are expected to produce them under tapering strategies.
pub fn draw_frame(
    primitives: &[Primitive],
    projector: &Projector,
    pitch: f32,
    yaw: f32,
    palette: &Palette,
    surface: &mut dyn DrawSurface,
) {
    surface.clear();
    let (width, height) = surface.size();
    let (cx, cy) = (width / 2.0, height / 2.0);
    let to_screen = |p: &Point3<f32>| {
        let projected = projector.project(p, pitch, yaw);
        (cx + projected.x, cy + projected.y)
    };

    let mut screen: Vec<(f32, f32)> = Vec::new();
    for primitive in primitives {
        screen.clear();
        match primitive {
            Primitive::Panel {
                corners,
                height_factor,
            } => {
                screen.extend(corners.iter().map(&to_screen));
                if polygon_area(&screen) < DEGENERACY_EPSILON {
                    continue;
                }
                surface.fill_polygon(&screen, palette.panel_fill(*height_factor));
                surface.stroke_path(&screen, palette.panel_stroke, palette.panel_stroke_width, true);
            }
            Primitive::Outline { points, closed } => {
                screen.extend(points.iter().map(&to_screen));
                if path_length(&screen) < DEGENERACY_EPSILON {
                    continue;
                }
                surface.stroke_path(&screen, palette.outline_stroke, palette.outline_width, *closed);
            }
            Primitive::Window { points } => {
                screen.extend(points.iter().map(&to_screen));
                if polygon_area(&screen) < DEGENERACY_EPSILON {
                    continue;
                }
                surface.fill_polygon(&screen, palette.window_fill);
                surface.stroke_path(
                    &screen,
                    palette.window_stroke,
                    palette.window_stroke_width,
                    true,
                );
            }
            Primitive::Entrance { points } => {
                screen.extend(points.iter().map(&to_screen));
                if polygon_area(&screen) < DEGENERACY_EPSILON {
                    continue;
                }
                surface.fill_polygon(&screen, palette.entrance_fill);
                surface.stroke_path(
                    &screen,
                    palette.entrance_stroke,
                    palette.entrance_stroke_width,
                    true,
                );
            }
        }
    }
}

/// Shoelace area of a projected polygon
fn polygon_area(points: &[(f32, f32)]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut doubled = 0.0;
    for i in 0..points.len() {
        let (x1, y1) = points[i];
        let (x2, y2) = points[(i + 1) % points.len()];
        doubled += x1 * y2 - x2 * y1;
    }
    (doubled / 2.0).abs()
}

fn path_length(points: &[(f32, f32)]) -> f32 {
    points
        .windows(2)
        .map(|pair| {
            let (dx, dy) = (pair[1].0 - pair[0].0, pair[1].1 - pair[0].1);
            (dx * dx + dy * dy).sqrt()
        })
        .sum()
}
