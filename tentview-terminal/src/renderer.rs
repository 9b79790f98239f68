//! Cell-grid rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;

use tentview_core::{DrawSurface, Rgba};

/// Character luminosity ramp (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &['.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Paints filled polygons and stroked paths into a character grid.
///
/// Cells land in paint order with later primitives overwriting earlier
/// ones, mirroring the painter's-order contract of the core renderer; there
/// is no depth buffer.
pub struct CellSurface {
    width: usize,
    height: usize,
    chars: Vec<char>,
    colors: Vec<Color>,
}

impl CellSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            chars: vec![' '; size],
            colors: vec![Color::Reset; size],
        }
    }

    fn plot(&mut self, x: i32, y: i32, glyph: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.chars[idx] = glyph;
        self.colors[idx] = color;
    }

    /// Glyph weight from the color's luminance and opacity
    fn glyph_for(color: &Rgba) -> char {
        let weight = (color.luminance() * color.a).clamp(0.0, 1.0);
        let index = (weight * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
    }

    fn cell_color(color: &Rgba) -> Color {
        Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        }
    }

    fn fill_triangle(&mut self, v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), glyph: char, color: Color) {
        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.plot(x, y, glyph, color);
                    }
                }
            }
        }
    }

    fn line(&mut self, a: (f32, f32), b: (f32, f32), glyph: char, color: Color) {
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            self.plot(x.round() as i32, y.round() as i32, glyph, color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.colors[idx]))?;
                writer.queue(Print(self.chars[idx]))?;
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for CellSurface {
    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn clear(&mut self) {
        for i in 0..self.chars.len() {
            self.chars[i] = ' ';
            self.colors[i] = Color::Reset;
        }
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let glyph = Self::glyph_for(&color);
        let cell = Self::cell_color(&color);
        // Fan triangulation; generator polygons are convex
        for i in 1..points.len() - 1 {
            self.fill_triangle(points[0], points[i], points[i + 1], glyph, cell);
        }
    }

    fn stroke_path(&mut self, points: &[(f32, f32)], color: Rgba, width: f32, closed: bool) {
        if points.len() < 2 {
            return;
        }
        // Heavy strokes get the top of the ramp regardless of luminance
        let glyph = if width >= 2.0 {
            LUMINOSITY_RAMP[LUMINOSITY_RAMP.len() - 1]
        } else {
            Self::glyph_for(&color)
        };
        let cell = Self::cell_color(&color);
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], glyph, cell);
        }
        if closed && points.len() > 2 {
            self.line(points[points.len() - 1], points[0], glyph, cell);
        }
    }
}

/// Barycentric coordinates of `p` in the triangle, or None when degenerate
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);
    if denom.abs() < 1e-6 {
        return None;
    }
    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    Some((w0, w1, 1.0 - w0 - w1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_cells(surface: &CellSurface) -> usize {
        surface.chars.iter().filter(|&&c| c != ' ').count()
    }

    #[test]
    fn fill_covers_interior() {
        let mut surface = CellSurface::new(20, 20);
        let square = [(2.0, 2.0), (17.0, 2.0), (17.0, 17.0), (2.0, 17.0)];
        surface.fill_polygon(&square, Rgba::new(230, 65, 45, 0.85));
        assert!(filled_cells(&surface) >= 15 * 15);
    }

    #[test]
    fn degenerate_triangle_paints_nothing() {
        let mut surface = CellSurface::new(20, 20);
        let sliver = [(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)];
        surface.fill_polygon(&sliver, Rgba::new(230, 65, 45, 0.85));
        assert_eq!(filled_cells(&surface), 0);
    }

    #[test]
    fn strokes_clip_to_the_grid() {
        let mut surface = CellSurface::new(10, 10);
        surface.stroke_path(
            &[(-50.0, 5.0), (60.0, 5.0)],
            Rgba::new(200, 50, 35, 0.9),
            4.0,
            false,
        );
        assert_eq!(filled_cells(&surface), 10);
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut surface = CellSurface::new(8, 8);
        surface.fill_polygon(
            &[(0.0, 0.0), (8.0, 0.0), (8.0, 8.0), (0.0, 8.0)],
            Rgba::new(230, 65, 45, 0.85),
        );
        assert!(filled_cells(&surface) > 0);
        surface.clear();
        assert_eq!(filled_cells(&surface), 0);
    }
}
