//! Output surface abstraction shared by the terminal and web embeds
use crate::color::Rgba;

/// A fixed-size drawable area the renderer exclusively paints.
///
/// Coordinates are in surface units with the origin at the top-left corner;
/// the renderer recenters projected points itself. The whole area is cleared
/// and repainted every frame, so implementations never see partial
/// invalidation.
pub trait DrawSurface {
    fn size(&self) -> (f32, f32);

    fn clear(&mut self);

    /// Fill a closed polygon. Implementations may assume it is convex.
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba);

    /// Stroke an open or closed path of straight segments
    fn stroke_path(&mut self, points: &[(f32, f32)], color: Rgba, width: f32, closed: bool);
}
