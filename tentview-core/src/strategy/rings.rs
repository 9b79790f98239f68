//! Concentric-ring strategy: horizontal bands at increasing height
//! fractions, each subdivided into flat-shaded panels, with a small
//! sinusoidal puff so the bands do not read as perfectly flat.
use std::f32::consts::TAU;

use nalgebra::Point3;

use crate::geometry::{Primitive, ShapeParameters};

use super::{window_markers, WindowSpec};

/// Puff amplitude as a fraction of the peak height
const PUFF_RATIO: f32 = 0.06;

/// Rings have no longitudinal stations of their own; windows spread over a
/// fixed number of sections along the length
const WINDOW_STATIONS: usize = 4;

pub(super) fn generate(
    params: &ShapeParameters,
    windows: &[WindowSpec],
    rings: usize,
    segments: usize,
) -> Vec<Primitive> {
    let rings = rings.max(1);
    let segments = segments.max(3);
    let half_length = params.half_length();
    let half_width = params.half_width();
    let peak = params.peak_height();

    // Footprint shrinks with height like a dome slice; the puff scales down
    // with it so the apex collapses to a clean point
    let ring_scale = |f: f32| (1.0 - f * f).max(0.0).sqrt();
    let ring_point = |f: f32, theta: f32| -> Point3<f32> {
        let s = ring_scale(f);
        let puff = PUFF_RATIO * peak * theta.sin() * s;
        Point3::new(
            half_length * s * theta.cos(),
            -peak * f - puff,
            half_width * s * theta.sin(),
        )
    };

    let mut out = Vec::with_capacity(rings * segments + rings + 1);

    for r in 0..rings {
        let f1 = r as f32 / rings as f32;
        let f2 = (r + 1) as f32 / rings as f32;
        for seg in 0..segments {
            let t1 = seg as f32 / segments as f32 * TAU;
            let t2 = (seg + 1) as f32 / segments as f32 * TAU;
            let corners = [
                ring_point(f1, t1),
                ring_point(f1, t2),
                ring_point(f2, t2),
                ring_point(f2, t1),
            ];
            let height_factor = (f1 + f2) / 2.0;
            out.push(Primitive::Panel {
                corners,
                height_factor,
            });
        }
    }

    // Ring outlines, closed loops
    for r in 0..=rings {
        let f = r as f32 / rings as f32;
        let points = (0..segments)
            .map(|seg| ring_point(f, seg as f32 / segments as f32 * TAU))
            .collect();
        out.push(Primitive::Outline {
            points,
            closed: true,
        });
    }

    out.extend(window_markers(params, windows, WINDOW_STATIONS));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apex_ring_collapses_to_a_point() {
        let params = ShapeParameters::canonical(12.0);
        let primitives = generate(&params, &[], 6, 36);
        let Some(Primitive::Outline { points, .. }) = primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Outline { .. }))
            .last()
        else {
            panic!("expected ring outlines");
        };
        for p in points {
            assert!((p.x - 0.0).abs() < 1e-3);
            assert!((p.z - 0.0).abs() < 1e-3);
            assert!((p.y - -params.peak_height()).abs() < 1e-3);
        }
    }

    #[test]
    fn puff_keeps_bands_off_flat() {
        let params = ShapeParameters::canonical(12.0);
        let primitives = generate(&params, &[], 6, 36);
        let Some(Primitive::Outline { points, .. }) = primitives
            .iter()
            .find(|p| matches!(p, Primitive::Outline { .. }))
        else {
            panic!("expected ring outlines");
        };
        let min_y = points.iter().map(|p| p.y).reduce(f32::min).unwrap();
        let max_y = points.iter().map(|p| p.y).reduce(f32::max).unwrap();
        assert!(max_y - min_y > 1.0, "base ring should undulate");
    }
}
