//! Fan-radial strategy: at each longitudinal station, a fan of half-circle
//! arcs climbing from the base plane to the apex height, with filled wedges
//! between consecutive blades.
use std::f32::consts::PI;

use nalgebra::Point3;

use crate::geometry::{Primitive, ShapeParameters};

use super::{circular_taper, window_markers, WindowSpec, OUTLINE_SEGMENTS};

/// Angular steps per filled wedge strip
const WEDGE_PANELS: usize = 18;

pub(super) fn generate(
    params: &ShapeParameters,
    windows: &[WindowSpec],
    stations: usize,
    blades: usize,
) -> Vec<Primitive> {
    let stations = stations.max(2);
    let blades = blades.max(1);
    let half_length = params.half_length();

    // Arc point at a height fraction: the footprint stays put while the
    // blade rises toward the apex
    let blade_point = |x: f32, angle: f32, taper: f32, fraction: f32| -> Point3<f32> {
        Point3::new(
            x,
            -angle.sin() * params.peak_height() * taper * fraction,
            angle.cos() * params.half_width() * taper,
        )
    };

    let mut out = Vec::new();

    for i in 0..stations {
        let t = i as f32 / (stations - 1) as f32;
        let x_norm = t * 2.0 - 1.0;
        let x = x_norm * half_length;
        let taper = circular_taper(x_norm);

        // Wedges between consecutive blades
        for b in 0..blades {
            let f1 = b as f32 / blades as f32;
            let f2 = (b + 1) as f32 / blades as f32;
            for j in 0..WEDGE_PANELS {
                let a1 = j as f32 / WEDGE_PANELS as f32 * PI;
                let a2 = (j + 1) as f32 / WEDGE_PANELS as f32 * PI;
                let corners = [
                    blade_point(x, a1, taper, f1),
                    blade_point(x, a2, taper, f1),
                    blade_point(x, a2, taper, f2),
                    blade_point(x, a1, taper, f2),
                ];
                let height_factor = (a1.sin() + a2.sin()) / 2.0 * (f1 + f2) / 2.0;
                out.push(Primitive::Panel {
                    corners,
                    height_factor,
                });
            }
        }

        // The blades themselves; the top one is the station's cross-section
        for b in 0..=blades {
            let fraction = b as f32 / blades as f32;
            let points = (0..=OUTLINE_SEGMENTS)
                .map(|s| {
                    let angle = s as f32 / OUTLINE_SEGMENTS as f32 * PI;
                    blade_point(x, angle, taper, fraction)
                })
                .collect();
            out.push(Primitive::Outline {
                points,
                closed: false,
            });
        }
    }

    out.extend(window_markers(params, windows, stations - 1));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blade_counts_per_station() {
        let params = ShapeParameters::canonical(11.0);
        let primitives = generate(&params, &[], 9, 6);
        let outlines = primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Outline { .. }))
            .count();
        assert_eq!(outlines, 9 * 7);
    }

    #[test]
    fn base_blade_lies_flat() {
        let params = ShapeParameters::canonical(11.0);
        let primitives = generate(&params, &[], 3, 4);
        // First outline of the middle station is the zero-fraction blade
        let flat = primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Outline { points, .. } => Some(points),
                _ => None,
            })
            .nth(5)
            .unwrap();
        for p in flat {
            assert_eq!(p.y, 0.0);
        }
    }
}
