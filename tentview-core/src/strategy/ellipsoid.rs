//! Ellipsoid-lattice strategy: a rectangular x/z grid over the lower
//! hemisphere, every cell a shaded quad.
use nalgebra::Point3;

use crate::geometry::{Primitive, ShapeParameters};

use super::{window_markers, WindowSpec, OUTLINE_SEGMENTS};

pub(super) fn generate(
    params: &ShapeParameters,
    windows: &[WindowSpec],
    stations: usize,
    slices: usize,
) -> Vec<Primitive> {
    let stations = stations.max(2);
    let slices = slices.max(2);
    let half_length = params.half_length();
    let half_width = params.half_width();
    let peak = params.peak_height();

    // Surface height over the footprint; zero outside the unit ellipse
    let lift = |x_norm: f32, z_norm: f32| -> f32 {
        (1.0 - x_norm * x_norm - z_norm * z_norm).max(0.0).sqrt()
    };
    let vertex = |xi: usize, zj: usize| -> Point3<f32> {
        let x_norm = xi as f32 / stations as f32 * 2.0 - 1.0;
        let z_norm = zj as f32 / slices as f32 * 2.0 - 1.0;
        Point3::new(
            x_norm * half_length,
            -peak * lift(x_norm, z_norm),
            z_norm * half_width,
        )
    };

    let mut out = Vec::with_capacity(stations * slices + stations + 1);

    for xi in 0..stations {
        for zj in 0..slices {
            let corners = [
                vertex(xi, zj),
                vertex(xi, zj + 1),
                vertex(xi + 1, zj + 1),
                vertex(xi + 1, zj),
            ];
            let height_factor = corners.iter().map(|p| -p.y / peak).sum::<f32>() / 4.0;
            out.push(Primitive::Panel {
                corners,
                height_factor,
            });
        }
    }

    // Cross-section outlines at each grid station
    for xi in 0..=stations {
        let x_norm = xi as f32 / stations as f32 * 2.0 - 1.0;
        let points = (0..=OUTLINE_SEGMENTS)
            .map(|s| {
                let z_norm = s as f32 / OUTLINE_SEGMENTS as f32 * 2.0 - 1.0;
                Point3::new(
                    x_norm * half_length,
                    -peak * lift(x_norm, z_norm),
                    z_norm * half_width,
                )
            })
            .collect();
        out.push(Primitive::Outline {
            points,
            closed: false,
        });
    }

    out.extend(window_markers(params, windows, stations));
    out
}
